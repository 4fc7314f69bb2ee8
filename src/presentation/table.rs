use serde::Serialize;
use serde_json::Value;

use super::format::{format_currency, format_value};
use crate::pipeline::{sort_for_display, CanonicalRecord};

/// One rendered table row, every cell already formatted
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRow {
    pub rank: usize,
    pub dimension: String,
    pub total_benefits: String,
    pub salary: String,
    pub allowances: String,
    pub tax_number: String,
    pub employee_number: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedTable {
    pub dimension_label: String,
    pub rows: Vec<TableRow>,
}

/// Headers of the fixed columns following rank and dimension
pub const COLUMN_HEADERS: [&str; 5] = [
    "Total benefits",
    "Salary",
    "Allowances",
    "Tax number",
    "Employee number",
];

/// Sort by `sort_field`, keep the first `limit` records and format them.
pub fn render_rows(
    records: &[CanonicalRecord],
    dimension: &str,
    sort_field: &str,
    limit: usize,
) -> Vec<TableRow> {
    sort_for_display(records, sort_field)
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(index, record)| {
            let dimension_value = record
                .field(dimension)
                .filter(|value| !value.is_null())
                .unwrap_or_else(|| Value::from(record.display_name()));

            TableRow {
                rank: index + 1,
                dimension: format_value(&dimension_value),
                total_benefits: format_currency(Some(record.total_benefits())),
                salary: format_currency(record.salary()),
                allowances: format_currency(record.allowances()),
                tax_number: format_value(&Value::from(record.tax_number())),
                employee_number: format_value(&Value::from(record.employee_number())),
            }
        })
        .collect()
}

impl RenderedTable {
    /// Plain-text rendering with aligned columns, numbers right-aligned.
    pub fn to_text(&self) -> String {
        let header = [
            "#".to_string(),
            self.dimension_label.clone(),
            COLUMN_HEADERS[0].to_string(),
            COLUMN_HEADERS[1].to_string(),
            COLUMN_HEADERS[2].to_string(),
            COLUMN_HEADERS[3].to_string(),
            COLUMN_HEADERS[4].to_string(),
        ];
        let body: Vec<[String; 7]> = self
            .rows
            .iter()
            .map(|row| {
                [
                    row.rank.to_string(),
                    row.dimension.clone(),
                    row.total_benefits.clone(),
                    row.salary.clone(),
                    row.allowances.clone(),
                    row.tax_number.clone(),
                    row.employee_number.clone(),
                ]
            })
            .collect();

        let mut widths = header.clone().map(|cell| cell.chars().count());
        for row in &body {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let right_aligned = |column: usize| matches!(column, 0 | 2 | 3 | 4);
        let line = |cells: &[String; 7]| {
            cells
                .iter()
                .enumerate()
                .map(|(column, cell)| {
                    let pad = widths[column].saturating_sub(cell.chars().count());
                    if right_aligned(column) {
                        format!("{}{}", " ".repeat(pad), cell)
                    } else {
                        format!("{}{}", cell, " ".repeat(pad))
                    }
                })
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        };

        let mut out = line(&header);
        out.push('\n');
        out.push_str(&"-".repeat(widths.iter().sum::<usize>() + 2 * (widths.len() - 1)));
        for row in &body {
            out.push('\n');
            out.push_str(&line(row));
        }
        out
    }
}
