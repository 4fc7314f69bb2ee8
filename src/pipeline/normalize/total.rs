use serde_json::{Map, Value};

use super::numeric::to_number;

/// Fields that may carry an explicit total, in priority order
pub const TOTAL_CANDIDATE_FIELDS: &[&str] = &[
    "totalBenefits",
    "totalBenefit",
    "total",
    "benefitTotal",
    "benefits",
    "cashEquivalent",
    "cashEquivalentBenefits",
    "cashbenefit",
    "cash_value",
    "cashValue",
    "otherBenefits",
];

/// Which step of the derivation produced a total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TotalSource {
    /// An explicit candidate field held a positive figure
    Explicit,
    /// The largest numeric value found on the record
    LargestValue,
    /// Salary plus allowances
    Sum,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedTotal {
    pub value: f64,
    pub source: TotalSource,
}

/// Derive total benefits for a raw record. The result is always finite and
/// non-negative.
pub fn calculate_total_benefits(
    record: &Map<String, Value>,
    salary: Option<f64>,
    allowances: Option<f64>,
) -> DerivedTotal {
    // First candidate carrying a non-null value wins, even when falsy
    let explicit = TOTAL_CANDIDATE_FIELDS
        .iter()
        .find_map(|key| record.get(*key).filter(|value| !value.is_null()))
        .and_then(to_number);

    if let Some(total) = explicit.filter(|total| *total > 0.0) {
        return DerivedTotal {
            value: total,
            source: TotalSource::Explicit,
        };
    }

    // Every numeric own value is scanned, salary and allowances fields included
    let largest = record
        .values()
        .filter_map(to_number)
        .fold(None, |acc: Option<f64>, value| Some(acc.map_or(value, |max| max.max(value))))
        .map(|largest| largest.max(salary.unwrap_or(0.0)).max(allowances.unwrap_or(0.0)));

    match largest.or(explicit) {
        Some(total) if total > 0.0 => DerivedTotal {
            value: total,
            source: TotalSource::LargestValue,
        },
        _ => DerivedTotal {
            value: (salary.unwrap_or(0.0) + allowances.unwrap_or(0.0)).max(0.0),
            source: TotalSource::Sum,
        },
    }
}
