use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;

use crate::constants::{
    DISPLAY_NAME_FIELD, IS_DIRECTOR_FIELD, RESERVED_FIELD_PREFIX, TOTAL_BENEFITS_FIELD,
    TOTAL_BENEFITS_LABEL,
};
use crate::pipeline::normalize::to_number;
use crate::pipeline::CanonicalRecord;

static CASE_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([a-z0-9])([A-Z])").expect("case boundary regex is valid"));
static SEPARATORS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[_-]+").expect("separator regex is valid"));

/// One selectable field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldOption {
    pub key: String,
    pub label: String,
}

impl FieldOption {
    fn new(key: &str, label: String) -> Self {
        Self {
            key: key.to_string(),
            label,
        }
    }
}

/// Dimension and sort selectors, derived from the dataset.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Controls {
    dimensions: Vec<FieldOption>,
    sort_fields: Vec<FieldOption>,
    selected_dimension: Option<String>,
    selected_sort: Option<String>,
}

impl Controls {
    /// Rebuild the option lists from the first record, keeping the current
    /// selections where they are still offered.
    pub fn populate(&mut self, records: &[CanonicalRecord]) {
        let Some(sample) = records.first() else {
            *self = Controls::default();
            return;
        };

        let fields = sample.fields();
        let candidates: Vec<(&String, &Value)> = fields
            .iter()
            .filter(|(key, _)| !key.starts_with(RESERVED_FIELD_PREFIX))
            .filter(|(_, value)| value.is_string() || value.is_number())
            .filter(|(key, _)| key.as_str() != IS_DIRECTOR_FIELD && key.as_str() != TOTAL_BENEFITS_FIELD)
            .collect();

        self.dimensions = candidates
            .iter()
            .map(|(key, _)| FieldOption::new(key, to_label(key)))
            .collect();

        self.sort_fields = std::iter::once(FieldOption::new(
            TOTAL_BENEFITS_FIELD,
            TOTAL_BENEFITS_LABEL.to_string(),
        ))
        .chain(
            candidates
                .iter()
                .filter(|(_, value)| to_number(value).is_some())
                .map(|(key, _)| FieldOption::new(key, to_label(key))),
        )
        .collect();

        let dimension = self
            .selected_dimension
            .take()
            .filter(|key| self.offers_dimension(key))
            .or_else(|| {
                self.offers_dimension(DISPLAY_NAME_FIELD)
                    .then(|| DISPLAY_NAME_FIELD.to_string())
            })
            .or_else(|| self.dimensions.first().map(|option| option.key.clone()));
        self.selected_dimension = dimension;

        let sort = self
            .selected_sort
            .take()
            .filter(|key| self.offers_sort(key))
            .unwrap_or_else(|| TOTAL_BENEFITS_FIELD.to_string());
        self.selected_sort = Some(sort);
    }

    pub fn dimensions(&self) -> &[FieldOption] {
        &self.dimensions
    }

    pub fn sort_fields(&self) -> &[FieldOption] {
        &self.sort_fields
    }

    pub fn offers_dimension(&self, key: &str) -> bool {
        self.dimensions.iter().any(|option| option.key == key)
    }

    pub fn offers_sort(&self, key: &str) -> bool {
        self.sort_fields.iter().any(|option| option.key == key)
    }

    /// Select a dimension; unknown keys are ignored.
    pub fn select_dimension(&mut self, key: &str) -> bool {
        let offered = self.offers_dimension(key);
        if offered {
            self.selected_dimension = Some(key.to_string());
        }
        offered
    }

    /// Select a sort field; unknown keys are ignored.
    pub fn select_sort(&mut self, key: &str) -> bool {
        let offered = self.offers_sort(key);
        if offered {
            self.selected_sort = Some(key.to_string());
        }
        offered
    }

    pub fn dimension(&self) -> &str {
        self.selected_dimension.as_deref().unwrap_or(DISPLAY_NAME_FIELD)
    }

    pub fn sort_field(&self) -> &str {
        self.selected_sort.as_deref().unwrap_or(TOTAL_BENEFITS_FIELD)
    }

    /// Header for the dimension column
    pub fn dimension_label(&self) -> String {
        self.dimensions
            .iter()
            .find(|option| option.key == self.dimension())
            .map(|option| option.label.clone())
            .unwrap_or_else(|| "Director".to_string())
    }
}

/// Turn a field key into a readable label: `cash_value` → `Cash value`,
/// `employeeNumber` → `Employee Number`.
pub fn to_label(key: &str) -> String {
    let spaced = CASE_BOUNDARY.replace_all(key, "$1 $2");
    let spaced = SEPARATORS.replace_all(&spaced, " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fallback::fallback_directors;
    use crate::pipeline::normalise;
    use serde_json::json;

    fn keys(options: &[FieldOption]) -> Vec<&str> {
        options.iter().map(|o| o.key.as_str()).collect()
    }

    #[test]
    fn test_to_label() {
        assert_eq!(to_label("displayName"), "Display Name");
        assert_eq!(to_label("cash_value"), "Cash value");
        assert_eq!(to_label("employee--number"), "Employee number");
        assert_eq!(to_label("tax2Code"), "Tax2 Code");
        assert_eq!(to_label("salary"), "Salary");
        assert_eq!(to_label(""), "");
    }

    #[test]
    fn test_populate_from_fallback() {
        let mut controls = Controls::default();
        controls.populate(&fallback_directors());

        assert_eq!(
            keys(controls.dimensions()),
            vec![
                "displayName",
                "role",
                "salary",
                "allowances",
                "taxNumber",
                "employeeNumber",
                "taxReference",
                "employeeId"
            ]
        );
        assert_eq!(
            keys(controls.sort_fields()),
            vec![
                "totalBenefits",
                "salary",
                "allowances",
                "taxNumber",
                "employeeNumber",
                "taxReference",
                "employeeId"
            ]
        );
        assert_eq!(controls.sort_fields()[0].label, "Total benefits");
        assert_eq!(controls.dimension(), "displayName");
        assert_eq!(controls.sort_field(), "totalBenefits");
        assert_eq!(controls.dimension_label(), "Display Name");
    }

    #[test]
    fn test_reserved_and_nested_fields_are_excluded() {
        let record = normalise(&json!({
            "_links": "self",
            "role": "Director",
            "address": {"city": "Leeds"},
            "active": true
        }))
        .unwrap();

        let mut controls = Controls::default();
        controls.populate(&[record]);

        assert!(!controls.offers_dimension("_links"));
        assert!(!controls.offers_dimension("address"));
        assert!(!controls.offers_dimension("active"));
        assert!(!controls.offers_dimension("isDirector"));
        assert!(!controls.offers_dimension("totalBenefits"));
        assert!(controls.offers_dimension("role"));
    }

    #[test]
    fn test_unavailable_money_fields_are_not_offered() {
        let record = normalise(&json!({"name": "Kim", "role": "Director", "grade": "A"})).unwrap();
        assert_eq!(record.field("salary"), Some(Value::Null));

        let mut controls = Controls::default();
        controls.populate(&[record]);

        assert!(!controls.offers_dimension("salary"));
        assert!(!controls.offers_dimension("allowances"));
        assert!(!controls.offers_sort("salary"));
        assert!(controls.offers_dimension("grade"));
    }

    #[test]
    fn test_selection_is_retained_across_reloads() {
        let mut controls = Controls::default();
        controls.populate(&fallback_directors());
        assert!(controls.select_dimension("role"));
        assert!(controls.select_sort("salary"));
        assert!(!controls.select_sort("role"));

        controls.populate(&fallback_directors());
        assert_eq!(controls.dimension(), "role");
        assert_eq!(controls.sort_field(), "salary");
    }

    #[test]
    fn test_vanished_selection_resets() {
        let mut controls = Controls::default();
        controls.populate(&fallback_directors());
        controls.select_dimension("taxReference");
        controls.select_sort("employeeId");

        let live = normalise(&json!({"name": "Z", "role": "Director", "pay": 1})).unwrap();
        controls.populate(&[live]);
        assert_eq!(controls.dimension(), "displayName");
        assert_eq!(controls.sort_field(), "totalBenefits");
    }

    #[test]
    fn test_empty_dataset_clears_options() {
        let mut controls = Controls::default();
        controls.populate(&fallback_directors());
        controls.populate(&[]);

        assert!(controls.dimensions().is_empty());
        assert!(controls.sort_fields().is_empty());
        assert_eq!(controls.dimension_label(), "Director");
    }
}
