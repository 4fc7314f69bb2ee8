//! Prioritized alias resolution for logical fields of a raw record.

use serde_json::{Map, Value};
use std::collections::HashMap;

/// Ordered key variants considered equivalent for one logical field.
///
/// `exact` keys are matched against the record as-is; `folded` keys are
/// lower-case and matched against the case-folded view of the record.
#[derive(Debug, Clone, Copy)]
pub struct FieldAliases {
    pub exact: &'static [&'static str],
    pub folded: &'static [&'static str],
}

pub const NAME: FieldAliases = FieldAliases {
    exact: &["name", "fullName", "directorName", "employeeName"],
    folded: &["name", "employee name"],
};

pub const ROLE: FieldAliases = FieldAliases {
    exact: &["role", "position", "jobTitle", "employmentTitle", "occupation"],
    folded: &["role", "employment"],
};

pub const SALARY: FieldAliases = FieldAliases {
    exact: &["salary", "employmentIncome", "cash", "pay"],
    folded: &["salary", "cash"],
};

pub const ALLOWANCES: FieldAliases = FieldAliases {
    exact: &["allowances", "benefitsinKind", "expenses"],
    folded: &["allowances", "benefits"],
};

pub const TAX_NUMBER: FieldAliases = FieldAliases {
    exact: &["taxNumber", "taxReference", "nino", "niNumber", "taxId"],
    folded: &["tax number", "tax reference"],
};

pub const EMPLOYEE_NUMBER: FieldAliases = FieldAliases {
    exact: &["employeeNumber", "payrollNumber", "reference", "employeeId"],
    folded: &["employee number", "payroll number"],
};

/// A raw record together with its case-folded key lookup.
pub struct RecordView<'a> {
    record: &'a Map<String, Value>,
    folded: HashMap<String, &'a Value>,
}

impl<'a> RecordView<'a> {
    pub fn new(record: &'a Map<String, Value>) -> Self {
        // Later keys win when two keys fold to the same lower-case form
        let folded = record
            .iter()
            .map(|(key, value)| (key.to_lowercase(), value))
            .collect();
        Self { record, folded }
    }

    pub fn record(&self) -> &'a Map<String, Value> {
        self.record
    }

    /// Resolve a logical field: exact aliases first, then the folded lookup.
    /// Only truthy values count as a match.
    pub fn resolve(&self, aliases: &FieldAliases) -> Option<&'a Value> {
        let strategies: [&dyn Fn() -> Option<&'a Value>; 2] = [
            &|| first_truthy(aliases.exact.iter().filter_map(|key| self.record.get(*key))),
            &|| first_truthy(aliases.folded.iter().filter_map(|key| self.folded.get(*key).copied())),
        ];
        strategies.iter().find_map(|strategy| strategy())
    }
}

/// Pure alias resolution against a single record.
pub fn resolve_alias<'a>(record: &'a Map<String, Value>, aliases: &FieldAliases) -> Option<&'a Value> {
    RecordView::new(record).resolve(aliases)
}

fn first_truthy<'a>(mut values: impl Iterator<Item = &'a Value>) -> Option<&'a Value> {
    values.find(|value| is_truthy(value))
}

/// Loose truthiness: empty strings, zero, `false` and `null` do not count.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|v| v != 0.0 && !v.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Render a resolved value as display text.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("test fixture must be an object"),
        }
    }

    #[test]
    fn test_exact_alias_priority() {
        let record = object(json!({"employeeName": "B", "fullName": "A"}));
        assert_eq!(resolve_alias(&record, &NAME), Some(&json!("A")));
    }

    #[test]
    fn test_falsy_values_are_skipped() {
        let record = object(json!({"salary": 0, "cash": "", "pay": "£1,000"}));
        assert_eq!(resolve_alias(&record, &SALARY), Some(&json!("£1,000")));
    }

    #[test]
    fn test_case_folded_fallback() {
        let record = object(json!({"Employee Name": "Jo Bloggs", "ROLE": "Director"}));
        assert_eq!(resolve_alias(&record, &NAME), Some(&json!("Jo Bloggs")));
        assert_eq!(resolve_alias(&record, &ROLE), Some(&json!("Director")));
    }

    #[test]
    fn test_exact_match_beats_folded() {
        let record = object(json!({"Name": "Folded", "directorName": "Exact"}));
        assert_eq!(resolve_alias(&record, &NAME), Some(&json!("Exact")));
    }

    #[test]
    fn test_later_key_wins_on_fold_collision() {
        let record = object(json!({"SALARY": 10, "Salary": 20}));
        assert_eq!(resolve_alias(&record, &SALARY), Some(&json!(20)));
    }

    #[test]
    fn test_unresolved_field() {
        let record = object(json!({"unrelated": "x"}));
        assert_eq!(resolve_alias(&record, &TAX_NUMBER), None);
        assert_eq!(resolve_alias(&record, &EMPLOYEE_NUMBER), None);
    }

    #[test]
    fn test_truthiness() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!("")));
        assert!(is_truthy(&json!("0")));
        assert!(is_truthy(&json!([])));
        assert!(is_truthy(&json!(-1)));
    }
}
