pub mod aliases;
pub mod numeric;
pub mod total;

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use tracing::trace;

use crate::constants::{
    ALLOWANCES_FIELD, DIRECTOR_PLACEHOLDER, DISPLAY_NAME_FIELD, EMPLOYEE_NUMBER_FIELD,
    IS_DIRECTOR_FIELD, MISSING_VALUE, SALARY_FIELD, TAX_NUMBER_FIELD, TOTAL_BENEFITS_FIELD,
};
use aliases::{value_text, FieldAliases, RecordView};
pub use numeric::to_number;
pub use total::{calculate_total_benefits, DerivedTotal, TotalSource};

/// Raw record exactly as received from the upstream API
pub type RawRecord = Map<String, Value>;

/// A raw record resolved into the canonical benefits shape.
///
/// Derived fields are computed once by [`normalise`] (or fixed by the example
/// dataset) and never recomputed. The original raw fields are kept so the
/// board can offer them as dimensions.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalRecord {
    pub(crate) display_name: String,
    pub(crate) is_director: bool,
    pub(crate) role_raw: String,
    pub(crate) salary: Option<f64>,
    pub(crate) allowances: Option<f64>,
    pub(crate) total_benefits: f64,
    pub(crate) tax_number: String,
    pub(crate) employee_number: String,
    pub(crate) raw: RawRecord,
}

impl CanonicalRecord {
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn is_director(&self) -> bool {
        self.is_director
    }

    pub fn role_raw(&self) -> &str {
        &self.role_raw
    }

    /// `None` when no salary figure could be found
    pub fn salary(&self) -> Option<f64> {
        self.salary
    }

    /// `None` when no allowances figure could be found
    pub fn allowances(&self) -> Option<f64> {
        self.allowances
    }

    pub fn total_benefits(&self) -> f64 {
        self.total_benefits
    }

    pub fn tax_number(&self) -> &str {
        &self.tax_number
    }

    pub fn employee_number(&self) -> &str {
        &self.employee_number
    }

    pub fn raw(&self) -> &RawRecord {
        &self.raw
    }

    /// Look up a field of the merged view; derived fields shadow raw ones.
    pub fn field(&self, key: &str) -> Option<Value> {
        self.derived_field(key).or_else(|| self.raw.get(key).cloned())
    }

    fn derived_field(&self, key: &str) -> Option<Value> {
        let value = match key {
            DISPLAY_NAME_FIELD => Value::from(self.display_name.as_str()),
            TAX_NUMBER_FIELD => Value::from(self.tax_number.as_str()),
            EMPLOYEE_NUMBER_FIELD => Value::from(self.employee_number.as_str()),
            SALARY_FIELD => number_or_null(self.salary),
            ALLOWANCES_FIELD => number_or_null(self.allowances),
            TOTAL_BENEFITS_FIELD => Value::from(self.total_benefits),
            IS_DIRECTOR_FIELD => Value::Bool(self.is_director),
            _ => return None,
        };
        Some(value)
    }

    /// Raw fields in payload order followed by the derived fields.
    pub fn fields(&self) -> Map<String, Value> {
        let mut merged = self.raw.clone();
        for key in [
            DISPLAY_NAME_FIELD,
            TAX_NUMBER_FIELD,
            EMPLOYEE_NUMBER_FIELD,
            SALARY_FIELD,
            ALLOWANCES_FIELD,
            TOTAL_BENEFITS_FIELD,
            IS_DIRECTOR_FIELD,
        ] {
            if let Some(value) = self.derived_field(key) {
                merged.insert(key.to_string(), value);
            }
        }
        merged
    }
}

impl Serialize for CanonicalRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.fields().serialize(serializer)
    }
}

fn number_or_null(value: Option<f64>) -> Value {
    value.map(Value::from).unwrap_or(Value::Null)
}

/// Normalise one raw record. Returns `None` only when the value is not a
/// JSON object; every other defect resolves to a documented default.
pub fn normalise(raw: &Value) -> Option<CanonicalRecord> {
    let record = raw.as_object()?;
    let view = RecordView::new(record);

    let role = view.resolve(&aliases::ROLE);
    let role_raw = role.map(value_text).unwrap_or_default();
    let is_director = role
        .and_then(Value::as_str)
        .map(|role| role.to_lowercase().contains("director"))
        .unwrap_or(false);

    let display_name = view
        .resolve(&aliases::NAME)
        .map(value_text)
        .or_else(|| (!role_raw.is_empty()).then(|| role_raw.clone()))
        .unwrap_or_else(|| DIRECTOR_PLACEHOLDER.to_string());

    let salary = view.resolve(&aliases::SALARY).and_then(to_number);
    let allowances = view.resolve(&aliases::ALLOWANCES).and_then(to_number);
    let total = calculate_total_benefits(view.record(), salary, allowances);

    let identifier = |field: &FieldAliases| {
        view.resolve(field)
            .map(value_text)
            .unwrap_or_else(|| MISSING_VALUE.to_string())
    };
    let tax_number = identifier(&aliases::TAX_NUMBER);
    let employee_number = identifier(&aliases::EMPLOYEE_NUMBER);

    trace!(
        display_name = %display_name,
        is_director,
        total_benefits = total.value,
        total_source = ?total.source,
        "normalised record"
    );

    Some(CanonicalRecord {
        display_name,
        is_director,
        role_raw,
        salary,
        allowances,
        total_benefits: total.value,
        tax_number,
        employee_number,
        raw: record.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_non_objects_are_rejected() {
        assert!(normalise(&json!(null)).is_none());
        assert!(normalise(&json!(42)).is_none());
        assert!(normalise(&json!("Director")).is_none());
        assert!(normalise(&json!([{"role": "Director"}])).is_none());
    }

    #[test]
    fn test_missing_fields_resolve_to_defaults() {
        let record = normalise(&json!({})).unwrap();

        assert_eq!(record.display_name(), "Director");
        assert_eq!(record.role_raw(), "");
        assert!(!record.is_director());
        assert_eq!(record.salary(), None);
        assert_eq!(record.allowances(), None);
        assert_eq!(record.total_benefits(), 0.0);
        assert_eq!(record.tax_number(), "–");
        assert_eq!(record.employee_number(), "–");
    }

    #[test]
    fn test_display_name_falls_back_to_role() {
        let record = normalise(&json!({"jobTitle": "Finance Director"})).unwrap();
        assert_eq!(record.display_name(), "Finance Director");
        assert!(record.is_director());
    }

    #[test]
    fn test_director_detection() {
        let senior = normalise(&json!({"role": "Senior Director of Engineering"})).unwrap();
        let lower = normalise(&json!({"position": "director of finance"})).unwrap();
        let engineer = normalise(&json!({"role": "Engineer"})).unwrap();
        let numeric = normalise(&json!({"role": 7})).unwrap();

        assert!(senior.is_director());
        assert!(lower.is_director());
        assert!(!engineer.is_director());
        assert!(!numeric.is_director());
        assert_eq!(numeric.role_raw(), "7");
    }

    #[test]
    fn test_non_directors_keep_derived_figures() {
        let record = normalise(&json!({
            "name": "Sam",
            "role": "Engineer",
            "salary": "£60,000",
            "allowances": 2500
        }))
        .unwrap();

        assert!(!record.is_director());
        assert_eq!(record.salary(), Some(60000.0));
        assert_eq!(record.allowances(), Some(2500.0));
        assert_eq!(record.total_benefits(), 60000.0);
    }

    #[test]
    fn test_identifier_aliases() {
        let record = normalise(&json!({
            "role": "Director",
            "nino": "QQ123456C",
            "payrollNumber": 8821
        }))
        .unwrap();

        assert_eq!(record.tax_number(), "QQ123456C");
        assert_eq!(record.employee_number(), "8821");
    }

    #[test]
    fn test_explicit_total_is_preserved() {
        let record = normalise(&json!({
            "role": "Director",
            "salary": 325000,
            "allowances": 58000,
            "totalBenefits": 412000
        }))
        .unwrap();
        assert_eq!(record.total_benefits(), 412000.0);
    }

    #[test]
    fn test_merged_view_prefers_derived_fields() {
        let record = normalise(&json!({
            "fullName": "Amelia Clarke",
            "role": "Executive Director",
            "salary": "£325,000",
            "taxNumber": ""
        }))
        .unwrap();

        let fields = record.fields();
        let keys: Vec<&str> = fields.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec![
                "fullName",
                "role",
                "salary",
                "taxNumber",
                "displayName",
                "employeeNumber",
                "allowances",
                "totalBenefits",
                "isDirector"
            ]
        );
        assert_eq!(fields["salary"], json!(325000.0));
        assert_eq!(fields["taxNumber"], json!("–"));
        assert_eq!(fields["allowances"], Value::Null);
        assert_eq!(record.field("fullName"), Some(json!("Amelia Clarke")));
        assert_eq!(record.field("isDirector"), Some(json!(true)));
        assert_eq!(record.field("missing"), None);
    }

    #[test]
    fn test_serializes_merged_view() {
        let record = normalise(&json!({"name": "Ana", "role": "Director", "pay": 10})).unwrap();
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["displayName"], json!("Ana"));
        assert_eq!(value["salary"], json!(10.0));
        assert_eq!(value["isDirector"], json!(true));
        assert_eq!(value["pay"], json!(10));
    }
}
