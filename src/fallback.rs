//! Example director dataset shown when live data is unavailable.
//!
//! Entries are already canonical and are used as-is, without passing
//! through the normaliser.

use serde_json::{Map, Value};

use crate::pipeline::CanonicalRecord;

struct ExampleDirector {
    display_name: &'static str,
    role: &'static str,
    salary: f64,
    allowances: f64,
    total_benefits: f64,
    tax_number: &'static str,
    employee_number: &'static str,
    extra: &'static [(&'static str, &'static str)],
}

const EXAMPLE_DIRECTORS: &[ExampleDirector] = &[
    ExampleDirector {
        display_name: "Amelia Clarke",
        role: "Executive Director",
        salary: 325000.0,
        allowances: 58000.0,
        total_benefits: 412000.0,
        tax_number: "TN-102938",
        employee_number: "EMP-8821",
        extra: &[("taxReference", "TN-102938"), ("employeeId", "EMP-8821")],
    },
    ExampleDirector {
        display_name: "Oliver Patel",
        role: "Finance Director",
        salary: 298000.0,
        allowances: 75000.0,
        total_benefits: 395000.0,
        tax_number: "TN-435261",
        employee_number: "EMP-7712",
        extra: &[],
    },
    ExampleDirector {
        display_name: "Sophia Ahmed",
        role: "Operations Director",
        salary: 287000.0,
        allowances: 64000.0,
        total_benefits: 365000.0,
        tax_number: "TN-994311",
        employee_number: "EMP-6631",
        extra: &[],
    },
    ExampleDirector {
        display_name: "Ethan Walker",
        role: "Managing Director",
        salary: 342000.0,
        allowances: 52000.0,
        total_benefits: 362000.0,
        tax_number: "TN-884562",
        employee_number: "EMP-5520",
        extra: &[],
    },
    ExampleDirector {
        display_name: "Charlotte Green",
        role: "Commercial Director",
        salary: 271000.0,
        allowances: 71000.0,
        total_benefits: 349000.0,
        tax_number: "TN-773215",
        employee_number: "EMP-4419",
        extra: &[],
    },
];

impl ExampleDirector {
    fn to_record(&self) -> CanonicalRecord {
        let mut raw = Map::new();
        raw.insert("displayName".into(), Value::from(self.display_name));
        raw.insert("role".into(), Value::from(self.role));
        raw.insert("salary".into(), Value::from(self.salary));
        raw.insert("allowances".into(), Value::from(self.allowances));
        raw.insert("totalBenefits".into(), Value::from(self.total_benefits));
        raw.insert("taxNumber".into(), Value::from(self.tax_number));
        raw.insert("employeeNumber".into(), Value::from(self.employee_number));
        for (key, value) in self.extra {
            raw.insert((*key).into(), Value::from(*value));
        }

        CanonicalRecord {
            display_name: self.display_name.to_string(),
            is_director: true,
            role_raw: self.role.to_string(),
            salary: Some(self.salary),
            allowances: Some(self.allowances),
            total_benefits: self.total_benefits,
            tax_number: self.tax_number.to_string(),
            employee_number: self.employee_number.to_string(),
            raw,
        }
    }
}

/// The fixed example dataset, in descending total-benefits order.
pub fn fallback_directors() -> Vec<CanonicalRecord> {
    EXAMPLE_DIRECTORS.iter().map(ExampleDirector::to_record).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_is_ranked_directors() {
        let directors = fallback_directors();
        assert_eq!(directors.len(), 5);
        assert!(directors.iter().all(CanonicalRecord::is_director));
        assert!(directors
            .windows(2)
            .all(|pair| pair[0].total_benefits() >= pair[1].total_benefits()));
        assert_eq!(directors[0].display_name(), "Amelia Clarke");
    }

    #[test]
    fn test_first_entry_carries_alias_fields() {
        let first = &fallback_directors()[0];
        assert_eq!(first.raw()["taxReference"], Value::from("TN-102938"));
        assert_eq!(first.raw()["employeeId"], Value::from("EMP-8821"));
    }
}
