use feruca::Collator;
use serde_json::Value;
use std::cmp::Ordering;

use super::normalize::{to_number, CanonicalRecord};
use crate::presentation::format::format_value;

/// Order records by total benefits, largest first. Ties keep input order.
pub fn rank_by_total(records: &mut [CanonicalRecord]) {
    records.sort_by(|a, b| b.total_benefits().total_cmp(&a.total_benefits()));
}

/// Sort key for a user-selected field.
///
/// Numeric values sort descending and ahead of text; text sorts ascending,
/// case-insensitively, on its displayed form using Unicode collation.
#[derive(Debug, Clone, PartialEq)]
enum SortKey {
    Number(f64),
    Text(String),
}

impl SortKey {
    fn of(value: Option<&Value>) -> Self {
        match value.and_then(to_number) {
            Some(number) => SortKey::Number(number),
            None => {
                let shown = value.map(format_value).unwrap_or_else(|| format_value(&Value::Null));
                SortKey::Text(shown.to_lowercase())
            }
        }
    }

    fn compare(&self, other: &Self, collator: &mut Collator) -> Ordering {
        match (self, other) {
            (SortKey::Number(a), SortKey::Number(b)) => b.total_cmp(a),
            (SortKey::Number(_), SortKey::Text(_)) => Ordering::Less,
            (SortKey::Text(_), SortKey::Number(_)) => Ordering::Greater,
            (SortKey::Text(a), SortKey::Text(b)) => collator.collate(a, b),
        }
    }
}

/// Stable re-sort of the dataset by any field of the merged record view.
pub fn sort_for_display<'a>(records: &'a [CanonicalRecord], field: &str) -> Vec<&'a CanonicalRecord> {
    let mut keyed: Vec<(SortKey, &CanonicalRecord)> = records
        .iter()
        .map(|record| (SortKey::of(record.field(field).as_ref()), record))
        .collect();
    // CLDR root collation
    let mut collator = Collator::default();
    keyed.sort_by(|(a, _), (b, _)| a.compare(b, &mut collator));
    keyed.into_iter().map(|(_, record)| record).collect()
}
