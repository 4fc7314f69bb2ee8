//! Raw payload → ranked director dataset.
//!
//! Extraction, normalisation, director filtering and ranking are pure
//! functions; loading and presentation live in `app` and `presentation`.

pub mod extract;
pub mod normalize;
pub mod rank;

use serde_json::Value;
use tracing::{debug, info};

use crate::observability::metrics;
pub use extract::extract_records;
pub use normalize::{normalise, CanonicalRecord};
pub use rank::{rank_by_total, sort_for_display};

/// Normalise every raw record, keep directors, and rank by total benefits.
///
/// Records that are not JSON objects are skipped without aborting the batch.
pub fn hydrate(raw_records: &[Value]) -> Vec<CanonicalRecord> {
    let mut skipped = 0usize;
    let mut normalised = 0usize;

    let mut directors: Vec<CanonicalRecord> = raw_records
        .iter()
        .enumerate()
        .filter_map(|(index, raw)| match normalise(raw) {
            Some(record) => {
                normalised += 1;
                Some(record)
            }
            None => {
                skipped += 1;
                debug!(index, "Skipping raw record that is not an object");
                None
            }
        })
        .filter(CanonicalRecord::is_director)
        .collect();

    rank_by_total(&mut directors);

    metrics::normalise::batch_processed(normalised, skipped, directors.len());
    info!(
        raw = raw_records.len(),
        normalised,
        skipped,
        directors = directors.len(),
        "Hydrated director dataset"
    );

    directors
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_hydrate_filters_and_ranks() {
        let raw = vec![
            json!({"name": "Eng", "role": "Engineer", "salary": 900000}),
            json!(null),
            json!({"name": "Low", "role": "Director", "totalBenefits": 1000}),
            json!("not a record"),
            json!({"name": "High", "role": "Managing Director", "totalBenefits": 5000}),
        ];

        let directors = hydrate(&raw);
        let names: Vec<&str> = directors.iter().map(|d| d.display_name()).collect();
        assert_eq!(names, vec!["High", "Low"]);
    }

    #[test]
    fn test_hydrate_empty_input() {
        assert!(hydrate(&[]).is_empty());
    }
}
