use chrono::{DateTime, Local};
use serde::Serialize;
use std::time::Instant;
use tracing::{error, info, instrument};

use crate::app::ports::BenefitsSource;
use crate::constants::{live_status, STATUS_FALLBACK, STATUS_LOADING, STATUS_REFRESHING};
use crate::error::{BenefitsError, Result};
use crate::fallback::fallback_directors;
use crate::observability::metrics;
use crate::pipeline::{extract_records, hydrate, CanonicalRecord};

/// Where the current dataset came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadOrigin {
    Live,
    Fallback,
}

/// The status banner shown alongside the table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadStatus {
    pub message: String,
    pub is_error: bool,
}

impl LoadStatus {
    pub fn loading(force_refresh: bool) -> Self {
        let message = if force_refresh { STATUS_REFRESHING } else { STATUS_LOADING };
        Self {
            message: message.to_string(),
            is_error: false,
        }
    }

    pub fn live(fetched_at: DateTime<Local>) -> Self {
        Self {
            message: live_status(&fetched_at.format("%H:%M:%S").to_string()),
            is_error: false,
        }
    }

    pub fn fallback() -> Self {
        Self {
            message: STATUS_FALLBACK.to_string(),
            is_error: true,
        }
    }
}

/// Result of one fetch-or-fallback cycle
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub directors: Vec<CanonicalRecord>,
    pub origin: LoadOrigin,
    pub status: LoadStatus,
}

/// Fetch live data once; on any failure substitute the example dataset.
///
/// Never fails: every error is contained here and reported through the
/// returned status.
#[instrument(skip(source), fields(endpoint = %source.endpoint()))]
pub async fn load_dataset(source: &dyn BenefitsSource) -> LoadOutcome {
    match fetch_live(source).await {
        Ok(directors) => {
            metrics::load::live();
            info!(directors = directors.len(), "Loaded live benefits data");
            LoadOutcome {
                directors,
                origin: LoadOrigin::Live,
                status: LoadStatus::live(Local::now()),
            }
        }
        Err(e) => {
            metrics::load::fallback(failure_reason(&e));
            error!(error = %e, "Unable to fetch live benefits data, using example dataset");
            LoadOutcome {
                directors: fallback_directors(),
                origin: LoadOrigin::Fallback,
                status: LoadStatus::fallback(),
            }
        }
    }
}

async fn fetch_live(source: &dyn BenefitsSource) -> Result<Vec<CanonicalRecord>> {
    let started = Instant::now();
    let payload = source.fetch_payload().await;
    metrics::load::fetch_duration(started.elapsed().as_secs_f64());

    let records = extract_records(&payload?);
    if records.is_empty() {
        return Err(BenefitsError::NoUsableRecords);
    }

    Ok(hydrate(&records))
}

fn failure_reason(error: &BenefitsError) -> &'static str {
    match error {
        BenefitsError::Api { .. } => "http_status",
        BenefitsError::Http(_) => "transport",
        BenefitsError::Json(_) => "invalid_json",
        BenefitsError::NoUsableRecords => "no_records",
        _ => "other",
    }
}
