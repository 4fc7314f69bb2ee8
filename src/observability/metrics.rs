//! Metrics for load and normalisation phases
//!
//! Recording goes through the `metrics` facade; with no recorder installed
//! the calls are no-ops, so library users and tests pay nothing. `serve`
//! installs a Prometheus recorder via [`init`].

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::fmt;

use crate::error::{BenefitsError, Result};

/// Enum representing all metric names used in the system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricName {
    // Load metrics
    LoadLive,
    LoadFallback,
    LoadRefused,
    FetchDuration,

    // Normalise metrics
    NormaliseRecords,
    NormaliseSkipped,
    NormaliseDirectors,
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl MetricName {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricName::LoadLive => "benefits_load_live_total",
            MetricName::LoadFallback => "benefits_load_fallback_total",
            MetricName::LoadRefused => "benefits_load_refused_total",
            MetricName::FetchDuration => "benefits_fetch_duration_seconds",
            MetricName::NormaliseRecords => "benefits_normalise_records_total",
            MetricName::NormaliseSkipped => "benefits_normalise_skipped_total",
            MetricName::NormaliseDirectors => "benefits_normalise_directors_total",
        }
    }
}

/// Install the Prometheus recorder and return a handle for rendering.
pub fn init() -> Result<PrometheusHandle> {
    PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| BenefitsError::Server(format!("Failed to install metrics recorder: {e}")))
}

pub mod load {
    use super::MetricName;

    pub fn live() {
        ::metrics::counter!(MetricName::LoadLive.as_str()).increment(1);
    }

    /// A fallback load, labelled with the failure kind that caused it
    pub fn fallback(reason: &'static str) {
        ::metrics::counter!(MetricName::LoadFallback.as_str(), "reason" => reason).increment(1);
    }

    /// A refresh rejected because another load was in flight
    pub fn refused() {
        ::metrics::counter!(MetricName::LoadRefused.as_str()).increment(1);
    }

    pub fn fetch_duration(secs: f64) {
        ::metrics::histogram!(MetricName::FetchDuration.as_str()).record(secs);
    }
}

pub mod normalise {
    use super::MetricName;

    pub fn batch_processed(normalised: usize, skipped: usize, directors: usize) {
        ::metrics::counter!(MetricName::NormaliseRecords.as_str()).increment(normalised as u64);
        ::metrics::counter!(MetricName::NormaliseSkipped.as_str()).increment(skipped as u64);
        ::metrics::counter!(MetricName::NormaliseDirectors.as_str()).increment(directors as u64);
    }
}
