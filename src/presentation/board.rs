use tracing::{info, warn};

use super::controls::Controls;
use super::table::{render_rows, RenderedTable};
use crate::app::{load_dataset, BenefitsSource, LoadOrigin, LoadOutcome, LoadStatus};
use crate::constants::TOP_LIMIT;
use crate::observability::metrics;
use crate::pipeline::CanonicalRecord;

/// Presentation state: the current director dataset, the control
/// selections and the status banner.
///
/// Every load replaces the dataset wholesale; nothing is patched in place.
#[derive(Debug, Clone)]
pub struct DirectorBoard {
    directors: Vec<CanonicalRecord>,
    controls: Controls,
    status: LoadStatus,
    origin: Option<LoadOrigin>,
    loading: bool,
    top_limit: usize,
}

impl Default for DirectorBoard {
    fn default() -> Self {
        Self::new(TOP_LIMIT)
    }
}

impl DirectorBoard {
    pub fn new(top_limit: usize) -> Self {
        Self {
            directors: Vec::new(),
            controls: Controls::default(),
            status: LoadStatus::loading(false),
            origin: None,
            loading: false,
            top_limit,
        }
    }

    pub fn directors(&self) -> &[CanonicalRecord] {
        &self.directors
    }

    pub fn controls(&self) -> &Controls {
        &self.controls
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    /// `None` until the first load completes
    pub fn origin(&self) -> Option<LoadOrigin> {
        self.origin
    }

    /// While true the refresh control is disabled
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Enter the loading state. Returns false, changing nothing, when a load
    /// is already in flight.
    pub fn begin_loading(&mut self, force_refresh: bool) -> bool {
        if self.loading {
            metrics::load::refused();
            warn!("Load requested while another load is in flight");
            return false;
        }
        self.loading = true;
        self.status = LoadStatus::loading(force_refresh);
        true
    }

    /// Replace the dataset with a completed load and rebuild the controls.
    pub fn apply_load(&mut self, outcome: LoadOutcome) {
        self.directors = outcome.directors;
        self.status = outcome.status;
        self.origin = Some(outcome.origin);
        self.loading = false;
        self.controls.populate(&self.directors);
        info!(
            origin = ?outcome.origin,
            directors = self.directors.len(),
            "Director board updated"
        );
    }

    /// Fetch-or-fallback and reassign the dataset. Returns `None` when a load
    /// was already in flight.
    pub async fn load_data(
        &mut self,
        source: &dyn BenefitsSource,
        force_refresh: bool,
    ) -> Option<LoadOrigin> {
        if !self.begin_loading(force_refresh) {
            return None;
        }
        let outcome = load_dataset(source).await;
        let origin = outcome.origin;
        self.apply_load(outcome);
        Some(origin)
    }

    pub fn select_dimension(&mut self, key: &str) -> bool {
        self.controls.select_dimension(key)
    }

    pub fn select_sort(&mut self, key: &str) -> bool {
        self.controls.select_sort(key)
    }

    /// Rows for the current selections, top entries only.
    pub fn render_table(&self) -> RenderedTable {
        if self.directors.is_empty() {
            return RenderedTable {
                dimension_label: self.controls.dimension_label(),
                rows: Vec::new(),
            };
        }

        RenderedTable {
            dimension_label: self.controls.dimension_label(),
            rows: render_rows(
                &self.directors,
                self.controls.dimension(),
                self.controls.sort_field(),
                self.top_limit,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{BenefitsError, Result};
    use crate::fallback::fallback_directors;
    use async_trait::async_trait;
    use serde_json::{json, Value};

    struct FailingSource;

    #[async_trait]
    impl BenefitsSource for FailingSource {
        fn endpoint(&self) -> &str {
            "failing"
        }

        async fn fetch_payload(&self) -> Result<Value> {
            Err(BenefitsError::Api { status: 500 })
        }
    }

    struct ManySource(usize);

    #[async_trait]
    impl BenefitsSource for ManySource {
        fn endpoint(&self) -> &str {
            "many"
        }

        async fn fetch_payload(&self) -> Result<Value> {
            let items: Vec<Value> = (0..self.0)
                .map(|i| json!({"name": format!("D{i}"), "role": "Director", "totalBenefits": i + 1}))
                .collect();
            Ok(json!({ "items": items }))
        }
    }

    #[tokio::test]
    async fn test_failed_load_shows_fallback() {
        let mut board = DirectorBoard::default();
        let origin = board.load_data(&FailingSource, false).await;

        assert_eq!(origin, Some(LoadOrigin::Fallback));
        assert_eq!(board.directors(), fallback_directors().as_slice());
        assert!(board.status().is_error);
        assert!(!board.is_loading());
        assert_eq!(board.render_table().rows.len(), 5);
    }

    #[tokio::test]
    async fn test_only_top_limit_rows_render() {
        let mut board = DirectorBoard::default();
        board.load_data(&ManySource(60), true).await;

        let table = board.render_table();
        assert_eq!(board.directors().len(), 60);
        assert_eq!(table.rows.len(), 50);
        assert_eq!(table.rows[0].dimension, "D59");
        assert_eq!(board.origin(), Some(LoadOrigin::Live));
    }

    #[tokio::test]
    async fn test_second_load_refused_while_loading() {
        let mut board = DirectorBoard::default();
        assert!(board.begin_loading(false));
        assert!(board.is_loading());

        assert_eq!(board.load_data(&FailingSource, true).await, None);
        assert!(board.directors().is_empty());
        assert_eq!(board.status().message, "Loading data from HMRC...");
    }

    #[tokio::test]
    async fn test_reload_replaces_dataset() {
        let mut board = DirectorBoard::default();
        board.load_data(&ManySource(3), false).await;
        // "D0".."D2" coerce to numbers, so the raw name is a sort field
        assert!(board.select_sort("name"));

        board.load_data(&FailingSource, true).await;
        assert_eq!(board.directors().len(), 5);
        assert_eq!(board.controls().sort_field(), "totalBenefits");
    }

    #[test]
    fn test_empty_board_renders_nothing() {
        let board = DirectorBoard::default();
        let table = board.render_table();
        assert!(table.rows.is_empty());
        assert_eq!(table.dimension_label, "Director");
    }
}
