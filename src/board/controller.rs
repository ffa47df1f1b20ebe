use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use super::classify::classify;
use super::filter::{self, BoardView};
use super::normalize::normalize;
use super::reorder::{self, DragEnd};
use super::source::{FetchError, RecordSource};
use super::{BoardState, RawRecord};

/// Identifies one load request. Only the most recent ticket may apply its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// What happened to a settled load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded { items: usize },
    Failed { message: String },
    /// Superseded by a newer load, or the session had already closed.
    Discarded,
}

/// Owns the canonical board for one session and everything derived from it.
#[derive(Debug, Default)]
pub struct BoardController {
    state: BoardState,
    query: String,
    error: Option<String>,
    generation: u64,
    closed: bool,
    loaded_at: Option<DateTime<Utc>>,
}

impl BoardController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &BoardState {
        &self.state
    }

    /// The last fetch failure, cleared by the next successful load.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.loaded_at
    }

    /// The query-filtered view. Computed fresh on each call.
    pub fn view(&self) -> BoardView<'_> {
        filter::project(&self.state, &self.query)
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Start a load. Any ticket issued earlier becomes stale.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        LoadTicket(self.generation)
    }

    /// Apply a settled fetch if `ticket` is still current and the session is open.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<RawRecord>, FetchError>,
    ) -> LoadOutcome {
        if self.closed || ticket.0 != self.generation {
            debug!(ticket = ticket.0, current = self.generation, closed = self.closed, "discarding stale load");
            return LoadOutcome::Discarded;
        }
        match result {
            Ok(records) => {
                self.state = classify(normalize(records));
                self.error = None;
                self.loaded_at = Some(Utc::now());
                let items = self.state.len();
                info!(items, "board loaded");
                LoadOutcome::Loaded { items }
            }
            Err(err) => {
                let message = err.to_string();
                warn!(error = %message, transport = err.is_transport(), "board load failed");
                self.error = Some(message.clone());
                LoadOutcome::Failed { message }
            }
        }
    }

    /// Fetch from `source` and apply the result.
    pub async fn load<S>(&mut self, source: &S) -> LoadOutcome
    where
        S: RecordSource + ?Sized,
    {
        let ticket = self.begin_load();
        let result = source.fetch().await;
        self.finish_load(ticket, result)
    }

    /// Apply a drop. Returns whether the board changed.
    pub fn drag_end(&mut self, drag: &DragEnd) -> bool {
        let (state, outcome) = reorder::reorder(std::mem::take(&mut self.state), drag);
        self.state = state;
        match outcome {
            Ok(mv) => {
                debug!(column = %mv.column, from = mv.from, to = mv.to, "reordered");
                true
            }
            Err(reason) => {
                debug!(%reason, ?drag, "drop ignored");
                false
            }
        }
    }

    /// End the session. Loads that settle afterwards are discarded.
    pub fn close(&mut self) {
        self.closed = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::source::fake::FakeSource;
    use crate::board::ColumnName;

    fn record(title: &str, status: Option<&str>) -> RawRecord {
        RawRecord {
            title: title.into(),
            status: status.map(Into::into),
            developer: Some("Al".into()),
            kind: None,
        }
    }

    fn done_xyz() -> Vec<RawRecord> {
        vec![
            record("X", Some("Done")),
            record("Y", Some("Done")),
            record("Z", Some("Done")),
            record("P", Some("Stuck")),
        ]
    }

    fn done_titles(controller: &BoardController) -> Vec<String> {
        controller
            .state()
            .column(ColumnName::Done)
            .items
            .iter()
            .map(|i| i.title.clone())
            .collect()
    }

    #[test]
    fn starts_with_six_empty_columns_and_no_error() {
        let controller = BoardController::new();
        assert_eq!(controller.state(), &BoardState::empty());
        assert_eq!(controller.view().columns().len(), 6);
        assert!(controller.error().is_none());
        assert!(controller.loaded_at().is_none());
    }

    #[tokio::test]
    async fn successful_load_replaces_state() {
        let mut controller = BoardController::new();
        let outcome = controller.load(&FakeSource::ok(done_xyz())).await;
        assert_eq!(outcome, LoadOutcome::Loaded { items: 4 });
        assert_eq!(done_titles(&controller), ["X", "Y", "Z"]);
        assert!(controller.loaded_at().is_some());
    }

    #[tokio::test]
    async fn failed_load_sets_error_and_keeps_empty_board() {
        let mut controller = BoardController::new();
        let outcome = controller.load(&FakeSource::failing()).await;
        assert!(matches!(outcome, LoadOutcome::Failed { .. }));
        assert_eq!(controller.error(), Some("invalid response format"));
        assert_eq!(controller.state(), &BoardState::empty());
    }

    #[tokio::test]
    async fn reload_clears_error_and_discards_previous_order() {
        let source = FakeSource::new(vec![Err(FetchError::Shape), Ok(done_xyz()), Ok(done_xyz())]);
        let mut controller = BoardController::new();

        controller.load(&source).await;
        assert!(controller.error().is_some());

        controller.load(&source).await;
        assert!(controller.error().is_none());
        assert!(controller.drag_end(&DragEnd::new("Z-2", "X-0")));
        assert_eq!(done_titles(&controller), ["Z", "X", "Y"]);

        controller.load(&source).await;
        assert_eq!(done_titles(&controller), ["X", "Y", "Z"]);
    }

    #[tokio::test]
    async fn failed_reload_keeps_loaded_board() {
        let source = FakeSource::new(vec![Ok(done_xyz()), Err(FetchError::Status(502))]);
        let mut controller = BoardController::new();
        controller.load(&source).await;
        controller.load(&source).await;
        assert_eq!(controller.error(), Some("server returned HTTP 502"));
        assert_eq!(done_titles(&controller), ["X", "Y", "Z"]);
    }

    #[test]
    fn drag_end_reorders_within_column() {
        let mut controller = BoardController::new();
        let ticket = controller.begin_load();
        controller.finish_load(ticket, Ok(done_xyz()));

        assert!(controller.drag_end(&DragEnd::new("Z-2", "X-0")));
        assert_eq!(done_titles(&controller), ["Z", "X", "Y"]);
    }

    #[test]
    fn drag_end_noops_leave_state_unchanged() {
        let mut controller = BoardController::new();
        let ticket = controller.begin_load();
        controller.finish_load(ticket, Ok(done_xyz()));
        let before = controller.state().clone();

        assert!(!controller.drag_end(&DragEnd::new("X-0", "X-0")));
        assert!(!controller.drag_end(&DragEnd::new("X-0", "P-3")));
        assert!(!controller.drag_end(&DragEnd::new("ghost", "X-0")));
        assert!(!controller.drag_end(&DragEnd::default()));
        assert_eq!(controller.state(), &before);
    }

    #[test]
    fn query_filters_view_without_touching_state() {
        let mut controller = BoardController::new();
        let ticket = controller.begin_load();
        controller.finish_load(ticket, Ok(done_xyz()));
        let before = controller.state().clone();

        controller.set_query("zzz");
        assert!(controller.view().is_empty());
        assert_eq!(controller.state(), &before);

        controller.set_query("y");
        assert_eq!(controller.view().column(ColumnName::Done).count(), 1);

        controller.set_query("");
        assert_eq!(controller.view().len(), before.len());
    }

    #[test]
    fn drag_in_filtered_view_acts_on_canonical_order() {
        let mut controller = BoardController::new();
        let ticket = controller.begin_load();
        controller.finish_load(ticket, Ok(done_xyz()));
        controller.set_query("x");

        // Only X is visible; dropping Z (hidden) over X still moves canonically.
        assert!(controller.drag_end(&DragEnd::new("Z-2", "X-0")));
        controller.set_query("");
        assert_eq!(done_titles(&controller), ["Z", "X", "Y"]);
    }

    #[test]
    fn stale_ticket_is_discarded() {
        let mut controller = BoardController::new();
        let first = controller.begin_load();
        let second = controller.begin_load();

        assert_eq!(controller.finish_load(first, Ok(done_xyz())), LoadOutcome::Discarded);
        assert!(controller.state().is_empty());

        assert_eq!(
            controller.finish_load(second, Ok(vec![record("Only", None)])),
            LoadOutcome::Loaded { items: 1 }
        );
        assert_eq!(
            controller.state().column(ColumnName::ReadyToStart).items[0].id,
            "Only-0"
        );
    }

    #[test]
    fn stale_failure_does_not_set_error() {
        let mut controller = BoardController::new();
        let first = controller.begin_load();
        let _second = controller.begin_load();
        controller.finish_load(first, Err(FetchError::Shape));
        assert!(controller.error().is_none());
    }

    #[test]
    fn result_after_close_is_discarded() {
        let mut controller = BoardController::new();
        let ticket = controller.begin_load();
        controller.close();
        assert_eq!(controller.finish_load(ticket, Ok(done_xyz())), LoadOutcome::Discarded);
        assert!(controller.state().is_empty());
        assert!(controller.error().is_none());
    }
}
