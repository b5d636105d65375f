use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, info};

use super::filters::FilterCriteria;
use super::request::{PermissiveBuilder, RequestBuilder, SearchRequest};
use crate::error::{OperationError, RequestError};
use crate::models::{ResultRow, SaveResult};
use crate::notify::{Notification, NotificationSink};
use crate::remote::{SaveService, SearchService};

/// What the controller is doing right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Searching,
    Saving,
}

/// Why an operation did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Skipped {
    /// Another operation is in flight.
    Busy,
    /// Search needs a location; save needs results.
    NotReady,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Skipped(Skipped),
    /// Number of rows now displayed.
    Found(usize),
    Failed(OperationError),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    Skipped(Skipped),
    Saved(SaveResult),
    Failed(OperationError),
}

#[derive(Default)]
struct State {
    filters: FilterCriteria,
    phase: Phase,
    rows: Vec<ResultRow>,
}

/// Returns the controller to `Idle` when an operation ends, however it ends.
struct PhaseGuard<'a> {
    state: &'a Mutex<State>,
}

impl Drop for PhaseGuard<'_> {
    fn drop(&mut self) {
        self.state.lock().phase = Phase::Idle;
    }
}

/// Drives search and save against the remote procedures and owns the
/// displayed result set.
///
/// At most one operation runs at a time; a call made while another is in
/// flight returns [`Skipped::Busy`]. Failures never escape: they are turned
/// into notifications and reported through the returned outcome.
pub struct OperationController {
    searcher: Arc<dyn SearchService>,
    saver: Arc<dyn SaveService>,
    notifier: Arc<dyn NotificationSink>,
    builder: Box<dyn RequestBuilder>,
    state: Mutex<State>,
}

impl OperationController {
    pub fn new(
        searcher: Arc<dyn SearchService>,
        saver: Arc<dyn SaveService>,
        notifier: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            searcher,
            saver,
            notifier,
            builder: Box::new(PermissiveBuilder),
            state: Mutex::new(State::default()),
        }
    }

    /// Swap the request builder, e.g. for [`StrictBuilder`](super::StrictBuilder).
    pub fn with_builder(mut self, builder: impl RequestBuilder + 'static) -> Self {
        self.builder = Box::new(builder);
        self
    }

    /// Edit the filters. Allowed while an operation is in flight; the
    /// in-flight request is already built and is not affected.
    pub fn update_filters(&self, edit: impl FnOnce(&mut FilterCriteria)) {
        edit(&mut self.state.lock().filters);
    }

    /// Build a request from the current filters with the configured builder.
    pub fn build_request(&self) -> Result<SearchRequest, RequestError> {
        self.builder.build(&self.state.lock().filters)
    }

    pub fn filters(&self) -> FilterCriteria {
        self.state.lock().filters.clone()
    }

    pub fn rows(&self) -> Vec<ResultRow> {
        self.state.lock().rows.clone()
    }

    pub fn phase(&self) -> Phase {
        self.state.lock().phase
    }

    pub fn is_busy(&self) -> bool {
        self.phase() != Phase::Idle
    }

    pub fn can_search(&self) -> bool {
        self.state.lock().filters.can_search()
    }

    pub fn has_results(&self) -> bool {
        !self.state.lock().rows.is_empty()
    }

    pub fn can_save(&self) -> bool {
        self.has_results()
    }

    pub fn show_empty_state(&self) -> bool {
        let state = self.state.lock();
        state.phase == Phase::Idle && state.rows.is_empty()
    }

    /// Run a search with the current filters and replace the result set.
    pub async fn search(&self) -> SearchOutcome {
        let built = {
            let mut state = self.state.lock();
            if state.phase != Phase::Idle {
                debug!("Search ignored: {:?} in progress", state.phase);
                return SearchOutcome::Skipped(Skipped::Busy);
            }
            if !state.filters.can_search() {
                debug!("Search ignored: no city/state or zip");
                return SearchOutcome::Skipped(Skipped::NotReady);
            }
            let built = self.builder.build(&state.filters);
            state.phase = Phase::Searching;
            built
        };
        let _guard = PhaseGuard { state: &self.state };

        let result = match built {
            Ok(request) => {
                info!("Searching via {} backend", self.searcher.backend_name());
                self.searcher
                    .search(&request)
                    .await
                    .map_err(|e| e.user_message().to_string())
            }
            Err(e) => Err(e.to_string()),
        };

        match result {
            Ok(response) => {
                let rows = response.into_rows();
                let count = rows.len();
                self.state.lock().rows = rows;
                info!("Search found {} properties", count);
                SearchOutcome::Found(count)
            }
            Err(message) => {
                self.state.lock().rows.clear();
                SearchOutcome::Failed(self.report(OperationError::SearchFailed(message)))
            }
        }
    }

    /// Persist the current result set together with a request rebuilt from
    /// the filters as they are now, which may differ from the filters that
    /// produced the rows.
    pub async fn save(&self) -> SaveOutcome {
        let (built, rows) = {
            let mut state = self.state.lock();
            if state.phase != Phase::Idle {
                debug!("Save ignored: {:?} in progress", state.phase);
                return SaveOutcome::Skipped(Skipped::Busy);
            }
            if state.rows.is_empty() {
                debug!("Save ignored: no results");
                return SaveOutcome::Skipped(Skipped::NotReady);
            }
            let built = self.builder.build(&state.filters);
            state.phase = Phase::Saving;
            (built, state.rows.clone())
        };
        let _guard = PhaseGuard { state: &self.state };

        let result = match built {
            Ok(request) => {
                info!("Saving {} properties", rows.len());
                self.saver
                    .save_results(&request, &rows)
                    .await
                    .map_err(|e| e.user_message().to_string())
            }
            Err(e) => Err(e.to_string()),
        };

        match result {
            Ok(saved) => {
                self.notifier.notify(Notification::saved(&saved));
                SaveOutcome::Saved(saved)
            }
            Err(message) => SaveOutcome::Failed(self.report(OperationError::SaveFailed(message))),
        }
    }

    fn report(&self, err: OperationError) -> OperationError {
        self.notifier.notify(Notification::failure(&err));
        err
    }
}
