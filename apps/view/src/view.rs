//! SafetyView: owns the UI state and orchestrates the two backend calls.
//!
//! State lives in a `watch` channel so any number of renderers can follow it.
//! Requests are never cancelled and carry no request id: when two calls of
//! the same kind overlap, whichever resolves last overwrites the state.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error};

use crate::api::Backend;
use crate::debounce::Debouncer;
use crate::model::{AnalysisResult, Suggestion, TimeBand};

/// Queries must be longer than this (in characters) to be looked up.
pub const MIN_QUERY_CHARS: usize = 2;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub query: String,
    pub suggestions: Vec<Suggestion>,
    pub result: Option<AnalysisResult>,
    pub loading: bool,
    pub time: TimeBand,
}

#[derive(Clone)]
pub struct SafetyView {
    backend: Arc<dyn Backend>,
    state: Arc<watch::Sender<ViewState>>,
    debouncer: Debouncer,
}

impl SafetyView {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self::with_debouncer(backend, Debouncer::default())
    }

    pub fn with_debouncer(backend: Arc<dyn Backend>, debouncer: Debouncer) -> Self {
        let (state, _) = watch::channel(ViewState::default());
        Self {
            backend,
            state: Arc::new(state),
            debouncer,
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> ViewState {
        self.state.borrow().clone()
    }

    /// Receiver notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.state.subscribe()
    }

    /// Replaces the query and schedules a debounced suggestions refresh.
    ///
    /// The handle resolves once the debounce timer has elapsed and, if this
    /// query was still the latest, its refresh has finished. Dropping it
    /// does not cancel anything. Setting the query it already holds is not a
    /// change: nothing is scheduled and the handle completes immediately.
    pub fn set_query(&self, query: impl Into<String>) -> JoinHandle<()> {
        let query = query.into();
        let changed = self.state.send_if_modified(|s| {
            if s.query == query {
                return false;
            }
            s.query.clone_from(&query);
            true
        });
        if !changed {
            return tokio::spawn(std::future::ready(()));
        }

        let view = self.clone();
        self.debouncer
            .trigger(move || async move { view.refresh_suggestions(query).await })
    }

    pub fn set_time_band(&self, time: TimeBand) {
        self.state.send_modify(|s| s.time = time);
    }

    /// Chooses a suggestion: the query takes its description and the place
    /// is analyzed for the current time band.
    pub async fn select_suggestion(&self, suggestion: &Suggestion) {
        // The refresh this schedules is left to run on its own.
        drop(self.set_query(suggestion.description.clone()));
        self.analyze(&suggestion.place_id).await;
    }

    /// Runs one analysis. `loading` is raised and the dropdown cleared before
    /// the request goes out; `loading` drops once it resolves either way.
    /// A failed call is logged and leaves the previous result in place.
    pub async fn analyze(&self, place_id: &str) {
        let mut time = TimeBand::default();
        self.state.send_modify(|s| {
            s.loading = true;
            s.suggestions.clear();
            time = s.time;
        });

        let outcome = match self.backend.analyze(place_id, time).await {
            Ok(result) => {
                debug!("Analysis for {place_id}: {} {}", result.score, result.level);
                Some(result)
            }
            Err(e) => {
                error!("Failed to analyze {place_id}: {e}");
                None
            }
        };

        self.state.send_modify(|s| {
            if let Some(result) = outcome {
                s.result = Some(result);
            }
            s.loading = false;
        });
    }

    async fn refresh_suggestions(&self, query: String) {
        if query.chars().count() <= MIN_QUERY_CHARS {
            self.state.send_modify(|s| s.suggestions.clear());
            return;
        }

        match self.backend.suggestions(&query).await {
            Ok(suggestions) => {
                debug!("{} suggestions for {query:?}", suggestions.len());
                self.state.send_modify(|s| s.suggestions = suggestions);
            }
            Err(e) => error!("Failed to fetch suggestions for {query:?}: {e}"),
        }
    }
}
