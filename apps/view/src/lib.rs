//! SafetyView: the destination search client.
//!
//! Typing feeds a 300 ms debouncer that fetches autocomplete suggestions;
//! choosing a suggestion runs a safety analysis for the selected time band.
//! All state lives in one `ViewState`; `presenter::render` draws it.

pub mod api;
pub mod debounce;
pub mod model;
pub mod presenter;
pub mod view;

pub use api::{Backend, HttpBackend, API_BASE};
pub use model::{AnalysisResult, Suggestion, TimeBand};
pub use view::{SafetyView, ViewState};
