use std::sync::Arc;

use crate::places::PlacesProvider;
use crate::scoring::ScoringWeights;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Google Places in production; swapped for a fake in route tests.
    pub places: Arc<dyn PlacesProvider>,
    pub weights: ScoringWeights,
}
