//! Axum route handlers for destination lookup and safety analysis.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::places::Suggestion;
use crate::scoring::{calculate_safety, SafetyReport, TimeBand};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SuggestionsQuery {
    pub query: String,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeQuery {
    pub place_id: String,
    pub time: String,
}

/// GET /suggestions?query=
///
/// Autocomplete candidates for the typed destination.
pub async fn handle_suggestions(
    State(state): State<AppState>,
    Query(params): Query<SuggestionsQuery>,
) -> Result<Json<Vec<Suggestion>>, AppError> {
    if params.query.trim().is_empty() {
        return Ok(Json(Vec::new()));
    }

    let query = params.query.as_str();
    let suggestions = state.places.suggestions(query).await?;
    debug!("{} suggestions for {query:?}", suggestions.len());
    Ok(Json(suggestions))
}

/// GET /analyze?place_id=&time=
///
/// Resolves the place, samples its surroundings and scores them for the
/// requested time band.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Query(params): Query<AnalyzeQuery>,
) -> Result<Json<SafetyReport>, AppError> {
    if params.place_id.trim().is_empty() {
        return Err(AppError::Validation("place_id cannot be empty".to_string()));
    }

    let time = TimeBand::from_label(&params.time);
    if time.is_none() {
        debug!("Unrecognised time band {:?}; scoring without adjustment", params.time);
    }

    let metrics = state
        .places
        .place_metrics(&params.place_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No data for place {}", params.place_id)))?;

    let report = calculate_safety(&metrics, time, &state.weights);
    info!(
        "Analyzed {} at {:?}: score={} level={:?}",
        params.place_id, params.time, report.score, report.level
    );

    Ok(Json(report))
}
