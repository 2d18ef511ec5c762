pub mod health;
pub mod safety;

use axum::{routing::get, Router};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/suggestions", get(safety::handle_suggestions))
        .route("/analyze", get(safety::handle_analyze))
        .with_state(state)
}
