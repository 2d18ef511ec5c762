mod config;
mod errors;
mod places;
mod routes;
mod scoring;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::places::GooglePlacesClient;
use crate::routes::build_router;
use crate::scoring::ScoringWeights;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting SafetyWise API v{}", env!("CARGO_PKG_VERSION"));

    let places = GooglePlacesClient::new(
        config.places_base_url.clone(),
        config.google_api_key.clone(),
        config.nearby_radius_m,
    )?;
    info!(
        "Places client initialized ({}, radius {}m)",
        config.places_base_url, config.nearby_radius_m
    );

    let state = AppState {
        places: Arc::new(places),
        weights: ScoringWeights::default(),
    };

    // The browser client is served from another origin
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
