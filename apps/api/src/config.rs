use anyhow::{Context, Result};

const DEFAULT_PLACES_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place";

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub google_api_key: String,
    pub places_base_url: String,
    /// Nearby search radius in metres. Also the denominator of activity density.
    pub nearby_radius_m: u32,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let nearby_radius_m = std::env::var("NEARBY_RADIUS_M")
            .unwrap_or_else(|_| "1000".to_string())
            .parse::<u32>()
            .context("NEARBY_RADIUS_M must be a positive integer")?;
        anyhow::ensure!(nearby_radius_m > 0, "NEARBY_RADIUS_M must be greater than zero");

        Ok(Config {
            google_api_key: require_env("GOOGLE_API_KEY")?,
            places_base_url: std::env::var("PLACES_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_PLACES_BASE_URL.to_string()),
            nearby_radius_m,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
