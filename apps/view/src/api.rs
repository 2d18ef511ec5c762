//! Backend client. Every network call the view makes goes through `Backend`.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use crate::model::{AnalysisResult, Suggestion, TimeBand};

/// Base URL of the SafetyWise backend. Fixed; not configurable at runtime.
pub const API_BASE: &str = "http://localhost:8000";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Backend returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

#[async_trait]
pub trait Backend: Send + Sync {
    /// GET /suggestions?query=
    async fn suggestions(&self, query: &str) -> Result<Vec<Suggestion>, ApiError>;

    /// GET /analyze?place_id=&time=
    async fn analyze(&self, place_id: &str, time: TimeBand) -> Result<AnalysisResult, ApiError>;
}

/// reqwest-backed `Backend` against `API_BASE`. No timeout is configured.
#[derive(Clone, Default)]
pub struct HttpBackend {
    client: Client,
}

impl HttpBackend {
    pub fn new() -> Self {
        Self::default()
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let url = format!("{API_BASE}{path}");
        debug!("GET {url} {params:?}");

        let response = self.client.get(&url).query(params).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn suggestions(&self, query: &str) -> Result<Vec<Suggestion>, ApiError> {
        self.get_json("/suggestions", &[("query", query)]).await
    }

    async fn analyze(&self, place_id: &str, time: TimeBand) -> Result<AnalysisResult, ApiError> {
        self.get_json("/analyze", &[("place_id", place_id), ("time", time.label())])
            .await
    }
}
