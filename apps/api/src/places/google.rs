//! Google Places web service client (autocomplete, details, nearby search).

use async_trait::async_trait;
use futures::future::try_join_all;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize};
use tracing::{debug, warn};

use super::{
    NearbyPlace, PlaceKind, PlaceMetrics, PlacesError, PlacesProvider, Suggestion,
};

const STATUS_OK: &str = "OK";

#[derive(Debug, Deserialize)]
struct AutocompleteResponse {
    status: String,
    #[serde(default)]
    predictions: Vec<Prediction>,
}

#[derive(Debug, Deserialize)]
struct Prediction {
    description: String,
    place_id: String,
}

#[derive(Debug, Deserialize)]
struct DetailsResponse {
    status: String,
    result: Option<DetailsResult>,
}

#[derive(Debug, Deserialize)]
struct DetailsResult {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Debug, Clone, Copy, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

#[derive(Debug, Deserialize)]
struct NearbyResponse {
    status: String,
    #[serde(default)]
    results: Vec<NearbyPlace>,
}

#[derive(Clone)]
pub struct GooglePlacesClient {
    client: Client,
    base_url: String,
    api_key: String,
    radius_m: u32,
}

impl GooglePlacesClient {
    pub fn new(base_url: String, api_key: String, radius_m: u32) -> Result<Self, PlacesError> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(15))
                .build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            radius_m,
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<T, PlacesError> {
        let response = self
            .client
            .get(format!("{}/{endpoint}/json", self.base_url))
            .query(params)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(PlacesError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }

    async fn coordinates(&self, place_id: &str) -> Result<Option<LatLng>, PlacesError> {
        let details: DetailsResponse = self
            .get_json("details", &[("place_id", place_id), ("fields", "geometry")])
            .await?;

        if details.status != STATUS_OK {
            debug!("Place details for {place_id} returned status {}", details.status);
            return Ok(None);
        }

        Ok(details.result.map(|r| r.geometry.location))
    }

    async fn nearby(&self, at: LatLng, kind: PlaceKind) -> Result<Vec<NearbyPlace>, PlacesError> {
        let location = format!("{},{}", at.lat, at.lng);
        let radius = self.radius_m.to_string();
        let response: NearbyResponse = self
            .get_json(
                "nearbysearch",
                &[
                    ("location", location.as_str()),
                    ("radius", radius.as_str()),
                    ("type", kind.as_str()),
                ],
            )
            .await?;

        if response.status != STATUS_OK {
            // ZERO_RESULTS lands here too; the category simply contributes nothing.
            debug!(
                "Nearby search for {} returned status {}",
                kind.as_str(),
                response.status
            );
            return Ok(Vec::new());
        }

        Ok(response.results)
    }
}

#[async_trait]
impl PlacesProvider for GooglePlacesClient {
    async fn suggestions(&self, input: &str) -> Result<Vec<Suggestion>, PlacesError> {
        let response: AutocompleteResponse =
            self.get_json("autocomplete", &[("input", input)]).await?;

        if response.status != STATUS_OK {
            if response.status != "ZERO_RESULTS" {
                warn!("Autocomplete returned status {}", response.status);
            }
            return Ok(Vec::new());
        }

        Ok(response
            .predictions
            .into_iter()
            .map(|p| Suggestion {
                place_id: p.place_id,
                description: p.description,
            })
            .collect())
    }

    async fn place_metrics(&self, place_id: &str) -> Result<Option<PlaceMetrics>, PlacesError> {
        let Some(at) = self.coordinates(place_id).await? else {
            return Ok(None);
        };

        let per_kind = try_join_all(PlaceKind::ALL.into_iter().map(|kind| async move {
            self.nearby(at, kind).await.map(|places| (kind, places))
        }))
        .await?;

        let mut metrics = PlaceMetrics::default();
        for (kind, places) in &per_kind {
            for place in places {
                metrics.record(*kind, place);
            }
        }

        let metrics = metrics.finish(self.radius_m);
        debug!(
            "Metrics for {place_id}: total={} police={} hospitals={}",
            metrics.total_places, metrics.police, metrics.hospitals
        );
        Ok(Some(metrics))
    }
}
