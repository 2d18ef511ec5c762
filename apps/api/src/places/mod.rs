//! Places: destination lookup and neighbourhood metrics.
//!
//! All calls to the Google Places web service go through `GooglePlacesClient`.
//! Handlers only see the `PlacesProvider` trait, carried in `AppState` as
//! `Arc<dyn PlacesProvider>`, so routes can be exercised against a fake.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod google;

pub use google::GooglePlacesClient;

#[derive(Debug, Error)]
pub enum PlacesError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A candidate destination for the autocomplete dropdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub place_id: String,
    pub description: String,
}

/// Nearby place categories sampled around a destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceKind {
    Police,
    Hospital,
    Restaurant,
    Store,
}

impl PlaceKind {
    pub const ALL: [PlaceKind; 4] = [
        PlaceKind::Police,
        PlaceKind::Hospital,
        PlaceKind::Restaurant,
        PlaceKind::Store,
    ];

    /// The `type` parameter understood by the nearby search endpoint.
    pub fn as_str(self) -> &'static str {
        match self {
            PlaceKind::Police => "police",
            PlaceKind::Hospital => "hospital",
            PlaceKind::Restaurant => "restaurant",
            PlaceKind::Store => "store",
        }
    }
}

/// Ratings count above which a nearby place counts as high engagement.
pub const HIGH_ENGAGEMENT_RATINGS: u64 = 100;

/// One entry of a nearby search response, reduced to the fields we count.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NearbyPlace {
    #[serde(default)]
    pub opening_hours: Option<OpeningHours>,
    #[serde(default)]
    pub user_ratings_total: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OpeningHours {
    #[serde(default)]
    pub open_now: Option<bool>,
}

/// Aggregated counts around a destination, input to the safety score.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlaceMetrics {
    pub police: u32,
    pub hospitals: u32,
    pub total_places: u32,
    pub open_now: u32,
    pub high_engagement_places: u32,
    /// Places per metre of search radius.
    pub activity_density: f64,
}

impl PlaceMetrics {
    /// Counts one nearby search result found under `kind`.
    pub fn record(&mut self, kind: PlaceKind, place: &NearbyPlace) {
        self.total_places += 1;

        match kind {
            PlaceKind::Police => self.police += 1,
            PlaceKind::Hospital => self.hospitals += 1,
            PlaceKind::Restaurant | PlaceKind::Store => {}
        }

        if place
            .opening_hours
            .as_ref()
            .and_then(|h| h.open_now)
            .unwrap_or(false)
        {
            self.open_now += 1;
        }

        if place.user_ratings_total > HIGH_ENGAGEMENT_RATINGS {
            self.high_engagement_places += 1;
        }
    }

    /// Derives `activity_density` once all results are recorded.
    pub fn finish(mut self, radius_m: u32) -> Self {
        self.activity_density = f64::from(self.total_places) / f64::from(radius_m.max(1));
        self
    }
}

/// Source of destination suggestions and neighbourhood metrics.
#[async_trait]
pub trait PlacesProvider: Send + Sync {
    /// Autocomplete candidates for free text. Empty when the service reports no match.
    async fn suggestions(&self, input: &str) -> Result<Vec<Suggestion>, PlacesError>;

    /// Metrics around a place, or `None` when the place cannot be resolved.
    async fn place_metrics(&self, place_id: &str) -> Result<Option<PlaceMetrics>, PlacesError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(open_now: Option<bool>, ratings: u64) -> NearbyPlace {
        NearbyPlace {
            opening_hours: Some(OpeningHours { open_now }),
            user_ratings_total: ratings,
        }
    }

    #[test]
    fn test_record_counts_kind_specific_totals() {
        let mut m = PlaceMetrics::default();
        m.record(PlaceKind::Police, &NearbyPlace::default());
        m.record(PlaceKind::Hospital, &NearbyPlace::default());
        m.record(PlaceKind::Store, &NearbyPlace::default());
        assert_eq!(m.police, 1);
        assert_eq!(m.hospitals, 1);
        assert_eq!(m.total_places, 3);
    }

    #[test]
    fn test_record_open_now_and_engagement() {
        let mut m = PlaceMetrics::default();
        m.record(PlaceKind::Restaurant, &place(Some(true), 101));
        m.record(PlaceKind::Restaurant, &place(Some(false), 100));
        m.record(PlaceKind::Restaurant, &place(None, 5000));
        assert_eq!(m.open_now, 1);
        // Threshold is strictly greater than 100
        assert_eq!(m.high_engagement_places, 2);
    }

    #[test]
    fn test_finish_computes_density() {
        let mut m = PlaceMetrics::default();
        for _ in 0..20 {
            m.record(PlaceKind::Store, &NearbyPlace::default());
        }
        let m = m.finish(1000);
        assert!((m.activity_density - 0.02).abs() < f64::EPSILON);
    }

    #[test]
    fn test_nearby_place_tolerates_missing_fields() {
        let p: NearbyPlace = serde_json::from_str(r#"{"name": "Corner Shop"}"#).unwrap();
        assert!(p.opening_hours.is_none());
        assert_eq!(p.user_ratings_total, 0);
    }
}
