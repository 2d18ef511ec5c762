//! Safety scoring: turns neighbourhood metrics into a 0–95 index, a coarse
//! level and a human-readable rationale. Pure and deterministic.

use serde::{Deserialize, Serialize};

use crate::places::{PlaceMetrics, HIGH_ENGAGEMENT_RATINGS};

/// No place is reported as perfectly safe.
pub const MAX_SCORE: f64 = 95.0;
pub const SAFE_THRESHOLD: f64 = 65.0;
pub const MODERATE_THRESHOLD: f64 = 40.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub police: f64,
    pub hospital: f64,
    pub open_now: f64,
    pub activity_density: f64,
    pub high_engagement: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            police: 5.0,
            hospital: 3.0,
            open_now: 2.0,
            activity_density: 100.0,
            high_engagement: 2.0,
        }
    }
}

/// Time-of-day band selected by the user. Labels travel verbatim over the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeBand {
    #[serde(rename = "Evening (5PM - 9PM)")]
    Evening,
    #[serde(rename = "Night (9PM - 12AM)")]
    Night,
    #[serde(rename = "After Midnight (12AM - 5AM)")]
    AfterMidnight,
    #[serde(rename = "Early Morning (5AM - 9AM)")]
    EarlyMorning,
}

impl TimeBand {
    pub const ALL: [TimeBand; 4] = [
        TimeBand::Evening,
        TimeBand::Night,
        TimeBand::AfterMidnight,
        TimeBand::EarlyMorning,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TimeBand::Evening => "Evening (5PM - 9PM)",
            TimeBand::Night => "Night (9PM - 12AM)",
            TimeBand::AfterMidnight => "After Midnight (12AM - 5AM)",
            TimeBand::EarlyMorning => "Early Morning (5AM - 9AM)",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|band| band.label() == label)
    }

    /// Multiplier applied to the raw score for this band.
    pub fn risk_factor(self) -> f64 {
        match self {
            TimeBand::Evening => 1.0,
            TimeBand::Night => 0.9,
            TimeBand::AfterMidnight => 0.7,
            TimeBand::EarlyMorning => 0.85,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SafetyLevel {
    Safe,
    Moderate,
    Risky,
}

impl SafetyLevel {
    pub fn from_score(score: f64) -> Self {
        if score >= SAFE_THRESHOLD {
            SafetyLevel::Safe
        } else if score >= MODERATE_THRESHOLD {
            SafetyLevel::Moderate
        } else {
            SafetyLevel::Risky
        }
    }
}

/// Wire shape of `/analyze`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafetyReport {
    pub score: f64,
    pub level: SafetyLevel,
    pub reasoning: String,
}

/// Weighted sum of the metrics before any time adjustment.
pub fn compute_raw_score(metrics: &PlaceMetrics, weights: &ScoringWeights) -> f64 {
    weights.police * f64::from(metrics.police)
        + weights.hospital * f64::from(metrics.hospitals)
        + weights.open_now * f64::from(metrics.open_now)
        + weights.activity_density * metrics.activity_density
        + weights.high_engagement * f64::from(metrics.high_engagement_places)
}

/// Full scoring pass. `time` is `None` for labels we do not recognise, which
/// leave the raw score unadjusted.
pub fn calculate_safety(
    metrics: &PlaceMetrics,
    time: Option<TimeBand>,
    weights: &ScoringWeights,
) -> SafetyReport {
    let factor = time.map_or(1.0, TimeBand::risk_factor);
    let score = (compute_raw_score(metrics, weights) * factor).min(MAX_SCORE);

    SafetyReport {
        score: round_to(score, 2),
        level: SafetyLevel::from_score(score),
        reasoning: build_reasoning(metrics),
    }
}

fn build_reasoning(metrics: &PlaceMetrics) -> String {
    format!(
        "Police: {}, Hospitals: {}, Open Businesses: {}, Activity Density: {:?}, \
         Highly Rated Places (>{} reviews): {}",
        metrics.police,
        metrics.hospitals,
        metrics.open_now,
        round_to(metrics.activity_density, 3),
        HIGH_ENGAGEMENT_RATINGS,
        metrics.high_engagement_places,
    )
}

fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (value * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(police: u32, hospitals: u32, open_now: u32, total: u32, engaged: u32) -> PlaceMetrics {
        PlaceMetrics {
            police,
            hospitals,
            total_places: total,
            open_now,
            high_engagement_places: engaged,
            activity_density: 0.0,
        }
        .finish(1000)
    }

    #[test]
    fn test_raw_score_weights() {
        // 2*5 + 1*3 + 4*2 + (20/1000)*100 + 3*2 = 10 + 3 + 8 + 2 + 6 = 29
        let m = metrics(2, 1, 4, 20, 3);
        let raw = compute_raw_score(&m, &ScoringWeights::default());
        assert!((raw - 29.0).abs() < 1e-9, "Raw was {raw}");
    }

    #[test]
    fn test_night_factor_applied() {
        let m = metrics(2, 1, 4, 20, 3);
        let report = calculate_safety(&m, Some(TimeBand::Night), &ScoringWeights::default());
        assert!((report.score - 26.1).abs() < 1e-9, "Score was {}", report.score);
        assert_eq!(report.level, SafetyLevel::Risky);
    }

    #[test]
    fn test_unknown_band_is_unadjusted() {
        let m = metrics(2, 1, 4, 20, 3);
        let report = calculate_safety(&m, None, &ScoringWeights::default());
        assert!((report.score - 29.0).abs() < 1e-9);
    }

    #[test]
    fn test_score_capped_at_95() {
        let m = metrics(20, 20, 20, 80, 20);
        let report = calculate_safety(&m, Some(TimeBand::Evening), &ScoringWeights::default());
        assert_eq!(report.score, MAX_SCORE);
        assert_eq!(report.level, SafetyLevel::Safe);
    }

    #[test]
    fn test_level_thresholds() {
        assert_eq!(SafetyLevel::from_score(65.0), SafetyLevel::Safe);
        assert_eq!(SafetyLevel::from_score(64.99), SafetyLevel::Moderate);
        assert_eq!(SafetyLevel::from_score(40.0), SafetyLevel::Moderate);
        assert_eq!(SafetyLevel::from_score(39.99), SafetyLevel::Risky);
    }

    #[test]
    fn test_score_rounded_to_two_places() {
        // raw = 0.0123 * 100 = 1.23, after midnight: 0.861
        let m = PlaceMetrics {
            activity_density: 0.0123,
            ..Default::default()
        };
        let report = calculate_safety(&m, Some(TimeBand::AfterMidnight), &ScoringWeights::default());
        assert_eq!(report.score, 0.86);
    }

    #[test]
    fn test_reasoning_lists_every_metric() {
        let m = metrics(2, 1, 4, 20, 3);
        let report = calculate_safety(&m, Some(TimeBand::Evening), &ScoringWeights::default());
        assert_eq!(
            report.reasoning,
            "Police: 2, Hospitals: 1, Open Businesses: 4, Activity Density: 0.02, \
             Highly Rated Places (>100 reviews): 3"
        );
    }

    #[test]
    fn test_reasoning_keeps_decimal_for_zero_density() {
        let report = calculate_safety(
            &PlaceMetrics::default(),
            Some(TimeBand::Night),
            &ScoringWeights::default(),
        );
        assert_eq!(
            report.reasoning,
            "Police: 0, Hospitals: 0, Open Businesses: 0, Activity Density: 0.0, \
             Highly Rated Places (>100 reviews): 0"
        );
    }

    #[test]
    fn test_time_band_labels_round_trip() {
        for band in TimeBand::ALL {
            assert_eq!(TimeBand::from_label(band.label()), Some(band));
        }
        assert_eq!(TimeBand::from_label("Noon"), None);
    }

    #[test]
    fn test_report_serializes_level_as_label() {
        let report = SafetyReport {
            score: 82.0,
            level: SafetyLevel::Safe,
            reasoning: "Well-lit area".into(),
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["level"], "Safe");
        assert_eq!(json["score"], 82.0);
    }
}
