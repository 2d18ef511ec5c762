use serde::{Deserialize, Serialize};

/// A candidate destination returned by `/suggestions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub place_id: String,
    pub description: String,
}

/// Body of a successful `/analyze` call.
///
/// `level` stays a string: the backend owns the category vocabulary and the
/// presenter only styles the labels it knows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub score: f64,
    pub level: String,
    pub reasoning: String,
}

/// Time-of-day band offered in the selector. The label is sent verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeBand {
    Evening,
    #[default]
    Night,
    AfterMidnight,
    EarlyMorning,
}

impl TimeBand {
    /// Selector order.
    pub const OPTIONS: [TimeBand; 4] = [
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
}

impl std::fmt::Display for TimeBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_band_is_night() {
        assert_eq!(TimeBand::default().label(), "Night (9PM - 12AM)");
    }

    #[test]
    fn test_analysis_result_parses_backend_body() {
        let body = r#"{"score": 82, "level": "Safe", "reasoning": "Well-lit area"}"#;
        let result: AnalysisResult = serde_json::from_str(body).unwrap();
        assert_eq!(result.score, 82.0);
        assert_eq!(result.level, "Safe");
        assert_eq!(result.reasoning, "Well-lit area");
    }
}
