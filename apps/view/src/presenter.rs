//! Presenter: a pure projection of `ViewState` into a drawable frame.
//!
//! The dropdown, loader and result card are decided independently, so more
//! than one of them can be visible at once.

use std::fmt;

use crate::model::TimeBand;
use crate::view::ViewState;

/// Cells in the score bar.
pub const BAR_WIDTH: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Safe,
    Moderate,
    Risky,
}

impl Tone {
    /// Anything other than the two known calmer labels is styled as risky.
    pub fn for_level(level: &str) -> Self {
        match level {
            "Safe" => Tone::Safe,
            "Moderate" => Tone::Moderate,
            _ => Tone::Risky,
        }
    }

    fn badge(self) -> &'static str {
        match self {
            Tone::Safe => "[+]",
            Tone::Moderate => "[!]",
            Tone::Risky => "[x]",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub score: i64,
    pub level: String,
    pub tone: Tone,
    /// Filled cells of the score bar, out of `BAR_WIDTH`.
    pub bar_fill: usize,
    pub reasoning: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub time: TimeBand,
    pub input: String,
    pub dropdown: Vec<String>,
    pub loader: bool,
    pub card: Option<Card>,
}

pub fn render(state: &ViewState) -> Frame {
    let card = match (&state.result, state.loading) {
        (Some(result), false) => Some(Card {
            score: result.score.round() as i64,
            level: result.level.clone(),
            tone: Tone::for_level(&result.level),
            bar_fill: bar_fill(result.score),
            reasoning: result.reasoning.clone(),
        }),
        _ => None,
    };

    Frame {
        time: state.time,
        input: state.query.clone(),
        dropdown: state
            .suggestions
            .iter()
            .map(|s| s.description.clone())
            .collect(),
        loader: state.loading,
        card,
    }
}

fn bar_fill(score: f64) -> usize {
    let ratio = (score / 100.0).clamp(0.0, 1.0);
    (ratio * BAR_WIDTH as f64).round() as usize
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "SAFETYWISE")?;
        writeln!(f)?;

        write!(f, "Timeframe:")?;
        for (i, band) in TimeBand::OPTIONS.iter().enumerate() {
            let marker = if *band == self.time { '*' } else { ' ' };
            write!(f, "  {marker}{} {}", i + 1, band.label())?;
        }
        writeln!(f)?;

        if self.input.is_empty() {
            writeln!(f, "> Enter destination")?;
        } else {
            writeln!(f, "> {}", self.input)?;
        }

        for (i, description) in self.dropdown.iter().enumerate() {
            writeln!(f, "  {:>2}. {description}", i + 1)?;
        }

        if self.loader {
            writeln!(f)?;
            writeln!(f, "  ... ANALYZING ENVIRONMENT")?;
        }

        if let Some(card) = &self.card {
            writeln!(f)?;
            writeln!(f, "  SECURITY INDEX  {}  {} {}", card.score, card.tone.badge(), card.level)?;
            writeln!(
                f,
                "  {}{}",
                "#".repeat(card.bar_fill),
                "-".repeat(BAR_WIDTH - card.bar_fill)
            )?;
            writeln!(f, "  \"{}\"", card.reasoning)?;
        }

        Ok(())
    }
}
