use crate::utils::error::Result;
use crate::utils::validation::validate_open_probability;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Probability that a player wins a point on their own serve.
///
/// Always strictly inside (0, 1); the chains built from it degenerate at the
/// bounds, so out-of-range inputs are rejected rather than clamped.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
pub struct ServeProbability(f64);

impl ServeProbability {
    pub fn new(value: f64) -> Result<Self> {
        Self::named("serve_probability", value)
    }

    /// Same as [`ServeProbability::new`] but reports `field` in the error.
    pub fn named(field: &str, value: f64) -> Result<Self> {
        validate_open_probability(field, value)?;
        Ok(Self(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    pub fn complement(self) -> f64 {
        1.0 - self.0
    }
}

impl fmt::Display for ServeProbability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}", self.0)
    }
}

/// Win probabilities for player 1 and player 2, in that order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WinProbability {
    pub player1: f64,
    pub player2: f64,
}

impl WinProbability {
    pub fn new(player1: f64, player2: f64) -> Self {
        Self { player1, player2 }
    }

    pub fn total(&self) -> f64 {
        self.player1 + self.player2
    }

    /// Swaps the players.
    pub fn reversed(self) -> Self {
        Self {
            player1: self.player2,
            player2: self.player1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchFormat {
    #[default]
    BestOfThree,
    BestOfFive,
}

impl MatchFormat {
    pub fn from_sets(best_of: u8) -> Option<Self> {
        match best_of {
            3 => Some(MatchFormat::BestOfThree),
            5 => Some(MatchFormat::BestOfFive),
            _ => None,
        }
    }

    pub fn sets_to_win(self) -> u8 {
        match self {
            MatchFormat::BestOfThree => 2,
            MatchFormat::BestOfFive => 3,
        }
    }
}

/// Serve and return form of one player, as supplied by the ratings layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub name: String,
    /// Share of service points won, as a decimal.
    pub serve_points_won: f64,
    /// Share of return points won, as a decimal.
    pub return_points_won: f64,
    pub elo: f64,
}
