use crate::core::composer::{MatchComposer, SetBreakdown};
use crate::core::{game, tiebreak};
use crate::domain::model::{MatchFormat, ServeProbability, WinProbability};
use crate::utils::error::Result;

/// Default tolerance when checking that a result pair sums to one.
pub const DEFAULT_SUM_TOLERANCE: f64 = 1e-6;

/// Validating front end over the chains. Takes raw decimals, rejects bad
/// input before any chain is built, and reports drift of the probability
/// sum without renormalizing.
#[derive(Debug, Clone, Copy)]
pub struct PredictionEngine {
    composer: MatchComposer,
    sum_tolerance: f64,
}

impl Default for PredictionEngine {
    fn default() -> Self {
        Self::new(MatchFormat::default())
    }
}

impl PredictionEngine {
    pub fn new(format: MatchFormat) -> Self {
        Self {
            composer: MatchComposer::with_format(format),
            sum_tolerance: DEFAULT_SUM_TOLERANCE,
        }
    }

    pub fn with_sum_tolerance(mut self, sum_tolerance: f64) -> Self {
        self.sum_tolerance = sum_tolerance;
        self
    }

    pub fn format(&self) -> MatchFormat {
        self.composer.format()
    }

    pub fn game(&self, serve: f64) -> Result<f64> {
        let serve = ServeProbability::named("serve", serve)?;
        game::game_win_probability(serve)
    }

    pub fn tiebreak(&self, player1: f64, player2: f64) -> Result<WinProbability> {
        let (player1, player2) = serve_pair(player1, player2)?;
        let result = tiebreak::tiebreak_win_probability(player1, player2)?;
        self.check_total("tiebreak", &result);
        Ok(result)
    }

    pub fn set_breakdown(&self, player1: f64, player2: f64) -> Result<SetBreakdown> {
        let (player1, player2) = serve_pair(player1, player2)?;
        self.composer.set_breakdown(player1, player2)
    }

    pub fn set(&self, player1: f64, player2: f64) -> Result<WinProbability> {
        let result = self.set_breakdown(player1, player2)?.set_win();
        self.check_total("set", &result);
        Ok(result)
    }

    pub fn predict(&self, player1: f64, player2: f64) -> Result<WinProbability> {
        let (player1, player2) = serve_pair(player1, player2)?;
        tracing::info!(%player1, %player2, "predicting match");
        let result = self.composer.match_win_probability(player1, player2)?;
        self.check_total("match", &result);
        Ok(result)
    }

    fn check_total(&self, unit: &str, result: &WinProbability) {
        let drift = (result.total() - 1.0).abs();
        if drift > self.sum_tolerance {
            tracing::warn!(unit, drift, "win probabilities do not sum to one");
        }
    }
}

fn serve_pair(player1: f64, player2: f64) -> Result<(ServeProbability, ServeProbability)> {
    Ok((
        ServeProbability::named("player1", player1)?,
        ServeProbability::named("player2", player2)?,
    ))
}

/// Probability that a server winning `serve` of their points holds serve.
pub fn game_win_probability(serve: f64) -> Result<f64> {
    PredictionEngine::default().game(serve)
}

/// Tiebreak odds with player 1 serving first.
pub fn tiebreak_win_probability(player1: f64, player2: f64) -> Result<WinProbability> {
    PredictionEngine::default().tiebreak(player1, player2)
}

/// Set odds with player 1 serving first.
pub fn set_win_probability(player1: f64, player2: f64) -> Result<WinProbability> {
    PredictionEngine::default().set(player1, player2)
}

/// Best-of-three match odds.
pub fn match_win_probability(player1: f64, player2: f64) -> Result<WinProbability> {
    PredictionEngine::default().predict(player1, player2)
}
