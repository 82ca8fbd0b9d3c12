use crate::core::engine::PredictionEngine;
use crate::core::{MatchupConfigProvider, RatingsProvider};
use crate::domain::model::{PlayerProfile, ServeProbability, WinProbability};
use crate::utils::error::Result;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct MatchupPrediction {
    pub player1: PlayerProfile,
    pub player2: PlayerProfile,
    pub player1_weight: f64,
    pub player1_serve: f64,
    pub player2_serve: f64,
    pub result: WinProbability,
}

/// Turns two named players into engine inputs and runs the prediction.
///
/// Each player's serve probability blends their own serve form with the
/// opponent's return form. The stronger player by Elo gets more weight on
/// their own numbers.
pub struct Matchup<R: RatingsProvider, C: MatchupConfigProvider> {
    ratings: R,
    config: C,
    engine: PredictionEngine,
}

impl<R: RatingsProvider, C: MatchupConfigProvider> Matchup<R, C> {
    pub fn new(ratings: R, config: C, engine: PredictionEngine) -> Self {
        Self {
            ratings,
            config,
            engine,
        }
    }

    /// Weight on player 1's own serve form; player 2 gets the complement.
    pub fn player1_weight(&self, player1_elo: f64, player2_elo: f64) -> f64 {
        let expected = 1.0 / (1.0 + 10f64.powf(-(player1_elo - player2_elo) / self.config.elo_scale()));
        let min = self.config.min_weight();
        min + expected * (self.config.max_weight() - min)
    }

    pub fn serve_probabilities(
        &self,
        player1: &PlayerProfile,
        player2: &PlayerProfile,
    ) -> Result<(ServeProbability, ServeProbability)> {
        let w1 = self.player1_weight(player1.elo, player2.elo);
        let w2 = 1.0 - w1;
        let serve1 = w1 * player1.serve_points_won + (1.0 - w1) * (1.0 - player2.return_points_won);
        let serve2 = w2 * player2.serve_points_won + (1.0 - w2) * (1.0 - player1.return_points_won);
        Ok((
            ServeProbability::named("player1_serve", serve1)?,
            ServeProbability::named("player2_serve", serve2)?,
        ))
    }

    pub fn predict(&self, player1: &str, player2: &str) -> Result<MatchupPrediction> {
        let profile1 = self.ratings.profile(player1)?;
        let profile2 = self.ratings.profile(player2)?;
        let player1_weight = self.player1_weight(profile1.elo, profile2.elo);
        let (serve1, serve2) = self.serve_probabilities(&profile1, &profile2)?;

        tracing::info!(
            player1 = %profile1.name,
            player2 = %profile2.name,
            elo_diff = profile1.elo - profile2.elo,
            %serve1,
            %serve2,
            "matchup resolved"
        );

        let result = self.engine.predict(serve1.value(), serve2.value())?;
        Ok(MatchupPrediction {
            player1: profile1,
            player2: profile2,
            player1_weight,
            player1_serve: serve1.value(),
            player2_serve: serve2.value(),
            result,
        })
    }
}
