pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::{CliConfig, Command};

pub use crate::adapters::ratings::StaticRatings;
pub use crate::app::matchup::{Matchup, MatchupPrediction};
pub use crate::config::{EngineConfig, OutputFormat};
pub use crate::core::composer::{MatchComposer, SetBreakdown};
pub use crate::core::engine::{
    game_win_probability, match_win_probability, set_win_probability, tiebreak_win_probability,
    PredictionEngine,
};
pub use crate::domain::model::{MatchFormat, PlayerProfile, ServeProbability, WinProbability};
pub use crate::domain::ports::RatingsProvider;
pub use crate::utils::error::{EngineError, Result};
