pub mod chain;
pub mod composer;
pub mod engine;
pub mod game;
pub mod set;
pub mod solver;
pub mod tiebreak;

pub use crate::domain::model::{MatchFormat, ServeProbability, WinProbability};
pub use crate::domain::ports::{MatchupConfigProvider, RatingsProvider};
pub use crate::utils::error::Result;
