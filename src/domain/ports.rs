use crate::domain::model::PlayerProfile;
use crate::utils::error::Result;

/// Source of player form and strength. Implementations own their caching
/// policy; the engine only ever sees the returned profiles.
pub trait RatingsProvider: Send + Sync {
    fn profile(&self, name: &str) -> Result<PlayerProfile>;
}

pub trait MatchupConfigProvider: Send + Sync {
    fn elo_scale(&self) -> f64;
    fn min_weight(&self) -> f64;
    fn max_weight(&self) -> f64;
}
