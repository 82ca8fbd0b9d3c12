use crate::config::toml_config::substitute_env_vars;
use crate::core::RatingsProvider;
use crate::domain::model::PlayerProfile;
use crate::utils::error::{EngineError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_probability, Validate};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct RosterFile {
    #[serde(default)]
    players: Vec<PlayerProfile>,
}

/// Fixed roster of player profiles, typically read from a TOML file:
///
/// ```toml
/// [[players]]
/// name = "Casper Ruud"
/// serve_points_won = 0.655
/// return_points_won = 0.392
/// elo = 2010.0
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticRatings {
    players: HashMap<String, PlayerProfile>,
}

fn roster_key(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

impl StaticRatings {
    pub fn new(profiles: Vec<PlayerProfile>) -> Result<Self> {
        let mut players = HashMap::with_capacity(profiles.len());
        for profile in profiles {
            profile.validate()?;
            let key = roster_key(&profile.name);
            if players.insert(key, profile.clone()).is_some() {
                return Err(EngineError::ConfigError {
                    message: format!("player '{}' appears more than once in the roster", profile.name),
                });
            }
        }
        Ok(Self { players })
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let roster: RosterFile = toml::from_str(&substitute_env_vars(content)?)?;
        let ratings = Self::new(roster.players)?;
        tracing::debug!(players = ratings.len(), "roster loaded");
        Ok(ratings)
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

impl RatingsProvider for StaticRatings {
    fn profile(&self, name: &str) -> Result<PlayerProfile> {
        self.players
            .get(&roster_key(name))
            .cloned()
            .ok_or_else(|| EngineError::UnknownPlayer {
                name: name.to_string(),
            })
    }
}

impl Validate for PlayerProfile {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("players.name", &self.name)?;
        validate_probability("players.serve_points_won", self.serve_points_won)?;
        validate_probability("players.return_points_won", self.return_points_won)?;
        if !self.elo.is_finite() {
            return Err(EngineError::validation(
                "players.elo",
                self.elo,
                "Value must be a finite number",
            ));
        }
        Ok(())
    }
}
