use crate::core::engine::{PredictionEngine, DEFAULT_SUM_TOLERANCE};
use crate::core::MatchupConfigProvider;
use crate::domain::model::MatchFormat;
use crate::utils::error::{EngineError, Result};
use crate::utils::validation::{validate_range, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub engine: EngineSection,
    pub output: OutputSection,
    pub matchup: MatchupSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSection {
    pub best_of: u8,
    pub sum_tolerance: f64,
}

impl Default for EngineSection {
    fn default() -> Self {
        Self {
            best_of: 3,
            sum_tolerance: DEFAULT_SUM_TOLERANCE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSection {
    pub format: OutputFormat,
}

/// Elo weighting used when blending a server's serve form with the
/// receiver's return form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchupSection {
    pub elo_scale: f64,
    pub min_weight: f64,
    pub max_weight: f64,
}

impl Default for MatchupSection {
    fn default() -> Self {
        Self {
            elo_scale: 400.0,
            min_weight: 0.25,
            max_weight: 0.75,
        }
    }
}

impl MatchupConfigProvider for MatchupSection {
    fn elo_scale(&self) -> f64 {
        self.elo_scale
    }

    fn min_weight(&self) -> f64 {
        self.min_weight
    }

    fn max_weight(&self) -> f64 {
        self.max_weight
    }
}

impl EngineConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = substitute_env_vars(content)?;
        let config: Self = toml::from_str(&processed)?;
        config.validate()?;
        Ok(config)
    }

    pub fn match_format(&self) -> Result<MatchFormat> {
        MatchFormat::from_sets(self.engine.best_of).ok_or_else(|| EngineError::ConfigError {
            message: format!("engine.best_of must be 3 or 5, got {}", self.engine.best_of),
        })
    }

    pub fn prediction_engine(&self) -> Result<PredictionEngine> {
        Ok(PredictionEngine::new(self.match_format()?).with_sum_tolerance(self.engine.sum_tolerance))
    }
}

impl Validate for EngineConfig {
    fn validate(&self) -> Result<()> {
        self.match_format()?;
        if !self.engine.sum_tolerance.is_finite() {
            return Err(EngineError::validation(
                "engine.sum_tolerance",
                self.engine.sum_tolerance,
                "Value must be a finite number",
            ));
        }
        validate_range("engine.sum_tolerance", self.engine.sum_tolerance, 0.0, 1.0)?;

        let m = &self.matchup;
        if !m.elo_scale.is_finite() || m.elo_scale <= 0.0 {
            return Err(EngineError::validation(
                "matchup.elo_scale",
                m.elo_scale,
                "Value must be a positive number",
            ));
        }
        validate_range("matchup.min_weight", m.min_weight, 0.0, 1.0)?;
        validate_range("matchup.max_weight", m.max_weight, m.min_weight, 1.0)?;
        Ok(())
    }
}

/// Replaces `${VAR}` with the environment value; unknown variables are left as-is.
pub fn substitute_env_vars(content: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| EngineError::ConfigError {
        message: format!("invalid substitution pattern: {}", e),
    })?;

    let result = re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
    });

    Ok(result.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(config.engine.best_of, 3);
        assert_eq!(config.output.format, OutputFormat::Text);
        assert_eq!(config.matchup.elo_scale, 400.0);
        assert_eq!(config.match_format().unwrap(), MatchFormat::BestOfThree);
    }

    #[test]
    fn test_partial_sections() {
        let config = EngineConfig::from_toml_str(
            r#"
[engine]
best_of = 5

[output]
format = "json"
"#,
        )
        .unwrap();
        assert_eq!(config.match_format().unwrap(), MatchFormat::BestOfFive);
        assert_eq!(config.output.format, OutputFormat::Json);
        assert_eq!(config.engine.sum_tolerance, DEFAULT_SUM_TOLERANCE);
    }

    #[test]
    fn test_invalid_values() {
        assert!(EngineConfig::from_toml_str("[engine]\nbest_of = 4\n").is_err());
        assert!(EngineConfig::from_toml_str("[matchup]\nmin_weight = 0.8\nmax_weight = 0.6\n").is_err());
        assert!(EngineConfig::from_toml_str("[matchup]\nelo_scale = 0.0\n").is_err());
        assert!(matches!(
            EngineConfig::from_toml_str("[engine\n"),
            Err(EngineError::ConfigParseError(_))
        ));
    }

    #[test]
    fn test_env_substitution() {
        std::env::set_var("TENNIS_MDP_TEST_BEST_OF", "5");
        let out = substitute_env_vars("best_of = ${TENNIS_MDP_TEST_BEST_OF}").unwrap();
        assert_eq!(out, "best_of = 5");
        let untouched = substitute_env_vars("x = \"${TENNIS_MDP_SURELY_UNSET}\"").unwrap();
        assert_eq!(untouched, "x = \"${TENNIS_MDP_SURELY_UNSET}\"");
    }
}
