use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    ConfigParseError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    ValidationError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Computation failed in {chain} chain: {message}")]
    InternalComputationError { chain: String, message: String },

    #[error("Unknown player: {name}")]
    UnknownPlayer { name: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl EngineError {
    pub fn validation(field: &str, value: impl ToString, reason: impl Into<String>) -> Self {
        EngineError::ValidationError {
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub fn internal(chain: &str, message: impl Into<String>) -> Self {
        EngineError::InternalComputationError {
            chain: chain.to_string(),
            message: message.into(),
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            EngineError::UnknownPlayer { .. } => ErrorSeverity::Medium,
            EngineError::ValidationError { .. }
            | EngineError::ConfigError { .. }
            | EngineError::ConfigParseError(_)
            | EngineError::IoError(_) => ErrorSeverity::High,
            EngineError::SerializationError(_) => ErrorSeverity::Medium,
            EngineError::InternalComputationError { .. } => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            EngineError::IoError(_) => "Check that the file exists and is readable",
            EngineError::SerializationError(_) => "Retry without --json",
            EngineError::ConfigParseError(_) => "Fix the TOML syntax in the configuration file",
            EngineError::ConfigError { .. } => "Review the configuration values",
            EngineError::ValidationError { .. } => {
                "Serve probabilities must be decimals strictly between 0 and 1"
            }
            EngineError::InternalComputationError { .. } => {
                "This indicates a defect in the chain topology; please report it with the inputs used"
            }
            EngineError::UnknownPlayer { .. } => "Add the player to the roster file or check the spelling",
        }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
