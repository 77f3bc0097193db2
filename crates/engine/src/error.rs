use responsive_config::ConfigError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Unknown token: {0}")]
    UnknownToken(String),

    #[error("Unknown breakpoint: {0}")]
    UnknownBreakpoint(String),

    #[error("token '{token}' references unregistered scaling function '{id}'")]
    UnknownScalingFunction { token: String, id: String },

    #[error("rounding references unregistered function '{0}'")]
    UnknownRoundingFunction(String),

    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),
}

/// Failures of a persisted cache backend. Never fatal: the cache falls back
/// to memory-only operation.
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("persisted store unavailable: {0}")]
    Unavailable(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Bad input to a value request. Recovered locally; callers get a safe
/// default instead.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ValidationError {
    #[error("base value {0} is negative")]
    NegativeBaseValue(f64),

    #[error("base value {0} is not finite")]
    NonFiniteBaseValue(f64),
}
