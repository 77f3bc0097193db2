use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Fatal configuration problems. A config that fails with any of these is never
/// handed to the engine.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("configuration declares no breakpoints")]
    NoBreakpoints,

    #[error("breakpoint '{name}' has an empty alias")]
    EmptyAlias { name: String },

    #[error("duplicate breakpoint alias: {0}")]
    DuplicateAlias(String),

    #[error("base breakpoint '{0}' is not listed in breakpoints")]
    BaseNotInBreakpoints(String),

    #[error("base breakpoint '{0}' differs from its entry in breakpoints")]
    BaseMismatch(String),

    #[error("breakpoint '{alias}' has invalid dimensions {width}x{height}")]
    InvalidDimensions { alias: String, width: f64, height: f64 },

    #[error("token '{token}': min {min} is greater than max {max}")]
    InvalidTokenBounds { token: String, min: f64, max: f64 },

    #[error("token '{token}': step must be positive, got {step}")]
    InvalidStep { token: String, step: f64 },

    #[error("token '{token}': scale must be a finite number")]
    InvalidScale { token: String },

    #[error("rounding precision must be positive, got {0}")]
    InvalidPrecision(f64),

    #[error("accessibility.{field} must be a non-negative number, got {value}")]
    InvalidAccessibility { field: &'static str, value: f64 },

    #[error("performance.cacheCapacity must be at least 1")]
    InvalidCacheCapacity,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    ParseError(#[from] serde_json::Error),
}
