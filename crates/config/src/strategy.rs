use crate::token::ScalingToken;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How values are derived from the base breakpoint.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScalingStrategy {
    #[serde(default)]
    pub origin: Origin,

    #[serde(default)]
    pub mode: ScalingMode,

    #[serde(default)]
    pub tokens: BTreeMap<String, ScalingToken>,

    #[serde(default)]
    pub rounding: RoundingConfig,

    #[serde(default)]
    pub accessibility: AccessibilityConfig,

    #[serde(default)]
    pub performance: PerformanceConfig,
}

impl ScalingStrategy {
    pub fn token(&self, name: &str) -> Option<&ScalingToken> {
        self.tokens.get(name)
    }
}

/// Viewport dimension (or derived quantity) the scaling ratio is taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    #[default]
    Width,
    Height,
    Min,
    Max,
    Diagonal,
    Area,
}

impl Origin {
    pub fn value(self, width: f64, height: f64) -> f64 {
        match self {
            Self::Width => width,
            Self::Height => height,
            Self::Min => width.min(height),
            Self::Max => width.max(height),
            Self::Diagonal => width.hypot(height),
            Self::Area => width * height,
        }
    }
}

/// Function family mapping the ratio to a value multiplier.
///
/// On the wire: `"linear"`, `"golden-ratio"`, or `{"custom": "my-curve"}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScalingMode {
    #[default]
    Linear,
    Exponential,
    Logarithmic,
    GoldenRatio,
    /// Resolved through the engine's strategy registry
    Custom(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundingConfig {
    #[serde(default)]
    pub mode: RoundingMode,

    /// Results are rounded to a multiple of this value
    #[serde(default = "default_precision")]
    pub precision: f64,
}

fn default_precision() -> f64 {
    0.5
}

impl Default for RoundingConfig {
    fn default() -> Self {
        Self {
            mode: RoundingMode::default(),
            precision: default_precision(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundingMode {
    #[default]
    Nearest,
    Up,
    Down,
    /// Resolved through the engine's strategy registry
    Custom(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessibilityConfig {
    #[serde(default = "default_min_font_size")]
    pub min_font_size: f64,

    #[serde(default = "default_min_tap_target")]
    pub min_tap_target: f64,

    /// Consumed by styling collaborators; the engine only forwards it
    #[serde(default = "default_true")]
    pub contrast_preservation: bool,
}

fn default_min_font_size() -> f64 {
    12.0
}

fn default_min_tap_target() -> f64 {
    44.0
}

fn default_true() -> bool {
    true
}

impl Default for AccessibilityConfig {
    fn default() -> Self {
        Self {
            min_font_size: default_min_font_size(),
            min_tap_target: default_min_tap_target(),
            contrast_preservation: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceConfig {
    #[serde(default = "default_true")]
    pub memoization: bool,

    #[serde(default)]
    pub cache_strategy: CacheStrategy,

    #[serde(default)]
    pub precompute_values: bool,

    /// LRU cap for the in-memory cache; unbounded when absent. Zero is rejected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_capacity: Option<usize>,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            memoization: true,
            cache_strategy: CacheStrategy::default(),
            precompute_values: false,
            cache_capacity: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheStrategy {
    #[default]
    Memory,
    Persisted,
}
