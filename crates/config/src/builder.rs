use crate::breakpoint::Breakpoint;
use crate::config::ResponsiveConfig;
use crate::error::{ConfigError, Result};
use crate::strategy::{
    AccessibilityConfig, Origin, PerformanceConfig, RoundingConfig, RoundingMode, ScalingMode,
    ScalingStrategy,
};
use crate::token::ScalingToken;

/// Programmatic alternative to JSON configs for host code.
///
/// ```
/// use responsive_config::{Breakpoint, ResponsiveConfigBuilder, ScalingToken};
///
/// let config = ResponsiveConfigBuilder::new()
///     .breakpoint(Breakpoint::new("Mobile", "mobile", 390.0, 844.0))
///     .breakpoint(Breakpoint::new("Desktop", "desktop", 1920.0, 1080.0))
///     .base("desktop")
///     .token("fontSize", ScalingToken::new(0.85).min(12.0).max(48.0))
///     .build()
///     .unwrap();
///
/// assert_eq!(config.base().alias, "desktop");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ResponsiveConfigBuilder {
    breakpoints: Vec<Breakpoint>,
    base_alias: Option<String>,
    strategy: ScalingStrategy,
}

impl ResponsiveConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn breakpoint(mut self, breakpoint: Breakpoint) -> Self {
        self.breakpoints.push(breakpoint);
        self
    }

    /// Alias of the breakpoint where the scaling ratio is 1. Defaults to the
    /// last declared breakpoint.
    #[must_use]
    pub fn base(mut self, alias: impl Into<String>) -> Self {
        self.base_alias = Some(alias.into());
        self
    }

    #[must_use]
    pub fn origin(mut self, origin: Origin) -> Self {
        self.strategy.origin = origin;
        self
    }

    #[must_use]
    pub fn mode(mut self, mode: ScalingMode) -> Self {
        self.strategy.mode = mode;
        self
    }

    #[must_use]
    pub fn token(mut self, name: impl Into<String>, token: ScalingToken) -> Self {
        self.strategy.tokens.insert(name.into(), token);
        self
    }

    #[must_use]
    pub fn rounding(mut self, mode: RoundingMode, precision: f64) -> Self {
        self.strategy.rounding = RoundingConfig { mode, precision };
        self
    }

    #[must_use]
    pub fn accessibility(mut self, accessibility: AccessibilityConfig) -> Self {
        self.strategy.accessibility = accessibility;
        self
    }

    #[must_use]
    pub fn performance(mut self, performance: PerformanceConfig) -> Self {
        self.strategy.performance = performance;
        self
    }

    #[must_use]
    pub fn strategy(mut self, strategy: ScalingStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn build(self) -> Result<ResponsiveConfig> {
        let base = match &self.base_alias {
            Some(alias) => self
                .breakpoints
                .iter()
                .find(|bp| &bp.alias == alias)
                .cloned()
                .ok_or_else(|| ConfigError::BaseNotInBreakpoints(alias.clone()))?,
            None => self
                .breakpoints
                .last()
                .cloned()
                .ok_or(ConfigError::NoBreakpoints)?,
        };
        ResponsiveConfig::new(base, self.breakpoints, self.strategy)
    }
}
