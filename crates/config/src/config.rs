use crate::breakpoint::Breakpoint;
use crate::error::{ConfigError, Result};
use crate::preset;
use crate::strategy::ScalingStrategy;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::path::Path;

/// Validated, immutable scaling configuration.
///
/// Every constructor (JSON, builder, [`ResponsiveConfig::new`]) runs the same
/// validation, so holding a `ResponsiveConfig` means it is safe to serve from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawConfig", into = "RawConfig")]
pub struct ResponsiveConfig {
    base: Breakpoint,
    breakpoints: Vec<Breakpoint>,
    strategy: ScalingStrategy,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawConfig {
    base: Breakpoint,
    #[serde(default)]
    breakpoints: Vec<Breakpoint>,
    #[serde(default)]
    strategy: ScalingStrategy,
}

impl TryFrom<RawConfig> for ResponsiveConfig {
    type Error = ConfigError;

    fn try_from(raw: RawConfig) -> Result<Self> {
        Self::new(raw.base, raw.breakpoints, raw.strategy)
    }
}

impl From<ResponsiveConfig> for RawConfig {
    fn from(config: ResponsiveConfig) -> Self {
        Self {
            base: config.base,
            breakpoints: config.breakpoints,
            strategy: config.strategy,
        }
    }
}

impl ResponsiveConfig {
    pub fn new(
        base: Breakpoint,
        breakpoints: Vec<Breakpoint>,
        strategy: ScalingStrategy,
    ) -> Result<Self> {
        let config = Self {
            base,
            breakpoints,
            strategy,
        };
        config.validate()?;
        Ok(config)
    }

    /// Mobile, tablet, laptop and desktop (base) with a typical token table.
    pub fn default_preset() -> Self {
        let breakpoints = preset::breakpoints();
        let base = breakpoints
            .iter()
            .find(|bp| bp.alias == preset::BASE_ALIAS)
            .cloned()
            .unwrap_or_else(|| breakpoints[breakpoints.len() - 1].clone());
        Self {
            base,
            breakpoints,
            strategy: preset::strategy(),
        }
    }

    /// Parses and validates a JSON config. Validation failures keep their
    /// specific [`ConfigError`] variant; only malformed JSON is a `ParseError`.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: RawConfig = serde_json::from_str(json)?;
        let config = Self::try_from(raw)?;
        log::debug!(
            "Loaded responsive config: {} breakpoints, {} tokens",
            config.breakpoints.len(),
            config.strategy.tokens.len()
        );
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json).inspect_err(|err| {
            log::warn!("Rejected responsive config {}: {err}", path.display());
        })
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn base(&self) -> &Breakpoint {
        &self.base
    }

    pub fn breakpoints(&self) -> &[Breakpoint] {
        &self.breakpoints
    }

    pub fn breakpoint(&self, alias: &str) -> Option<&Breakpoint> {
        self.breakpoints.iter().find(|bp| bp.alias == alias)
    }

    pub fn strategy(&self) -> &ScalingStrategy {
        &self.strategy
    }

    /// Short hex digest of the canonical JSON form.
    ///
    /// Two configs with the same fingerprint scale every value identically,
    /// which makes it a safe namespace for persisted cache entries.
    pub fn fingerprint(&self) -> String {
        let canonical = serde_json::to_vec(self).unwrap_or_default();
        let digest = Sha256::digest(&canonical);
        digest[..8].iter().map(|b| format!("{b:02x}")).collect()
    }

    fn validate(&self) -> Result<()> {
        if self.breakpoints.is_empty() {
            return Err(ConfigError::NoBreakpoints);
        }

        let mut seen = HashSet::new();
        for bp in &self.breakpoints {
            validate_breakpoint(bp)?;
            if !seen.insert(bp.alias.as_str()) {
                return Err(ConfigError::DuplicateAlias(bp.alias.clone()));
            }
        }

        validate_breakpoint(&self.base)?;
        match self.breakpoint(&self.base.alias) {
            None => return Err(ConfigError::BaseNotInBreakpoints(self.base.alias.clone())),
            Some(entry) if entry.width != self.base.width || entry.height != self.base.height => {
                return Err(ConfigError::BaseMismatch(self.base.alias.clone()));
            }
            Some(_) => {}
        }

        self.validate_strategy()
    }

    fn validate_strategy(&self) -> Result<()> {
        let strategy = &self.strategy;

        for (name, token) in &strategy.tokens {
            if !token.scale_factor().is_finite() {
                return Err(ConfigError::InvalidScale {
                    token: name.clone(),
                });
            }
            if let (Some(min), Some(max)) = (token.min, token.max) {
                if min > max {
                    return Err(ConfigError::InvalidTokenBounds {
                        token: name.clone(),
                        min,
                        max,
                    });
                }
            }
            if let Some(step) = token.step {
                if !(step > 0.0 && step.is_finite()) {
                    return Err(ConfigError::InvalidStep {
                        token: name.clone(),
                        step,
                    });
                }
            }
        }

        if strategy.performance.cache_capacity == Some(0) {
            return Err(ConfigError::InvalidCacheCapacity);
        }

        let precision = strategy.rounding.precision;
        if !(precision > 0.0 && precision.is_finite()) {
            return Err(ConfigError::InvalidPrecision(precision));
        }

        let a11y = &strategy.accessibility;
        for (field, value) in [
            ("minFontSize", a11y.min_font_size),
            ("minTapTarget", a11y.min_tap_target),
        ] {
            if !(value >= 0.0 && value.is_finite()) {
                return Err(ConfigError::InvalidAccessibility { field, value });
            }
        }

        Ok(())
    }
}

fn validate_breakpoint(bp: &Breakpoint) -> Result<()> {
    if bp.alias.trim().is_empty() {
        return Err(ConfigError::EmptyAlias {
            name: bp.name.clone(),
        });
    }
    let valid = |v: f64| v > 0.0 && v.is_finite();
    if !valid(bp.width) || !valid(bp.height) {
        return Err(ConfigError::InvalidDimensions {
            alias: bp.alias.clone(),
            width: bp.width,
            height: bp.height,
        });
    }
    Ok(())
}
