use crate::error::ValidationError;
use crate::registry::StrategyRegistry;
use responsive_config::{Breakpoint, RoundingMode, ScalingMode, ScalingStrategy, ScalingToken};

const GOLDEN_RATIO: f64 = 1.618;

/// Pure mapping from an authored base value to its value at a breakpoint.
///
/// Pipeline: ratio → mode → clamp (min, then max) → step → rounding.
/// Every call starts from the base value, so switching breakpoints back and
/// forth never accumulates floating point drift.
#[derive(Debug, Clone, Copy)]
pub struct ScalingComputer<'a> {
    registry: &'a StrategyRegistry,
}

impl<'a> ScalingComputer<'a> {
    pub fn new(registry: &'a StrategyRegistry) -> Self {
        Self { registry }
    }

    /// Scales `base_value` for `target`.
    ///
    /// Invalid base values (negative, NaN, infinite) never panic here; the
    /// safe default from [`safe_default`] is returned instead.
    pub fn compute(
        &self,
        base_value: f64,
        token: &ScalingToken,
        target: &Breakpoint,
        base: &Breakpoint,
        strategy: &ScalingStrategy,
    ) -> f64 {
        if validate_base_value(base_value).is_err() {
            return safe_default(base_value, token);
        }

        let ratio = ratio(target, base, strategy);
        let scaled = self.apply_mode(base_value, ratio, token, &strategy.mode);
        if !scaled.is_finite() {
            log::warn!("Scaling produced non-finite value for base {base_value} at ratio {ratio}");
            return safe_default(base_value, token);
        }

        let clamped = clamp(scaled, token);
        let stepped = token.step.map_or(clamped, |step| snap(clamped, step, f64::round));
        if token.round {
            self.round(stepped, strategy)
        } else {
            stepped
        }
    }

    fn apply_mode(
        &self,
        base_value: f64,
        ratio: f64,
        token: &ScalingToken,
        mode: &ScalingMode,
    ) -> f64 {
        let scale = token.scale_factor();

        if let Some(id) = token.function_id() {
            return match self.registry.scaling(id) {
                Some(function) => function.apply(base_value, ratio),
                None => {
                    log::warn!("Scaling function '{id}' is not registered; using linear");
                    base_value * ratio * scale
                }
            };
        }

        match mode {
            ScalingMode::Linear => base_value * ratio * scale,
            ScalingMode::Exponential => base_value * ratio.powf(scale),
            ScalingMode::Logarithmic => {
                let ratio = if ratio > 0.0 { ratio } else { 1.0 };
                base_value * (1.0 + ratio.ln()) * scale
            }
            ScalingMode::GoldenRatio => base_value * ratio.powf(1.0 / GOLDEN_RATIO),
            // Registered curves own the whole mapping; the token scale is not applied.
            ScalingMode::Custom(id) => match self.registry.scaling(id) {
                Some(function) => function.apply(base_value, ratio),
                None => {
                    log::warn!("Scaling mode '{id}' is not registered; using linear");
                    base_value * ratio * scale
                }
            },
        }
    }

    fn round(&self, value: f64, strategy: &ScalingStrategy) -> f64 {
        let precision = strategy.rounding.precision;
        match &strategy.rounding.mode {
            RoundingMode::Nearest => snap(value, precision, f64::round),
            RoundingMode::Up => snap(value, precision, f64::ceil),
            RoundingMode::Down => snap(value, precision, f64::floor),
            RoundingMode::Custom(id) => match self.registry.rounding(id) {
                Some(function) => function.round(value, precision),
                None => {
                    log::warn!("Rounding function '{id}' is not registered; rounding to nearest");
                    snap(value, precision, f64::round)
                }
            },
        }
    }
}

/// Ratio between the origin values of `target` and `base`; 1.0 when undefined.
pub fn ratio(target: &Breakpoint, base: &Breakpoint, strategy: &ScalingStrategy) -> f64 {
    let base_origin = strategy.origin.value(base.width, base.height);
    let target_origin = strategy.origin.value(target.width, target.height);
    let ratio = target_origin / base_origin;
    if base_origin > 0.0 && ratio.is_finite() {
        ratio
    } else {
        1.0
    }
}

pub fn validate_base_value(base_value: f64) -> Result<(), ValidationError> {
    if !base_value.is_finite() {
        return Err(ValidationError::NonFiniteBaseValue(base_value));
    }
    if base_value < 0.0 {
        return Err(ValidationError::NegativeBaseValue(base_value));
    }
    Ok(())
}

/// Value served when scaling cannot run: the unscaled base value when it is
/// a number, otherwise the token minimum (or zero).
pub fn safe_default(base_value: f64, token: &ScalingToken) -> f64 {
    if base_value.is_finite() {
        base_value
    } else {
        token.min.unwrap_or(0.0)
    }
}

fn clamp(value: f64, token: &ScalingToken) -> f64 {
    let mut value = value;
    if let Some(min) = token.min {
        value = value.max(min);
    }
    if let Some(max) = token.max {
        value = value.min(max);
    }
    value
}

/// Snaps `value` to a multiple of `unit` using `op` on the quotient.
fn snap(value: f64, unit: f64, op: fn(f64) -> f64) -> f64 {
    let steps = op(value / unit);
    let inverse = 1.0 / unit;
    // Dividing by an integral inverse keeps decimal units exact (408 / 10 == 40.8).
    if inverse.fract() == 0.0 {
        steps / inverse
    } else {
        steps * unit
    }
}
