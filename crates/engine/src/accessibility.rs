use responsive_config::{ScalingStrategy, ScalingToken, TokenKind};

/// Raises scaled values to the configured legibility and tap-target floors.
///
/// Runs after clamping, stepping and rounding. The floor wins over
/// `token.max`: a font token capped at 10 with `minFontSize = 12` yields 12.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessibilityEnforcer;

impl AccessibilityEnforcer {
    pub fn enforce(
        &self,
        value: f64,
        _token: &ScalingToken,
        kind: TokenKind,
        strategy: &ScalingStrategy,
    ) -> f64 {
        let floor = match kind {
            TokenKind::Legibility => strategy.accessibility.min_font_size,
            TokenKind::TapTarget => strategy.accessibility.min_tap_target,
            TokenKind::Other => return value,
        };
        if value < floor {
            log::debug!("Raised {kind:?} value {value} to accessibility floor {floor}");
            floor
        } else {
            value
        }
    }

    /// Forwarded to styling collaborators untouched.
    pub fn contrast_preservation(&self, strategy: &ScalingStrategy) -> bool {
        strategy.accessibility.contrast_preservation
    }
}
