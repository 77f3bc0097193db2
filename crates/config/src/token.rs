use serde::{Deserialize, Serialize};

/// Scaling rule shared by a named class of design values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScalingToken {
    pub scale: TokenScale,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,

    /// Quantization step; results snap to the nearest multiple
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,

    /// When false the strategy rounding step is skipped for this token
    #[serde(default = "default_round")]
    pub round: bool,

    /// CSS unit the host appends (e.g., "px", "rem")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,

    /// Explicit accessibility classification; inferred from the token name when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<TokenKind>,
}

fn default_round() -> bool {
    true
}

impl ScalingToken {
    pub fn new(scale: f64) -> Self {
        Self {
            scale: TokenScale::Factor(scale),
            min: None,
            max: None,
            step: None,
            round: true,
            unit: None,
            kind: None,
        }
    }

    /// Token scaled by a function registered under `id`.
    pub fn with_function(id: impl Into<String>) -> Self {
        Self {
            scale: TokenScale::Function(id.into()),
            ..Self::new(1.0)
        }
    }

    #[must_use]
    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    #[must_use]
    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    #[must_use]
    pub fn step(mut self, step: f64) -> Self {
        self.step = Some(step);
        self
    }

    #[must_use]
    pub fn round(mut self, round: bool) -> Self {
        self.round = round;
        self
    }

    #[must_use]
    pub fn unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    #[must_use]
    pub fn kind(mut self, kind: TokenKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Numeric scale factor; function-backed tokens report 1.0.
    pub fn scale_factor(&self) -> f64 {
        match self.scale {
            TokenScale::Factor(factor) => factor,
            TokenScale::Function(_) => 1.0,
        }
    }

    pub fn function_id(&self) -> Option<&str> {
        match &self.scale {
            TokenScale::Factor(_) => None,
            TokenScale::Function(id) => Some(id),
        }
    }

    /// Declared kind, or the kind implied by `name`.
    pub fn kind_for(&self, name: &str) -> TokenKind {
        self.kind.unwrap_or_else(|| TokenKind::infer(name))
    }
}

/// `0.85` on the wire is a factor, `"ease-out"` a registered function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TokenScale {
    Factor(f64),
    Function(String),
}

/// Which accessibility floor, if any, applies to a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TokenKind {
    /// Text size; floored at `minFontSize`
    Legibility,
    /// Interactive hit area; floored at `minTapTarget`
    TapTarget,
    Other,
}

impl TokenKind {
    pub fn infer(name: &str) -> Self {
        let lower = name.to_ascii_lowercase();
        if lower.contains("font") {
            return Self::Legibility;
        }
        if ["tap", "touch", "hit", "target"]
            .iter()
            .any(|needle| lower.contains(needle))
        {
            return Self::TapTarget;
        }
        Self::Other
    }
}
