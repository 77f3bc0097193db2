use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Custom scaling curve: `(base_value, ratio) -> value`.
pub trait ScalingFunction: Send + Sync {
    fn apply(&self, base_value: f64, ratio: f64) -> f64;
}

impl<F> ScalingFunction for F
where
    F: Fn(f64, f64) -> f64 + Send + Sync,
{
    fn apply(&self, base_value: f64, ratio: f64) -> f64 {
        self(base_value, ratio)
    }
}

/// Custom rounding rule: `(value, precision) -> value`.
pub trait RoundingFunction: Send + Sync {
    fn round(&self, value: f64, precision: f64) -> f64;
}

impl<F> RoundingFunction for F
where
    F: Fn(f64, f64) -> f64 + Send + Sync,
{
    fn round(&self, value: f64, precision: f64) -> f64 {
        self(value, precision)
    }
}

/// Resolves the identifiers a config uses for custom scaling and rounding.
///
/// Configs only carry identifiers, so they stay plain data; the host decides
/// what each identifier means.
#[derive(Clone, Default)]
pub struct StrategyRegistry {
    scaling: HashMap<String, Arc<dyn ScalingFunction>>,
    rounding: HashMap<String, Arc<dyn RoundingFunction>>,
}

impl StrategyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_scaling(
        &mut self,
        id: impl Into<String>,
        function: impl ScalingFunction + 'static,
    ) -> &mut Self {
        self.scaling.insert(id.into(), Arc::new(function));
        self
    }

    pub fn register_rounding(
        &mut self,
        id: impl Into<String>,
        function: impl RoundingFunction + 'static,
    ) -> &mut Self {
        self.rounding.insert(id.into(), Arc::new(function));
        self
    }

    pub fn scaling(&self, id: &str) -> Option<&dyn ScalingFunction> {
        self.scaling.get(id).map(|f| f.as_ref())
    }

    pub fn rounding(&self, id: &str) -> Option<&dyn RoundingFunction> {
        self.rounding.get(id).map(|f| f.as_ref())
    }
}

impl fmt::Debug for StrategyRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut scaling: Vec<_> = self.scaling.keys().collect();
        let mut rounding: Vec<_> = self.rounding.keys().collect();
        scaling.sort();
        rounding.sort();
        f.debug_struct("StrategyRegistry")
            .field("scaling", &scaling)
            .field("rounding", &rounding)
            .finish()
    }
}
