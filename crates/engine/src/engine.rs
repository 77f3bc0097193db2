use crate::accessibility::AccessibilityEnforcer;
use crate::cache::{CacheStats, PersistedStore, ValueCache};
use crate::capabilities::Capabilities;
use crate::error::{EngineError, Result, ValidationError};
use crate::registry::StrategyRegistry;
use crate::resolver::{BreakpointResolver, ScoringWeights};
use crate::scaling::{safe_default, validate_base_value, ScalingComputer};
use responsive_config::{
    Breakpoint, CacheStrategy, ResponsiveConfig, RoundingMode, ScalingMode, ScalingToken,
};
use std::sync::atomic::{AtomicBool, Ordering};

/// Resolution, scaling, caching and accessibility behind one validated config.
///
/// The engine holds no notion of a "current" breakpoint; see
/// [`crate::ResponsiveContext`] for the host-owned view of that.
#[derive(Debug)]
pub struct ScalingEngine {
    config: ResponsiveConfig,
    registry: StrategyRegistry,
    resolver: BreakpointResolver,
    enforcer: AccessibilityEnforcer,
    cache: ValueCache,
    validation_warned: AtomicBool,
}

impl ScalingEngine {
    pub fn new(config: ResponsiveConfig) -> Result<Self> {
        Self::with_registry(config, StrategyRegistry::new())
    }

    pub fn with_registry(config: ResponsiveConfig, registry: StrategyRegistry) -> Result<Self> {
        validate_registry(&config, &registry)?;
        let performance = &config.strategy().performance;
        if performance.cache_strategy == CacheStrategy::Persisted {
            log::debug!("Persisted cache requested without a store; caching in memory");
        }
        let cache = ValueCache::memory(performance.cache_capacity);
        Ok(Self::assemble(config, registry, cache))
    }

    /// Uses `store` when the config asks for the persisted cache strategy.
    pub fn with_persisted_store(
        config: ResponsiveConfig,
        registry: StrategyRegistry,
        store: Box<dyn PersistedStore>,
    ) -> Result<Self> {
        validate_registry(&config, &registry)?;
        let performance = &config.strategy().performance;
        let cache = match performance.cache_strategy {
            CacheStrategy::Persisted => {
                ValueCache::persisted(store, config.fingerprint(), performance.cache_capacity)
            }
            CacheStrategy::Memory => ValueCache::memory(performance.cache_capacity),
        };
        Ok(Self::assemble(config, registry, cache))
    }

    fn assemble(config: ResponsiveConfig, registry: StrategyRegistry, cache: ValueCache) -> Self {
        log::info!(
            "Scaling engine ready: {} breakpoints, {} tokens, base '{}'",
            config.breakpoints().len(),
            config.strategy().tokens.len(),
            config.base().alias
        );
        Self {
            config,
            registry,
            resolver: BreakpointResolver::default(),
            enforcer: AccessibilityEnforcer,
            cache,
            validation_warned: AtomicBool::new(false),
        }
    }

    #[must_use]
    pub fn with_scoring_weights(mut self, weights: ScoringWeights) -> Self {
        self.resolver = BreakpointResolver::new(weights);
        self
    }

    pub fn config(&self) -> &ResponsiveConfig {
        &self.config
    }

    pub fn registry(&self) -> &StrategyRegistry {
        &self.registry
    }

    pub fn resolve_breakpoint(
        &self,
        width: f64,
        height: f64,
        capabilities: Option<Capabilities>,
    ) -> &Breakpoint {
        self.resolver.resolve(width, height, &self.config, capabilities)
    }

    /// Scaled value of `base_value` for `token_name` at the breakpoint `alias`.
    ///
    /// Unknown tokens and breakpoints are errors. Invalid base values are not:
    /// they are logged once per engine and answered with a safe default.
    pub fn value(&self, base_value: f64, token_name: &str, alias: &str) -> Result<f64> {
        let token = self
            .config
            .strategy()
            .token(token_name)
            .ok_or_else(|| EngineError::UnknownToken(token_name.to_string()))?;
        let target = self
            .config
            .breakpoint(alias)
            .ok_or_else(|| EngineError::UnknownBreakpoint(alias.to_string()))?;

        if let Err(err) = validate_base_value(base_value) {
            self.warn_validation_once(token_name, err);
            let fallback = safe_default(base_value, token);
            return Ok(self.enforce(fallback, token_name, token));
        }

        let compute = || self.compute(base_value, token_name, token, target);
        if !self.config.strategy().performance.memoization {
            return Ok(compute());
        }
        let key = self.cache.key(token_name, base_value, alias);
        Ok(self.cache.get_or_compute(&key, compute))
    }

    fn compute(
        &self,
        base_value: f64,
        token_name: &str,
        token: &ScalingToken,
        target: &Breakpoint,
    ) -> f64 {
        let strategy = self.config.strategy();
        let scaled = ScalingComputer::new(&self.registry).compute(
            base_value,
            token,
            target,
            self.config.base(),
            strategy,
        );
        self.enforce(scaled, token_name, token)
    }

    fn enforce(&self, value: f64, token_name: &str, token: &ScalingToken) -> f64 {
        self.enforcer.enforce(
            value,
            token,
            token.kind_for(token_name),
            self.config.strategy(),
        )
    }

    /// Returns true only for the call that actually logged.
    fn warn_validation_once(&self, token_name: &str, err: ValidationError) -> bool {
        let first = !self.validation_warned.swap(true, Ordering::Relaxed);
        if first {
            log::warn!("Invalid value for token '{token_name}', serving safe default: {err}");
        }
        first
    }

    /// Fills the cache for every breakpoint. No-op unless both memoization
    /// and `precomputeValues` are enabled. Returns the number of values
    /// requested.
    pub fn precompute(&self, values: &[(&str, f64)]) -> Result<usize> {
        let performance = &self.config.strategy().performance;
        if !(performance.memoization && performance.precompute_values) {
            return Ok(0);
        }
        let mut count = 0;
        for &(token_name, base_value) in values {
            for bp in self.config.breakpoints() {
                self.value(base_value, token_name, &bp.alias)?;
                count += 1;
            }
        }
        log::debug!("Precomputed {count} responsive values");
        Ok(count)
    }

    /// Swaps in a new config and invalidates every cached value. On error the
    /// current config stays in service.
    pub fn replace_config(&mut self, config: ResponsiveConfig) -> Result<()> {
        validate_registry(&config, &self.registry)?;
        let namespace = config.fingerprint();
        self.config = config;
        self.cache.bump_version(Some(&namespace));
        Ok(())
    }

    pub fn invalidate_cache(&self) {
        self.cache.invalidate();
    }

    /// Writes cached values to the persisted store. Also happens on config
    /// replacement, invalidation and drop; hosts call this at idle points.
    pub fn flush_cache(&self) {
        self.cache.flush();
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn strategy_version(&self) -> u64 {
        self.cache.version()
    }

    pub fn is_cache_degraded(&self) -> bool {
        self.cache.is_degraded()
    }

    pub fn contrast_preservation(&self) -> bool {
        self.enforcer.contrast_preservation(self.config.strategy())
    }
}

/// Every identifier the config mentions must be registered.
fn validate_registry(config: &ResponsiveConfig, registry: &StrategyRegistry) -> Result<()> {
    let strategy = config.strategy();

    for (name, token) in &strategy.tokens {
        if let Some(id) = token.function_id() {
            if registry.scaling(id).is_none() {
                return Err(EngineError::UnknownScalingFunction {
                    token: name.clone(),
                    id: id.to_string(),
                });
            }
        }
    }

    if let ScalingMode::Custom(id) = &strategy.mode {
        if registry.scaling(id).is_none() {
            return Err(EngineError::UnknownScalingFunction {
                token: "*".to_string(),
                id: id.clone(),
            });
        }
    }

    if let RoundingMode::Custom(id) = &strategy.rounding.mode {
        if registry.rounding(id).is_none() {
            return Err(EngineError::UnknownRoundingFunction(id.clone()));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use responsive_config::{PerformanceConfig, ResponsiveConfigBuilder};

    fn builder() -> ResponsiveConfigBuilder {
        ResponsiveConfigBuilder::new()
            .breakpoint(Breakpoint::new("Mobile", "mobile", 390.0, 844.0))
            .breakpoint(Breakpoint::new("Tablet", "tablet", 768.0, 1024.0))
            .breakpoint(Breakpoint::new("Desktop", "desktop", 1920.0, 1080.0))
            .base("desktop")
            .rounding(RoundingMode::Nearest, 0.1)
            .token("fontSize", ScalingToken::new(0.85).min(12.0).max(48.0))
            .token("spacing", ScalingToken::new(1.0))
    }

    #[test]
    fn unknown_token_and_breakpoint_are_errors() {
        let engine = ScalingEngine::new(builder().build().unwrap()).unwrap();
        assert!(matches!(
            engine.value(16.0, "zIndex", "mobile"),
            Err(EngineError::UnknownToken(_))
        ));
        assert!(matches!(
            engine.value(16.0, "spacing", "watch"),
            Err(EngineError::UnknownBreakpoint(_))
        ));
    }

    #[test]
    fn unregistered_identifiers_are_rejected_at_construction() {
        let config = builder()
            .token("radius", ScalingToken::with_function("soft"))
            .build()
            .unwrap();
        assert!(matches!(
            ScalingEngine::new(config),
            Err(EngineError::UnknownScalingFunction { .. })
        ));

        let config = builder()
            .rounding(RoundingMode::Custom("banker".into()), 1.0)
            .build()
            .unwrap();
        assert!(matches!(
            ScalingEngine::new(config),
            Err(EngineError::UnknownRoundingFunction(_))
        ));

        let config = builder()
            .mode(ScalingMode::Custom("curve".into()))
            .build()
            .unwrap();
        let mut registry = StrategyRegistry::new();
        registry.register_scaling("curve", |base: f64, ratio: f64| base * ratio);
        assert!(ScalingEngine::with_registry(config, registry).is_ok());
    }

    #[test]
    fn invalid_base_values_are_recovered() {
        let engine = ScalingEngine::new(builder().build().unwrap()).unwrap();
        assert_eq!(engine.value(-4.0, "spacing", "mobile").unwrap(), -4.0);
        assert_eq!(engine.value(f64::NAN, "spacing", "mobile").unwrap(), 0.0);
        // Font floors still apply to the fallback.
        assert_eq!(engine.value(f64::NAN, "fontSize", "mobile").unwrap(), 12.0);
        assert_eq!(engine.cache_stats().size, 0);
    }

    #[test]
    fn invalid_base_value_warning_is_logged_once() {
        let engine = ScalingEngine::new(builder().build().unwrap()).unwrap();
        let err = ValidationError::NonFiniteBaseValue(f64::NAN);
        assert!(engine.warn_validation_once("spacing", err));

        let engine = ScalingEngine::new(builder().build().unwrap()).unwrap();
        engine.value(-1.0, "spacing", "mobile").unwrap();
        engine.value(f64::INFINITY, "fontSize", "tablet").unwrap();
        assert!(engine.validation_warned.load(Ordering::Relaxed));
        assert!(!engine.warn_validation_once("spacing", err));
    }

    #[test]
    fn memoization_off_skips_the_cache() {
        let config = builder()
            .performance(PerformanceConfig {
                memoization: false,
                ..PerformanceConfig::default()
            })
            .build()
            .unwrap();
        let engine = ScalingEngine::new(config).unwrap();
        engine.value(16.0, "spacing", "tablet").unwrap();
        engine.value(16.0, "spacing", "tablet").unwrap();
        assert_eq!(engine.cache_stats().size, 0);
        assert_eq!(engine.cache_stats().hits, 0);
    }

    #[test]
    fn precompute_respects_the_flag() {
        let engine = ScalingEngine::new(builder().build().unwrap()).unwrap();
        assert_eq!(engine.precompute(&[("fontSize", 48.0)]).unwrap(), 0);

        let config = builder()
            .performance(PerformanceConfig {
                precompute_values: true,
                ..PerformanceConfig::default()
            })
            .build()
            .unwrap();
        let engine = ScalingEngine::new(config).unwrap();
        assert_eq!(
            engine
                .precompute(&[("fontSize", 48.0), ("spacing", 16.0)])
                .unwrap(),
            6
        );
        assert_eq!(engine.cache_stats().size, 6);
        engine.value(48.0, "fontSize", "tablet").unwrap();
        assert_eq!(engine.cache_stats().hits, 1);
    }

    #[test]
    fn rejected_replacement_keeps_current_config() {
        let mut engine = ScalingEngine::new(builder().build().unwrap()).unwrap();
        let bad = builder()
            .token("radius", ScalingToken::with_function("soft"))
            .build()
            .unwrap();
        assert!(engine.replace_config(bad).is_err());
        assert_eq!(engine.strategy_version(), 0);
        assert!(engine.config().strategy().token("radius").is_none());
    }
}
