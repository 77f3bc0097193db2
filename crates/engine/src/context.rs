use crate::cache::CacheStats;
use crate::capabilities::{CapabilityProvider, StaticCapabilities};
use crate::engine::ScalingEngine;
use crate::error::Result;
use responsive_config::{Breakpoint, ResponsiveConfig};

/// Host-owned view of the engine: which breakpoint is active right now.
///
/// A provider component (or any other host) owns one of these per session
/// and feeds it resize events. Resizes re-resolve the active breakpoint but
/// leave the value cache alone, since entries are keyed per breakpoint.
pub struct ResponsiveContext {
    engine: ScalingEngine,
    capabilities: Box<dyn CapabilityProvider>,
    active: String,
}

impl ResponsiveContext {
    /// Starts on the base breakpoint with no capabilities reported.
    pub fn new(engine: ScalingEngine) -> Self {
        Self::with_capabilities(engine, Box::new(StaticCapabilities::default()))
    }

    pub fn with_capabilities(
        engine: ScalingEngine,
        capabilities: Box<dyn CapabilityProvider>,
    ) -> Self {
        let active = engine.config().base().alias.clone();
        Self {
            engine,
            capabilities,
            active,
        }
    }

    pub fn engine(&self) -> &ScalingEngine {
        &self.engine
    }

    /// Resolves the viewport and makes the result the active breakpoint.
    pub fn resolve_breakpoint(&mut self, width: f64, height: f64) -> &Breakpoint {
        let probe = self.capabilities.capabilities();
        let alias = self
            .engine
            .resolve_breakpoint(width, height, Some(probe))
            .alias
            .clone();
        self.active = alias;
        self.active_breakpoint()
    }

    /// Debounced resize notification from the host. Returns true when the
    /// active breakpoint changed.
    pub fn on_resize(&mut self, width: f64, height: f64) -> bool {
        let previous = self.active.clone();
        let current = self.resolve_breakpoint(width, height).alias.clone();
        if current != previous {
            log::info!("Active breakpoint changed: {previous} -> {current}");
            true
        } else {
            false
        }
    }

    pub fn active_breakpoint(&self) -> &Breakpoint {
        let config = self.engine.config();
        config
            .breakpoint(&self.active)
            .unwrap_or_else(|| config.base())
    }

    /// Scaled value at `breakpoint`, or at the active breakpoint when `None`.
    pub fn get_value(
        &self,
        base_value: f64,
        token_name: &str,
        breakpoint: Option<&str>,
    ) -> Result<f64> {
        let alias = breakpoint.unwrap_or(self.active.as_str());
        self.engine.value(base_value, token_name, alias)
    }

    /// Replaces the config; falls back to the new base breakpoint when the
    /// active alias no longer exists.
    pub fn replace_config(&mut self, config: ResponsiveConfig) -> Result<()> {
        self.engine.replace_config(config)?;
        if self.engine.config().breakpoint(&self.active).is_none() {
            self.active = self.engine.config().base().alias.clone();
        }
        Ok(())
    }

    pub fn invalidate_cache(&self) {
        self.engine.invalidate_cache();
    }

    pub fn flush_cache(&self) {
        self.engine.flush_cache();
    }

    pub fn get_cache_stats(&self) -> CacheStats {
        self.engine.cache_stats()
    }
}

impl std::fmt::Debug for ResponsiveContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponsiveContext")
            .field("active", &self.active)
            .field("engine", &self.engine)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capabilities::Capabilities;
    use responsive_config::{BreakpointMetadata, ResponsiveConfigBuilder, ScalingToken};

    fn engine() -> ScalingEngine {
        let config = ResponsiveConfigBuilder::new()
            .breakpoint(Breakpoint::new("Mobile", "mobile", 390.0, 844.0))
            .breakpoint(Breakpoint::new("Tablet", "tablet", 768.0, 1024.0))
            .breakpoint(Breakpoint::new("Desktop", "desktop", 1920.0, 1080.0))
            .base("desktop")
            .token("spacing", ScalingToken::new(1.0).round(false))
            .build()
            .unwrap();
        ScalingEngine::new(config).unwrap()
    }

    #[test]
    fn starts_on_base_and_follows_resizes() {
        let mut ctx = ResponsiveContext::new(engine());
        assert_eq!(ctx.active_breakpoint().alias, "desktop");

        assert!(ctx.on_resize(400.0, 850.0));
        assert_eq!(ctx.active_breakpoint().alias, "mobile");
        assert!(!ctx.on_resize(395.0, 840.0));
    }

    #[test]
    fn get_value_defaults_to_active_breakpoint() {
        let mut ctx = ResponsiveContext::new(engine());
        let at_base = ctx.get_value(32.0, "spacing", None).unwrap();
        assert_eq!(at_base, 32.0);

        ctx.resolve_breakpoint(768.0, 1024.0);
        let at_tablet = ctx.get_value(32.0, "spacing", None).unwrap();
        assert_eq!(at_tablet, 32.0 * 768.0 / 1920.0);
        assert_eq!(ctx.get_value(32.0, "spacing", Some("desktop")).unwrap(), 32.0);
    }

    #[test]
    fn resize_keeps_cached_values() {
        let mut ctx = ResponsiveContext::new(engine());
        ctx.get_value(32.0, "spacing", None).unwrap();
        ctx.on_resize(390.0, 844.0);
        ctx.get_value(32.0, "spacing", None).unwrap();
        assert_eq!(ctx.get_cache_stats().size, 2);

        ctx.on_resize(1920.0, 1080.0);
        ctx.get_value(32.0, "spacing", None).unwrap();
        assert_eq!(ctx.get_cache_stats().hits, 1);
    }

    #[test]
    fn capability_provider_feeds_resolution() {
        let config = ResponsiveConfigBuilder::new()
            .breakpoint(
                Breakpoint::new("Laptop", "laptop", 1280.0, 800.0)
                    .with_metadata(BreakpointMetadata::new().capability("hover")),
            )
            .breakpoint(
                Breakpoint::new("Slate", "slate", 1280.0, 800.0)
                    .with_metadata(BreakpointMetadata::new().capability("touch")),
            )
            .base("laptop")
            .build()
            .unwrap();
        let engine = ScalingEngine::new(config).unwrap();
        let mut ctx = ResponsiveContext::with_capabilities(
            engine,
            Box::new(|| Capabilities::new(true, false)),
        );
        assert_eq!(ctx.resolve_breakpoint(1280.0, 800.0).alias, "slate");
    }

    #[test]
    fn replacing_config_resets_missing_active_alias() {
        let mut ctx = ResponsiveContext::new(engine());
        ctx.resolve_breakpoint(390.0, 844.0);
        let desktop_only = ResponsiveConfigBuilder::new()
            .breakpoint(Breakpoint::new("Desktop", "desktop", 1920.0, 1080.0))
            .token("spacing", ScalingToken::new(1.0))
            .build()
            .unwrap();
        ctx.replace_config(desktop_only).unwrap();
        assert_eq!(ctx.active_breakpoint().alias, "desktop");
        assert_eq!(ctx.engine().strategy_version(), 1);
    }
}
