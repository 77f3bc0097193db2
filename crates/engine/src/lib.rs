//! # Responsive Engine
//!
//! Computes viewport-specific values from a single authored base value and a
//! declarative [`responsive_config::ResponsiveConfig`].
//!
//! ## Architecture
//!
//! ```text
//! viewport (w, h) + capabilities
//!     │
//!     ├──> BreakpointResolver (weighted width/height/aspect/capability score)
//!     │      └─> active Breakpoint (owned by ResponsiveContext)
//!     │
//!     └──> value(base, token, breakpoint)
//!            ├─ ValueCache hit ──────────────> value
//!            └─ miss
//!                 ├─ ScalingComputer (ratio → mode → clamp → step → round)
//!                 ├─ AccessibilityEnforcer (font / tap-target floors)
//!                 └─ ValueCache insert (memory LRU or persisted store)
//! ```
//!
//! ## Example
//!
//! ```
//! use responsive_config::{Breakpoint, ResponsiveConfigBuilder, RoundingMode, ScalingToken};
//! use responsive_engine::{ResponsiveContext, ScalingEngine};
//!
//! let config = ResponsiveConfigBuilder::new()
//!     .breakpoint(Breakpoint::new("Mobile", "mobile", 390.0, 844.0))
//!     .breakpoint(Breakpoint::new("Desktop", "desktop", 1920.0, 1080.0))
//!     .base("desktop")
//!     .rounding(RoundingMode::Nearest, 0.1)
//!     .token("fontSize", ScalingToken::new(0.85).min(12.0).max(48.0))
//!     .build()?;
//!
//! let mut ctx = ResponsiveContext::new(ScalingEngine::new(config)?);
//! ctx.resolve_breakpoint(390.0, 844.0);
//! assert_eq!(ctx.get_value(48.0, "fontSize", None)?, 12.0);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod accessibility;
mod cache;
mod capabilities;
mod context;
mod engine;
mod error;
mod registry;
mod resolver;
mod scaling;

pub use accessibility::AccessibilityEnforcer;
pub use cache::{
    CacheKey, CacheStats, FileStore, MemoryStore, PersistedRecord, PersistedStore, ValueCache,
};
pub use capabilities::{Capabilities, CapabilityProvider, StaticCapabilities};
pub use context::ResponsiveContext;
pub use engine::ScalingEngine;
pub use error::{CacheError, EngineError, Result, ValidationError};
pub use registry::{RoundingFunction, ScalingFunction, StrategyRegistry};
pub use resolver::{BreakpointResolver, BreakpointScore, ScoringWeights};
pub use scaling::{ratio, safe_default, validate_base_value, ScalingComputer};
