//! # Responsive Config
//!
//! Data model for the responsive scaling engine: breakpoints, scaling tokens
//! and the strategy that ties them together.
//!
//! ## Features
//!
//! - **Pure data** - configs are JSON (camelCase keys) or built with [`ResponsiveConfigBuilder`]
//! - **Validated once** - every [`ResponsiveConfig`] in hand has passed validation
//! - **Fingerprinted** - [`ResponsiveConfig::fingerprint`] namespaces persisted caches
//!
//! ## Example
//!
//! ```
//! use responsive_config::{ResponsiveConfig, TokenKind};
//!
//! let json = r#"{
//!     "base": {"name": "Desktop", "alias": "desktop", "width": 1920, "height": 1080},
//!     "breakpoints": [
//!         {"name": "Mobile", "alias": "mobile", "width": 390, "height": 844},
//!         {"name": "Desktop", "alias": "desktop", "width": 1920, "height": 1080}
//!     ],
//!     "strategy": {
//!         "origin": "width",
//!         "mode": "linear",
//!         "tokens": {"fontSize": {"scale": 0.85, "min": 12, "max": 48}},
//!         "rounding": {"mode": "nearest", "precision": 0.5}
//!     }
//! }"#;
//!
//! let config = ResponsiveConfig::from_json_str(json).unwrap();
//! let token = config.strategy().token("fontSize").unwrap();
//! assert_eq!(token.kind_for("fontSize"), TokenKind::Legibility);
//! ```

mod breakpoint;
mod builder;
mod config;
mod error;
mod preset;
mod strategy;
mod token;

pub use breakpoint::{Breakpoint, BreakpointMetadata, DeviceType, Orientation};
pub use builder::ResponsiveConfigBuilder;
pub use config::ResponsiveConfig;
pub use error::{ConfigError, Result};
pub use strategy::{
    AccessibilityConfig, CacheStrategy, Origin, PerformanceConfig, RoundingConfig, RoundingMode,
    ScalingMode, ScalingStrategy,
};
pub use token::{ScalingToken, TokenKind, TokenScale};
