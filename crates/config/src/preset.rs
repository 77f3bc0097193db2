//! Stock device set and token table used when a host supplies no config.

use crate::breakpoint::{Breakpoint, BreakpointMetadata, DeviceType, Orientation};
use crate::strategy::ScalingStrategy;
use crate::token::{ScalingToken, TokenKind};

pub(crate) const BASE_ALIAS: &str = "desktop";

pub(crate) fn breakpoints() -> Vec<Breakpoint> {
    vec![
        Breakpoint::new("Mobile", "mobile", 390.0, 844.0).with_metadata(
            BreakpointMetadata::new()
                .orientation(Orientation::Portrait)
                .device_type(DeviceType::Mobile)
                .capability("touch")
                .pixel_density(3.0),
        ),
        Breakpoint::new("Tablet", "tablet", 768.0, 1024.0).with_metadata(
            BreakpointMetadata::new()
                .orientation(Orientation::Portrait)
                .device_type(DeviceType::Tablet)
                .capability("touch")
                .pixel_density(2.0),
        ),
        Breakpoint::new("Laptop", "laptop", 1366.0, 768.0).with_metadata(
            BreakpointMetadata::new()
                .orientation(Orientation::Landscape)
                .device_type(DeviceType::Laptop)
                .capability("hover")
                .pixel_density(1.0),
        ),
        Breakpoint::new("Desktop", BASE_ALIAS, 1920.0, 1080.0).with_metadata(
            BreakpointMetadata::new()
                .orientation(Orientation::Landscape)
                .device_type(DeviceType::Desktop)
                .capability("hover")
                .pixel_density(1.0),
        ),
    ]
}

pub(crate) fn strategy() -> ScalingStrategy {
    let mut strategy = ScalingStrategy::default();
    let tokens = [
        ("fontSize", ScalingToken::new(0.85).min(12.0).max(48.0).unit("px")),
        ("lineHeight", ScalingToken::new(0.9).min(1.0).round(false)),
        ("spacing", ScalingToken::new(0.9).step(2.0).unit("px")),
        ("radius", ScalingToken::new(0.95).unit("px")),
        ("shadow", ScalingToken::new(0.8).unit("px")),
        (
            "tapTarget",
            ScalingToken::new(1.0).kind(TokenKind::TapTarget).unit("px"),
        ),
    ];
    for (name, token) in tokens {
        strategy.tokens.insert(name.to_string(), token);
    }
    strategy
}
