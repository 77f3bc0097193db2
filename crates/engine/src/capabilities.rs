use serde::{Deserialize, Serialize};

/// Runtime capability probe result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Capabilities {
    pub touch: bool,
    pub hover: bool,
}

impl Capabilities {
    pub const TOUCH: &'static str = "touch";
    pub const HOVER: &'static str = "hover";

    pub fn new(touch: bool, hover: bool) -> Self {
        Self { touch, hover }
    }

    /// Names of the capabilities that are present.
    pub fn names(&self) -> impl Iterator<Item = &'static str> {
        [(self.touch, Self::TOUCH), (self.hover, Self::HOVER)]
            .into_iter()
            .filter_map(|(present, name)| present.then_some(name))
    }
}

/// Injected by the host in place of browser-specific probing.
pub trait CapabilityProvider: Send + Sync {
    fn capabilities(&self) -> Capabilities;
}

/// Provider that always reports the same capabilities.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticCapabilities(pub Capabilities);

impl CapabilityProvider for StaticCapabilities {
    fn capabilities(&self) -> Capabilities {
        self.0
    }
}

impl<F> CapabilityProvider for F
where
    F: Fn() -> Capabilities + Send + Sync,
{
    fn capabilities(&self) -> Capabilities {
        self()
    }
}
