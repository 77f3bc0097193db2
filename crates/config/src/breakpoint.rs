use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Named reference viewport used as an interpolation anchor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Breakpoint {
    /// Human readable name (e.g., "iPhone 14")
    pub name: String,

    /// Viewport width in CSS pixels
    pub width: f64,

    /// Viewport height in CSS pixels
    pub height: f64,

    /// Short identifier, unique within a config (e.g., "mobile")
    pub alias: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<BreakpointMetadata>,
}

impl Breakpoint {
    pub fn new(name: impl Into<String>, alias: impl Into<String>, width: f64, height: f64) -> Self {
        Self {
            name: name.into(),
            width,
            height,
            alias: alias.into(),
            metadata: None,
        }
    }

    #[must_use]
    pub fn with_metadata(mut self, metadata: BreakpointMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Declared orientation, or the one implied by the dimensions.
    pub fn orientation(&self) -> Orientation {
        self.metadata
            .as_ref()
            .and_then(|m| m.orientation)
            .unwrap_or_else(|| Orientation::of(self.width, self.height))
    }

    /// Capability names declared for this breakpoint (empty when unspecified).
    pub fn capabilities(&self) -> impl Iterator<Item = &str> {
        self.metadata
            .iter()
            .flat_map(|m| m.capabilities.iter().map(String::as_str))
    }

    pub fn has_capability(&self, capability: &str) -> bool {
        self.metadata
            .as_ref()
            .is_some_and(|m| m.capabilities.contains(capability))
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.width / self.height
    }
}

/// Optional hints attached to a breakpoint.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakpointMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orientation: Option<Orientation>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_type: Option<DeviceType>,

    /// Capability names such as "touch" or "hover"
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub capabilities: BTreeSet<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pixel_density: Option<f64>,
}

impl BreakpointMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = Some(orientation);
        self
    }

    #[must_use]
    pub fn device_type(mut self, device_type: DeviceType) -> Self {
        self.device_type = Some(device_type);
        self
    }

    #[must_use]
    pub fn capability(mut self, capability: impl Into<String>) -> Self {
        self.capabilities.insert(capability.into());
        self
    }

    #[must_use]
    pub fn pixel_density(mut self, density: f64) -> Self {
        self.pixel_density = Some(density);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Landscape,
    Portrait,
}

impl Orientation {
    /// Square viewports count as landscape.
    pub fn of(width: f64, height: f64) -> Self {
        if width >= height {
            Self::Landscape
        } else {
            Self::Portrait
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    Mobile,
    Tablet,
    Laptop,
    Desktop,
    Tv,
    Other,
}
