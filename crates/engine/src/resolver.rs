use crate::capabilities::Capabilities;
use responsive_config::{Breakpoint, Orientation, ResponsiveConfig};

/// Points awarded per capability shared by the probe and a breakpoint.
const CAPABILITY_BONUS: f64 = 50.0;

/// Relative weight of each scoring term.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub width: f64,
    pub height: f64,
    pub aspect_ratio: f64,
    pub capability: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            width: 0.4,
            height: 0.3,
            aspect_ratio: 0.2,
            capability: 0.1,
        }
    }
}

/// Per-breakpoint score breakdown, useful for diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct BreakpointScore<'a> {
    pub breakpoint: &'a Breakpoint,
    pub width: f64,
    pub height: f64,
    pub aspect_ratio: f64,
    pub capability: f64,
    pub total: f64,
}

/// Maps a viewport to the best matching configured breakpoint.
///
/// Scoring formula per breakpoint:
///
/// ```text
/// width  = max(0, 100 - |Δw| / maxΔw * 100)
/// height = max(0, 100 - |Δh| / maxΔh * 100)
/// aspect = orientation match ? max(0, 100 - |Δratio| * 100) : 0
/// caps   = 50 * |probe ∩ declared|
/// total  = Σ weight_i * term_i
/// ```
///
/// The highest total wins and ties go to the first declared breakpoint, so
/// resolution never fails for a validated config.
#[derive(Debug, Clone, Copy, Default)]
pub struct BreakpointResolver {
    weights: ScoringWeights,
}

impl BreakpointResolver {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> ScoringWeights {
        self.weights
    }

    pub fn resolve<'a>(
        &self,
        viewport_width: f64,
        viewport_height: f64,
        config: &'a ResponsiveConfig,
        capabilities: Option<Capabilities>,
    ) -> &'a Breakpoint {
        let mut best: Option<BreakpointScore<'a>> = None;
        for score in self.score_all(viewport_width, viewport_height, config, capabilities) {
            // Strictly greater: earlier breakpoints keep ties.
            let better = best
                .as_ref()
                .map_or(true, |current| score.total > current.total);
            if better {
                best = Some(score);
            }
        }

        let winner = best.map_or_else(|| config.base(), |score| score.breakpoint);
        log::debug!(
            "Resolved viewport {viewport_width}x{viewport_height} to breakpoint '{}'",
            winner.alias
        );
        winner
    }

    /// Scores every breakpoint in declaration order.
    pub fn score_all<'a>(
        &self,
        viewport_width: f64,
        viewport_height: f64,
        config: &'a ResponsiveConfig,
        capabilities: Option<Capabilities>,
    ) -> Vec<BreakpointScore<'a>> {
        let width = sanitize(viewport_width);
        let height = sanitize(viewport_height);
        let breakpoints = config.breakpoints();

        let max_width_diff = breakpoints
            .iter()
            .map(|bp| (bp.width - width).abs())
            .fold(0.0_f64, f64::max);
        let max_height_diff = breakpoints
            .iter()
            .map(|bp| (bp.height - height).abs())
            .fold(0.0_f64, f64::max);

        breakpoints
            .iter()
            .map(|bp| {
                let width_score = distance_score((bp.width - width).abs(), max_width_diff);
                let height_score = distance_score((bp.height - height).abs(), max_height_diff);
                let aspect_score = aspect_ratio_score(width, height, bp);
                let capability_score = capabilities.map_or(0.0, |caps| capability_score(caps, bp));

                let total = self.weights.width * width_score
                    + self.weights.height * height_score
                    + self.weights.aspect_ratio * aspect_score
                    + self.weights.capability * capability_score;

                BreakpointScore {
                    breakpoint: bp,
                    width: width_score,
                    height: height_score,
                    aspect_ratio: aspect_score,
                    capability: capability_score,
                    total,
                }
            })
            .collect()
    }
}

fn sanitize(value: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}

fn distance_score(diff: f64, max_diff: f64) -> f64 {
    if max_diff <= 0.0 {
        return 100.0;
    }
    (100.0 - diff / max_diff * 100.0).max(0.0)
}

fn aspect_ratio_score(width: f64, height: f64, bp: &Breakpoint) -> f64 {
    if width <= 0.0 || height <= 0.0 {
        return 0.0;
    }
    if Orientation::of(width, height) != bp.orientation() {
        return 0.0;
    }
    let diff = (width / height - bp.aspect_ratio()).abs();
    (100.0 - diff * 100.0).max(0.0)
}

fn capability_score(capabilities: Capabilities, bp: &Breakpoint) -> f64 {
    let shared = capabilities
        .names()
        .filter(|name| bp.has_capability(name))
        .count();
    shared as f64 * CAPABILITY_BONUS
}

#[cfg(test)]
mod tests {
    use super::*;
    use responsive_config::{BreakpointMetadata, ResponsiveConfigBuilder};

    fn config() -> ResponsiveConfig {
        ResponsiveConfigBuilder::new()
            .breakpoint(Breakpoint::new("Mobile", "mobile", 390.0, 844.0))
            .breakpoint(Breakpoint::new("Tablet", "tablet", 768.0, 1024.0))
            .breakpoint(Breakpoint::new("Desktop", "desktop", 1920.0, 1080.0))
            .base("desktop")
            .build()
            .unwrap()
    }

    #[test]
    fn exact_match_wins() {
        let config = config();
        let resolver = BreakpointResolver::default();
        assert_eq!(resolver.resolve(1920.0, 1080.0, &config, None).alias, "desktop");
        assert_eq!(resolver.resolve(390.0, 844.0, &config, None).alias, "mobile");
        assert_eq!(resolver.resolve(768.0, 1024.0, &config, None).alias, "tablet");
    }

    #[test]
    fn nearby_viewport_picks_closest() {
        let config = config();
        let resolver = BreakpointResolver::default();
        assert_eq!(resolver.resolve(800.0, 1000.0, &config, None).alias, "tablet");
        assert_eq!(resolver.resolve(2560.0, 1440.0, &config, None).alias, "desktop");
        assert_eq!(resolver.resolve(360.0, 740.0, &config, None).alias, "mobile");
    }

    #[test]
    fn degenerate_viewports_still_resolve() {
        let config = config();
        let resolver = BreakpointResolver::default();
        let _ = resolver.resolve(0.0, 0.0, &config, None);
        let _ = resolver.resolve(f64::NAN, f64::INFINITY, &config, None);
        let _ = resolver.resolve(-100.0, 5.0, &config, None);
    }

    #[test]
    fn ties_go_to_first_declared() {
        let config = ResponsiveConfigBuilder::new()
            .breakpoint(Breakpoint::new("A", "a", 1000.0, 800.0))
            .breakpoint(Breakpoint::new("B", "b", 1000.0, 800.0))
            .build()
            .unwrap();
        let resolver = BreakpointResolver::default();
        assert_eq!(resolver.resolve(1000.0, 800.0, &config, None).alias, "a");
        assert_eq!(resolver.resolve(10.0, 10.0, &config, None).alias, "a");
    }

    #[test]
    fn capabilities_break_otherwise_equal_scores() {
        let config = ResponsiveConfigBuilder::new()
            .breakpoint(
                Breakpoint::new("Pointer", "pointer", 1024.0, 768.0)
                    .with_metadata(BreakpointMetadata::new().capability("hover")),
            )
            .breakpoint(
                Breakpoint::new("Touch", "touch", 1024.0, 768.0)
                    .with_metadata(BreakpointMetadata::new().capability("touch")),
            )
            .build()
            .unwrap();
        let resolver = BreakpointResolver::default();
        let touch = Some(Capabilities::new(true, false));
        assert_eq!(resolver.resolve(1024.0, 768.0, &config, touch).alias, "touch");
        assert_eq!(resolver.resolve(1024.0, 768.0, &config, None).alias, "pointer");
    }

    #[test]
    fn orientation_mismatch_zeroes_aspect_term() {
        let config = config();
        let resolver = BreakpointResolver::default();
        let scores = resolver.score_all(1920.0, 1080.0, &config, None);
        let mobile = scores.iter().find(|s| s.breakpoint.alias == "mobile").unwrap();
        let desktop = scores.iter().find(|s| s.breakpoint.alias == "desktop").unwrap();
        assert_eq!(mobile.aspect_ratio, 0.0);
        assert_eq!(desktop.aspect_ratio, 100.0);
        assert_eq!(desktop.width, 100.0);
    }
}
