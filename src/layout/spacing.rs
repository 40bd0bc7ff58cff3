//! Minimum-spacing repair for candidate positions

use std::f64::consts::TAU;

use indexmap::IndexMap;
use serde::Deserialize;

use super::config::LayoutConfig;
use super::types::{normalize_angle, Point};

/// How a rejected candidate is perturbed before the next attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpacingStrategy {
    /// Alternate between growing the radius and rotating the angle
    #[default]
    Alternate,
    /// Only grow the radius
    RadiusOnly,
}

/// Points placed so far in a layout run
#[derive(Debug, Clone, Default)]
pub struct PlacementState {
    positions: IndexMap<String, Point>,
}

impl PlacementState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a position; returns false (and keeps the first) if `id` was already placed
    pub fn place(&mut self, id: impl Into<String>, point: Point) -> bool {
        let id = id.into();
        if self.positions.contains_key(&id) {
            return false;
        }
        self.positions.insert(id, point);
        true
    }

    pub fn contains(&self, id: &str) -> bool {
        self.positions.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<Point> {
        self.positions.get(id).copied()
    }

    /// Whether `point` is at least `min_spacing` from every placed point
    pub fn is_clear(&self, point: Point, min_spacing: f64) -> bool {
        self.positions
            .values()
            .all(|placed| placed.distance(&point) >= min_spacing)
    }
}

/// Outcome of spacing repair for one node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolved {
    pub point: Point,
    pub radius: f64,
    pub angle: f64,
    /// Candidates evaluated, including the accepted one
    pub attempts: usize,
    /// False when the attempt ceiling was hit and the last candidate was kept
    pub satisfied: bool,
}

/// Radius for a ring: its base radius, widened so `size` evenly spaced nodes
/// would already be `min_spacing` apart along the circumference
///
/// Each ring is widened on its own, against its base radius only. A crowded
/// ring can therefore end up outside a sparser ring with a higher index.
pub fn ring_radius(index: usize, size: usize, config: &LayoutConfig) -> f64 {
    let needed = size as f64 * config.min_spacing / TAU;
    config.base_radius(index).max(needed)
}

/// Move a candidate `(radius, angle)` until it clears every placed point
///
/// The first candidate is always evaluated, even with an attempt ceiling of 0.
pub fn resolve(radius: f64, angle: f64, state: &PlacementState, config: &LayoutConfig) -> Resolved {
    let max_attempts = config.max_spacing_attempts;
    let mut radius = radius;
    let mut angle = angle;
    let mut attempts = 0;

    loop {
        let point = Point::from_polar(radius, angle);
        attempts += 1;

        let satisfied = state.is_clear(point, config.min_spacing);
        if satisfied || attempts >= max_attempts {
            return Resolved {
                point,
                radius,
                angle: normalize_angle(angle),
                attempts,
                satisfied,
            };
        }

        match config.spacing_strategy {
            SpacingStrategy::Alternate if attempts % 2 == 1 => radius += config.radius_step,
            SpacingStrategy::Alternate => angle += config.angle_nudge,
            SpacingStrategy::RadiusOnly => radius += config.radius_step,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_radius_widens_for_crowded_rings() {
        let config = LayoutConfig::default()
            .with_primary_radius(100.0)
            .with_radius_increment(100.0);
        // base radius of ring 2 is 200, eight nodes need 8 * 500 / 2π
        let radius = ring_radius(2, 8, &config);
        assert!((radius - 4000.0 / TAU).abs() < 1e-9);
        assert!((radius - 636.6).abs() < 0.1);
    }

    #[test]
    fn test_ring_radius_keeps_base_when_sparse() {
        let config = LayoutConfig::default();
        assert_eq!(ring_radius(2, 3, &config), 1200.0);
    }

    #[test]
    fn test_clear_candidate_accepted_first_try() {
        let mut state = PlacementState::new();
        state.place("root", Point::origin());
        let resolved = resolve(1200.0, 0.0, &state, &LayoutConfig::default());

        assert!(resolved.satisfied);
        assert_eq!(resolved.attempts, 1);
        assert_eq!(resolved.point, Point::new(1200.0, 0.0));
    }

    #[test]
    fn test_crowded_candidate_moves_away() {
        let config = LayoutConfig::default();
        let mut state = PlacementState::new();
        state.place("root", Point::origin());
        state.place("a", Point::new(600.0, 0.0));

        let resolved = resolve(600.0, 0.1, &state, &config);

        assert!(resolved.satisfied);
        assert!(resolved.attempts > 1);
        assert!(resolved.point.distance(&Point::new(600.0, 0.0)) >= config.min_spacing);
        assert!(resolved.point.distance(&Point::origin()) >= config.min_spacing);
    }

    #[test]
    fn test_alternate_strategy_sequence() {
        // Always blocked: a point at the origin with a huge spacing
        let config = LayoutConfig::default()
            .with_min_spacing(1e9)
            .with_max_spacing_attempts(4);
        let mut state = PlacementState::new();
        state.place("root", Point::origin());

        let resolved = resolve(100.0, 0.0, &state, &config);

        // evaluated (100, 0), (150, 0), (150, 0.2), (200, 0.2)
        assert!(!resolved.satisfied);
        assert_eq!(resolved.attempts, 4);
        assert_eq!(resolved.radius, 200.0);
        assert!((resolved.angle - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_radius_only_strategy() {
        let config = LayoutConfig::default()
            .with_min_spacing(1e9)
            .with_max_spacing_attempts(20)
            .with_spacing_strategy(SpacingStrategy::RadiusOnly, 100.0);
        let mut state = PlacementState::new();
        state.place("root", Point::origin());

        let resolved = resolve(600.0, 1.0, &state, &config);

        assert!(!resolved.satisfied);
        assert_eq!(resolved.attempts, 20);
        assert_eq!(resolved.radius, 600.0 + 19.0 * 100.0);
        assert_eq!(resolved.angle, 1.0);
    }

    #[test]
    fn test_place_keeps_first_position() {
        let mut state = PlacementState::new();
        assert!(state.place("a", Point::new(1.0, 1.0)));
        assert!(!state.place("a", Point::new(2.0, 2.0)));
        assert_eq!(state.get("a"), Some(Point::new(1.0, 1.0)));
        assert!(!state.contains("b"));
    }

    #[test]
    fn test_crowded_ring_may_pass_the_next_ring() {
        let config = LayoutConfig::default();
        // 40 nodes need 40 * 500 / 2π ≈ 3183, ring 3 only gets its base of 1800
        let crowded = ring_radius(2, 40, &config);
        let sparse = ring_radius(3, 2, &config);
        assert!((crowded - 20_000.0 / TAU).abs() < 1e-9);
        assert_eq!(sparse, 1800.0);
        assert!(crowded > sparse);
    }

    #[test]
    fn test_zero_attempt_ceiling_still_evaluates_one_candidate() {
        let mut config = LayoutConfig::default().with_min_spacing(1e9);
        config.max_spacing_attempts = 0;
        let mut state = PlacementState::new();
        state.place("root", Point::origin());

        let resolved = resolve(600.0, 0.0, &state, &config);

        assert_eq!(resolved.attempts, 1);
        assert!(!resolved.satisfied);
        assert_eq!(resolved.point, Point::new(600.0, 0.0));
    }
}
