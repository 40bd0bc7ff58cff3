//! Core types for the layout engine

use std::f64::consts::TAU;
use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A 2D point relative to the root at the origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The root position
    pub fn origin() -> Self {
        Self::new(0.0, 0.0)
    }

    /// Convert polar coordinates (angle in radians) to a point
    pub fn from_polar(radius: f64, angle: f64) -> Self {
        Self::new(radius * angle.cos(), radius * angle.sin())
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::origin()
    }
}

/// Wrap an angle into `[0, 2π)`
pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Heuristic reaction category derived from incident edge labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    FriedelCrafts,
    Oxidation,
    Reduction,
    Substitution,
    Addition,
    Condensation,
    Rearrangement,
    Other,
}

impl Category {
    /// All categories in classification priority order
    pub const ALL: [Category; 8] = [
        Category::FriedelCrafts,
        Category::Oxidation,
        Category::Reduction,
        Category::Substitution,
        Category::Addition,
        Category::Condensation,
        Category::Rearrangement,
        Category::Other,
    ];

    /// Stable kebab-case name used in settings files and reports
    pub fn name(&self) -> &'static str {
        match self {
            Category::FriedelCrafts => "friedel-crafts",
            Category::Oxidation => "oxidation",
            Category::Reduction => "reduction",
            Category::Substitution => "substitution",
            Category::Addition => "addition",
            Category::Condensation => "condensation",
            Category::Rearrangement => "rearrangement",
            Category::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a category name is not recognized
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category '{0}'")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        Category::ALL
            .into_iter()
            .find(|c| c.name() == wanted)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// How a ring came to exist
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RingKind {
    /// Ring 0, holding only the root
    Root,
    /// Ring 1, the configured primary anchors
    Primary,
    /// A BFS frontier
    Frontier,
    /// Nodes not reached by BFS
    Overflow,
}

impl fmt::Display for RingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RingKind::Root => write!(f, "root"),
            RingKind::Primary => write!(f, "primary"),
            RingKind::Frontier => write!(f, "frontier"),
            RingKind::Overflow => write!(f, "overflow"),
        }
    }
}

/// An ordered group of node identifiers placed on the same circle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ring {
    pub kind: RingKind,
    pub members: Vec<String>,
}

impl Ring {
    pub fn new(kind: RingKind, members: Vec<String>) -> Self {
        Self { kind, members }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// A ring after placement, with the radius it was laid out on
#[derive(Debug, Clone, PartialEq)]
pub struct RingLayout {
    pub index: usize,
    pub kind: RingKind,
    pub radius: f64,
    pub members: Vec<String>,
}

/// Non-fatal conditions collected during a layout run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutReport {
    /// Configured anchor ids that are not in the node set
    pub skipped_anchors: Vec<String>,
    /// Edges dropped because an endpoint is unknown
    pub dropped_edges: usize,
    /// Nodes whose spacing repair ran out of attempts
    pub unsatisfied_spacing: Vec<String>,
    /// Nodes that received the hash-based fallback position
    pub fallback_nodes: Vec<String>,
}

impl LayoutReport {
    /// True when no condition was recorded
    pub fn is_clean(&self) -> bool {
        self.skipped_anchors.is_empty()
            && self.dropped_edges == 0
            && self.unsatisfied_spacing.is_empty()
            && self.fallback_nodes.is_empty()
    }
}

impl fmt::Display for LayoutReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "skipped anchors: {}", self.skipped_anchors.len())?;
        writeln!(f, "dropped edges: {}", self.dropped_edges)?;
        writeln!(f, "unsatisfied spacing: {}", self.unsatisfied_spacing.len())?;
        write!(f, "fallback placements: {}", self.fallback_nodes.len())
    }
}

/// The complete result of a layout computation
#[derive(Debug, Clone)]
pub struct LayoutResult {
    /// Root node identifier
    pub root: String,
    /// Final position per node, in document order
    pub positions: IndexMap<String, Point>,
    /// Category per node, in ring order
    pub categories: IndexMap<String, Category>,
    /// Angle assigned to each placed primary anchor
    pub anchor_angles: IndexMap<String, f64>,
    /// Rings with the radius they were laid out on
    pub rings: Vec<RingLayout>,
    pub report: LayoutReport,
}

impl LayoutResult {
    pub fn position(&self, id: &str) -> Option<Point> {
        self.positions.get(id).copied()
    }

    pub fn category(&self, id: &str) -> Option<Category> {
        self.categories.get(id).copied()
    }

    /// Index of the ring containing `id`
    pub fn ring_of(&self, id: &str) -> Option<usize> {
        self.rings
            .iter()
            .find(|ring| ring.members.iter().any(|m| m == id))
            .map(|ring| ring.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_polar() {
        let p = Point::from_polar(600.0, std::f64::consts::PI);
        assert!((p.x + 600.0).abs() < 1e-9);
        assert!(p.y.abs() < 1e-9);
    }

    #[test]
    fn test_distance() {
        assert_eq!(Point::new(0.0, 0.0).distance(&Point::new(3.0, 4.0)), 5.0);
    }

    #[test]
    fn test_normalize_angle() {
        assert!((normalize_angle(-std::f64::consts::FRAC_PI_2) - 1.5 * std::f64::consts::PI).abs() < 1e-12);
        assert_eq!(normalize_angle(TAU), 0.0);
        assert!(normalize_angle(-1e-20) < TAU);
    }

    #[test]
    fn test_category_names_round_trip() {
        for category in Category::ALL {
            assert_eq!(category.name().parse::<Category>(), Ok(category));
        }
        assert_eq!("Friedel_Crafts".parse::<Category>(), Ok(Category::FriedelCrafts));
        assert!("pericyclic".parse::<Category>().is_err());
    }
}
