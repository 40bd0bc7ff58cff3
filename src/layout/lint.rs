//! Post-hoc layout verification.
//!
//! Runs on a positioned document to check for mechanical defects: root off
//! the origin, nodes without a position, nodes stacked on the same spot,
//! neighbors closer than the minimum spacing.

use std::collections::HashMap;
use std::fmt;

use crate::document::Graph;

use super::types::{LayoutReport, Point};

/// Nodes sampled for the pairwise distance check
const SAMPLE_NODES: usize = 20;
/// Each sampled node is compared with this many following nodes (itself included)
const SAMPLE_WINDOW: usize = 10;

/// A verification warning about a layout defect
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationWarning {
    pub category: ValidationCategory,
    pub message: String,
}

/// Category of verification defect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationCategory {
    Root,
    Missing,
    Duplicate,
    Spacing,
}

impl fmt::Display for ValidationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationCategory::Root => write!(f, "root"),
            ValidationCategory::Missing => write!(f, "missing"),
            ValidationCategory::Duplicate => write!(f, "duplicate"),
            ValidationCategory::Spacing => write!(f, "spacing"),
        }
    }
}

/// Outcome of verifying a positioned document
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationReport {
    pub root_at_origin: bool,
    pub positioned: usize,
    pub total: usize,
    /// Distinct spots (rounded to 0.1) shared by more than one node
    pub duplicate_positions: usize,
    /// Smallest non-zero distance among the sampled pairs
    pub sampled_min_distance: Option<f64>,
    pub min_spacing: f64,
    /// Nodes whose spacing repair gave up during layout
    pub unsatisfied_spacing: usize,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationReport {
    /// True when no defect was found
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Run all verification checks on a positioned document.
pub fn check(graph: &Graph, root: &str, min_spacing: f64, layout: &LayoutReport) -> ValidationReport {
    let mut warnings = Vec::new();

    let root_at_origin = check_root(graph, root, &mut warnings);
    let positioned = check_missing(graph, &mut warnings);
    let duplicate_positions = check_duplicates(graph, &mut warnings);
    let sampled_min_distance = sample_min_distance(graph);

    if let Some(distance) = sampled_min_distance {
        if distance < min_spacing {
            warnings.push(ValidationWarning {
                category: ValidationCategory::Spacing,
                message: format!(
                    "sampled nodes closer than {:.0}: {:.1}",
                    min_spacing, distance
                ),
            });
        }
    }

    let unsatisfied_spacing = layout.unsatisfied_spacing.len();
    if unsatisfied_spacing > 0 {
        warnings.push(ValidationWarning {
            category: ValidationCategory::Spacing,
            message: format!(
                "{} node(s) kept a position closer than {:.0} to a neighbor: {}",
                unsatisfied_spacing,
                min_spacing,
                layout.unsatisfied_spacing.join(", ")
            ),
        });
    }

    ValidationReport {
        root_at_origin,
        positioned,
        total: graph.nodes.len(),
        duplicate_positions,
        sampled_min_distance,
        min_spacing,
        unsatisfied_spacing,
        warnings,
    }
}

fn check_root(graph: &Graph, root: &str, warnings: &mut Vec<ValidationWarning>) -> bool {
    let at_origin = graph
        .node(root)
        .and_then(|n| n.position)
        .map(|p| p == Point::origin())
        .unwrap_or(false);
    if !at_origin {
        warnings.push(ValidationWarning {
            category: ValidationCategory::Root,
            message: format!("root \"{}\" is not at the origin", root),
        });
    }
    at_origin
}

fn check_missing(graph: &Graph, warnings: &mut Vec<ValidationWarning>) -> usize {
    let mut positioned = 0;
    for node in &graph.nodes {
        if node.position.is_some() {
            positioned += 1;
        } else {
            warnings.push(ValidationWarning {
                category: ValidationCategory::Missing,
                message: format!("\"{}\" has no position", node.id),
            });
        }
    }
    positioned
}

fn check_duplicates(graph: &Graph, warnings: &mut Vec<ValidationWarning>) -> usize {
    let mut spots: HashMap<(i64, i64), Vec<&str>> = HashMap::new();
    for node in &graph.nodes {
        if let Some(p) = node.position {
            let key = ((p.x * 10.0).round() as i64, (p.y * 10.0).round() as i64);
            spots.entry(key).or_default().push(&node.id);
        }
    }

    let mut shared: Vec<&Vec<&str>> = spots.values().filter(|ids| ids.len() > 1).collect();
    // HashMap order is arbitrary; sort so messages are stable
    shared.sort();
    for ids in &shared {
        warnings.push(ValidationWarning {
            category: ValidationCategory::Duplicate,
            message: format!("same position shared by {}", ids.join(", ")),
        });
    }
    shared.len()
}

fn sample_min_distance(graph: &Graph) -> Option<f64> {
    let points: Vec<Point> = graph.nodes.iter().filter_map(|n| n.position).collect();
    let mut min: Option<f64> = None;

    for i in 0..points.len().min(SAMPLE_NODES) {
        for j in (i + 1)..points.len().min(i + SAMPLE_WINDOW) {
            let distance = points[i].distance(&points[j]);
            if distance > 0.0 {
                min = Some(min.map_or(distance, |m| m.min(distance)));
            }
        }
    }
    min
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = |ok: bool| if ok { "ok  " } else { "warn" };

        writeln!(f, "[{}] root at origin", mark(self.root_at_origin))?;
        writeln!(
            f,
            "[{}] {}/{} nodes have positions",
            mark(self.positioned == self.total),
            self.positioned,
            self.total
        )?;
        writeln!(
            f,
            "[{}] {} duplicate position(s)",
            mark(self.duplicate_positions == 0),
            self.duplicate_positions
        )?;
        match self.sampled_min_distance {
            Some(d) => writeln!(
                f,
                "[{}] sampled minimum spacing {:.1}",
                mark(d >= self.min_spacing),
                d
            )?,
            None => writeln!(f, "[ok  ] sampled minimum spacing n/a")?,
        }
        write!(
            f,
            "[{}] {} node(s) with unsatisfied spacing",
            mark(self.unsatisfied_spacing == 0),
            self.unsatisfied_spacing
        )?;
        for warning in &self.warnings {
            write!(f, "\n  {}: {}", warning.category, warning.message)?;
        }
        Ok(())
    }
}
