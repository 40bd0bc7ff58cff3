//! Layout orchestration
//!
//! Places the root at the origin and the primary anchors evenly on the first
//! ring, then walks the remaining rings outward: angles first, then spacing
//! repair against everything placed so far. The placement state is owned by
//! a single call to [`compute`] and never shared.

use std::f64::consts::TAU;

use indexmap::{IndexMap, IndexSet};

use crate::document::Graph;

use super::adjacency::Adjacency;
use super::angles::{assign_angles, AnchorTable, Jitter};
use super::category::classify;
use super::config::LayoutConfig;
use super::error::LayoutError;
use super::find_similar;
use super::rings::partition;
use super::spacing::{resolve, ring_radius, PlacementState};
use super::types::{LayoutReport, LayoutResult, Point, RingKind, RingLayout};

const FNV1A_OFFSET: u32 = 0x811c_9dc5;
const FNV1A_PRIME: u32 = 0x0100_0193;

/// 32-bit FNV-1a over the UTF-8 bytes of `s`
pub fn fnv1a32(s: &str) -> u32 {
    s.bytes()
        .fold(FNV1A_OFFSET, |hash, byte| (hash ^ byte as u32).wrapping_mul(FNV1A_PRIME))
}

/// Position for a node the ring walk never reached
///
/// The angle is `fnv1a32(id) mod 360` degrees, so it is stable across runs
/// and platforms.
pub fn fallback_position(id: &str, radius: f64) -> Point {
    let degrees = (fnv1a32(id) % 360) as f64;
    Point::from_polar(radius, degrees.to_radians())
}

/// Compute positions for every node of `graph`
pub fn compute(graph: &Graph, config: &LayoutConfig) -> Result<LayoutResult, LayoutError> {
    config.validate()?;

    let node_ids: IndexSet<String> = graph.nodes.iter().map(|n| n.id.clone()).collect();
    if node_ids.len() != graph.nodes.len() {
        tracing::warn!(
            duplicates = graph.nodes.len() - node_ids.len(),
            "document repeats node ids; repeats share one position"
        );
    }

    let root = config.root_id.as_str();
    if !node_ids.contains(root) {
        let known: Vec<&str> = node_ids.iter().map(String::as_str).collect();
        return Err(LayoutError::missing_root(root, find_similar(&known, root, 2)));
    }

    let adjacency = Adjacency::build(&graph.edges, &node_ids);
    let mut report = LayoutReport {
        dropped_edges: adjacency.dropped_edges(),
        ..LayoutReport::default()
    };
    if report.dropped_edges > 0 {
        tracing::warn!(count = report.dropped_edges, "dropped edges referencing unknown nodes");
    }

    let primaries = known_primaries(config, &node_ids, &mut report);
    record_unknown_category_anchors(config, &node_ids, &mut report);

    let mut state = PlacementState::new();
    state.place(root, Point::origin());

    let anchor_angles = place_primaries(&primaries, config.primary_radius, &mut state);
    let anchors = AnchorTable {
        primary_angles: &anchor_angles,
        rules: &config.category_anchor_rules,
    };

    let rings = partition(&adjacency, root, &primaries, config.overflow_chunk_size);

    let mut jitter = match (config.enable_jitter, config.jitter_seed) {
        (true, Some(seed)) => Some(Jitter::new(seed, config.jitter_amplitude)),
        _ => None,
    };

    let mut categories = IndexMap::new();
    let mut ring_layouts = Vec::with_capacity(rings.len());

    for (index, ring) in rings.iter().enumerate() {
        let radius = match ring.kind {
            RingKind::Root => 0.0,
            RingKind::Primary => config.primary_radius,
            _ => ring_radius(index, ring.len(), config),
        };

        if matches!(ring.kind, RingKind::Root | RingKind::Primary) {
            for id in &ring.members {
                categories.insert(id.clone(), classify(id, &adjacency));
            }
        } else {
            let assigned = assign_angles(
                &ring.members,
                |id| classify(id, &adjacency),
                &anchors,
                jitter.as_mut(),
            );
            let buckets: IndexSet<_> = assigned.iter().map(|a| a.category).collect();
            tracing::debug!(
                ring = index,
                kind = %ring.kind,
                size = ring.len(),
                radius,
                buckets = buckets.len(),
                "placing ring"
            );

            for assignment in assigned {
                let resolved = resolve(radius, assignment.angle, &state, config);
                if !resolved.satisfied {
                    tracing::warn!(
                        node = %assignment.node,
                        attempts = resolved.attempts,
                        "minimum spacing not reached; keeping last candidate"
                    );
                    report.unsatisfied_spacing.push(assignment.node.clone());
                }
                state.place(assignment.node.clone(), resolved.point);
                categories.insert(assignment.node, assignment.category);
            }
        }

        ring_layouts.push(RingLayout {
            index,
            kind: ring.kind,
            radius,
            members: ring.members.clone(),
        });
    }

    let fallback_radius = config.primary_radius + rings.len() as f64 * config.radius_increment;
    for id in &node_ids {
        if !state.contains(id) {
            tracing::warn!(node = %id, "node was never reached; using fallback position");
            state.place(id.clone(), fallback_position(id, fallback_radius));
            categories.insert(id.clone(), classify(id, &adjacency));
            report.fallback_nodes.push(id.clone());
        }
    }

    // Report positions in document order
    let positions: IndexMap<String, Point> = node_ids
        .iter()
        .filter_map(|id| state.get(id).map(|p| (id.clone(), p)))
        .collect();

    tracing::info!(
        nodes = positions.len(),
        rings = ring_layouts.len(),
        unsatisfied = report.unsatisfied_spacing.len(),
        "layout complete"
    );

    Ok(LayoutResult {
        root: root.to_string(),
        positions,
        categories,
        anchor_angles,
        rings: ring_layouts,
        report,
    })
}

/// Configured primary anchors present in the document, root and repeats removed
fn known_primaries(
    config: &LayoutConfig,
    node_ids: &IndexSet<String>,
    report: &mut LayoutReport,
) -> Vec<String> {
    let mut seen = IndexSet::new();
    for id in &config.primary_anchor_ids {
        if !node_ids.contains(id) {
            tracing::warn!(anchor = %id, "primary anchor not in document; skipping");
            if !report.skipped_anchors.contains(id) {
                report.skipped_anchors.push(id.clone());
            }
        } else if *id != config.root_id {
            seen.insert(id.clone());
        }
    }
    seen.into_iter().collect()
}

fn record_unknown_category_anchors(
    config: &LayoutConfig,
    node_ids: &IndexSet<String>,
    report: &mut LayoutReport,
) {
    for (category, candidates) in &config.category_anchor_rules {
        for id in candidates {
            if !node_ids.contains(id) && !report.skipped_anchors.contains(id) {
                tracing::warn!(anchor = %id, %category, "category anchor not in document; skipping");
                report.skipped_anchors.push(id.clone());
            }
        }
    }
}

/// Spread anchors evenly on `radius` starting at angle 0
fn place_primaries(
    primaries: &[String],
    radius: f64,
    state: &mut PlacementState,
) -> IndexMap<String, f64> {
    let mut angles = IndexMap::new();
    if primaries.is_empty() {
        return angles;
    }
    let step = TAU / primaries.len() as f64;
    for (i, id) in primaries.iter().enumerate() {
        let angle = i as f64 * step;
        state.place(id.clone(), Point::from_polar(radius, angle));
        angles.insert(id.clone(), angle);
    }
    angles
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Edge, Node};
    use crate::layout::Category;
    use pretty_assertions::assert_eq;

    fn graph(nodes: &[&str], edges: &[(&str, &str, &str)]) -> Graph {
        Graph::new(
            nodes.iter().map(|id| Node::new(*id)).collect(),
            edges
                .iter()
                .map(|(a, b, label)| Edge::new(*a, *b).with_label(*label))
                .collect(),
        )
    }

    #[test]
    fn test_fnv1a32_reference_values() {
        assert_eq!(fnv1a32(""), 0x811c_9dc5);
        assert_eq!(fnv1a32("a"), 0xe40c_292c);
        assert_eq!(fnv1a32("foobar"), 0xbf9c_f968);
    }

    #[test]
    fn test_fallback_position_is_stable() {
        let p = fallback_position("a", 1000.0);
        // 0xe40c292c % 360 == 340
        let expected = Point::from_polar(1000.0, 340f64.to_radians());
        assert_eq!(p, expected);
    }

    #[test]
    fn test_root_and_primaries() {
        let g = graph(&["R", "B", "C"], &[("R", "B", ""), ("R", "C", "")]);
        let config = LayoutConfig::new()
            .with_root("R")
            .with_primary_anchors(["B", "C"])
            .without_category_anchors();

        let result = compute(&g, &config).expect("layout should succeed");

        assert_eq!(result.position("R"), Some(Point::origin()));
        let b = result.position("B").unwrap();
        let c = result.position("C").unwrap();
        assert!((b.x - 600.0).abs() < 1e-9 && b.y.abs() < 1e-9);
        assert!((c.x + 600.0).abs() < 1e-9 && c.y.abs() < 1e-9);
        assert_eq!(result.anchor_angles["C"], std::f64::consts::PI);
        assert!(result.report.is_clean());
    }

    #[test]
    fn test_missing_root_is_fatal() {
        let g = graph(&["benzene", "toluene"], &[]);
        let err = compute(&g, &LayoutConfig::new().with_root("benzen")).unwrap_err();
        assert!(matches!(err, LayoutError::MissingRoot { .. }));
        assert_eq!(err.suggestions(), Some(&["benzene".to_string()][..]));
    }

    #[test]
    fn test_unknown_anchors_skipped() {
        let g = graph(&["R", "B"], &[("R", "B", "")]);
        let config = LayoutConfig::new()
            .with_root("R")
            .with_primary_anchors(["B", "ghost", "R", "B"])
            .without_category_anchors()
            .with_category_anchors(Category::Oxidation, ["phantom", "ghost"]);

        let result = compute(&g, &config).expect("layout should succeed");

        assert_eq!(result.report.skipped_anchors, vec!["ghost", "phantom"]);
        assert_eq!(result.rings[1].members, vec!["B"]);
        assert_eq!(result.anchor_angles.len(), 1);
    }

    #[test]
    fn test_categories_recorded_for_all_nodes() {
        let g = graph(
            &["R", "B", "D", "E"],
            &[
                ("R", "B", "Nitration"),
                ("B", "D", "Reduction"),
                ("B", "E", "Aldol Condensation"),
            ],
        );
        let config = LayoutConfig::new()
            .with_root("R")
            .with_primary_anchors(["B"]);

        let result = compute(&g, &config).expect("layout should succeed");

        assert_eq!(result.category("R"), Some(Category::Substitution));
        assert_eq!(result.category("D"), Some(Category::Reduction));
        assert_eq!(result.category("E"), Some(Category::Condensation));
        assert_eq!(result.categories.len(), 4);
    }

    #[test]
    fn test_unsatisfied_spacing_reported() {
        // Two nodes on ring 2 with a spacing the ring can never satisfy in one try
        let g = graph(&["R", "B", "x", "y"], &[("R", "B", ""), ("B", "x", ""), ("B", "y", "")]);
        let config = LayoutConfig::new()
            .with_root("R")
            .with_primary_anchors(["B"])
            .with_primary_radius(10.0)
            .with_radius_increment(10.0)
            .with_min_spacing(10_000.0)
            .with_max_spacing_attempts(1);

        let result = compute(&g, &config).expect("layout should succeed");

        assert_eq!(result.report.unsatisfied_spacing, vec!["x", "y"]);
        assert_eq!(result.positions.len(), 4);
    }
}
