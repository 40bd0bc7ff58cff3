//! Breadth-first ring partitioning
//!
//! Ring 0 is the root, ring 1 is the configured primary anchors, and every
//! later ring is the next BFS frontier. Disconnected nodes are pulled in as
//! overflow rings so every node ends up in exactly one ring.

use std::collections::HashSet;

use super::adjacency::Adjacency;
use super::types::{Ring, RingKind};

/// Partition all known nodes into rings around `root`
///
/// `primaries` must already be restricted to known nodes other than the root;
/// repeated ids are ignored. The first expansion starts from the primaries and
/// then the root, so root neighbors that are not anchors land on ring 2.
pub fn partition(
    adjacency: &Adjacency,
    root: &str,
    primaries: &[String],
    overflow_chunk_size: usize,
) -> Vec<Ring> {
    let total = adjacency.len();
    let chunk = overflow_chunk_size.max(1);

    let mut visited: HashSet<&str> = HashSet::new();
    visited.insert(root);

    let mut rings = vec![Ring::new(RingKind::Root, vec![root.to_string()])];

    let primary: Vec<&str> = primaries
        .iter()
        .map(String::as_str)
        .filter(|id| adjacency.contains(id) && visited.insert(*id))
        .collect();
    rings.push(Ring::new(
        RingKind::Primary,
        primary.iter().map(|s| s.to_string()).collect(),
    ));

    let mut frontier: Vec<&str> = primary;
    frontier.push(root);

    // Each pass visits at least one node, so `total` passes always suffice.
    for _ in 0..total {
        if adjacency.node_ids().all(|id| visited.contains(id)) {
            break;
        }

        let mut next: Vec<&str> = Vec::new();
        for node in &frontier {
            for neighbor in adjacency.neighbors(node) {
                if visited.insert(neighbor) {
                    next.push(neighbor);
                }
            }
        }

        let kind = if next.is_empty() {
            next = adjacency
                .node_ids()
                .filter(|id| !visited.contains(id))
                .take(chunk)
                .collect();
            visited.extend(next.iter().copied());
            RingKind::Overflow
        } else {
            RingKind::Frontier
        };

        if next.is_empty() {
            break;
        }

        rings.push(Ring::new(kind, next.iter().map(|s| s.to_string()).collect()));
        frontier = next;
    }

    let leftover: Vec<String> = adjacency
        .node_ids()
        .filter(|id| !visited.contains(id))
        .map(str::to_string)
        .collect();
    if !leftover.is_empty() {
        rings.push(Ring::new(RingKind::Overflow, leftover));
    }

    rings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Edge;
    use indexmap::IndexSet;
    use pretty_assertions::assert_eq;

    fn adjacency(nodes: &[&str], edges: &[(&str, &str)]) -> Adjacency {
        let ids: IndexSet<String> = nodes.iter().map(|s| s.to_string()).collect();
        let edges: Vec<Edge> = edges.iter().map(|(a, b)| Edge::new(*a, *b)).collect();
        Adjacency::build(&edges, &ids)
    }

    fn members(rings: &[Ring]) -> Vec<Vec<&str>> {
        rings
            .iter()
            .map(|r| r.members.iter().map(String::as_str).collect())
            .collect()
    }

    fn owned(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_bfs_layers() {
        let adj = adjacency(
            &["R", "B", "C", "D", "E", "F"],
            &[("R", "B"), ("R", "C"), ("B", "D"), ("C", "E"), ("D", "F"), ("E", "F")],
        );
        let rings = partition(&adj, "R", &owned(&["B", "C"]), 20);

        assert_eq!(
            members(&rings),
            vec![vec!["R"], vec!["B", "C"], vec!["D", "E"], vec!["F"]]
        );
        assert_eq!(rings[0].kind, RingKind::Root);
        assert_eq!(rings[1].kind, RingKind::Primary);
        assert!(rings[2..].iter().all(|r| r.kind == RingKind::Frontier));
    }

    #[test]
    fn test_primary_ring_follows_configured_order() {
        let adj = adjacency(&["R", "B", "C"], &[("R", "B"), ("R", "C")]);
        let rings = partition(&adj, "R", &owned(&["C", "B", "C"]), 20);
        assert_eq!(members(&rings), vec![vec!["R"], vec!["C", "B"]]);
    }

    #[test]
    fn test_root_neighbors_outside_anchors_land_on_ring_two() {
        let adj = adjacency(&["R", "B", "X", "Y"], &[("R", "B"), ("R", "X"), ("X", "Y")]);
        let rings = partition(&adj, "R", &owned(&["B"]), 20);
        assert_eq!(
            members(&rings),
            vec![vec!["R"], vec!["B"], vec!["X"], vec!["Y"]]
        );
    }

    #[test]
    fn test_disconnected_nodes_become_overflow_chunks() {
        let adj = adjacency(
            &["R", "B", "i1", "i2", "i3", "i4", "i5"],
            &[("R", "B"), ("i4", "i5")],
        );
        let rings = partition(&adj, "R", &owned(&["B"]), 2);

        assert_eq!(
            members(&rings),
            vec![
                vec!["R"],
                vec!["B"],
                vec!["i1", "i2"],
                vec!["i3", "i4"],
                vec!["i5"],
            ]
        );
        assert_eq!(rings[2].kind, RingKind::Overflow);
        assert_eq!(rings[3].kind, RingKind::Overflow);
        // i5 is discovered from i4, so it is a regular frontier again
        assert_eq!(rings[4].kind, RingKind::Frontier);
    }

    #[test]
    fn test_every_node_in_exactly_one_ring() {
        let adj = adjacency(
            &["R", "a", "b", "c", "d", "e", "f", "g"],
            &[("R", "a"), ("a", "b"), ("b", "a"), ("c", "d"), ("d", "c"), ("g", "g")],
        );
        let rings = partition(&adj, "R", &owned(&["a"]), 1);

        let mut seen: Vec<&str> = rings.iter().flat_map(|r| r.members.iter().map(String::as_str)).collect();
        seen.sort();
        assert_eq!(seen, vec!["R", "a", "b", "c", "d", "e", "f", "g"]);
    }

    #[test]
    fn test_no_primaries_expands_from_root() {
        let adj = adjacency(&["R", "a", "b"], &[("R", "a"), ("a", "b")]);
        let rings = partition(&adj, "R", &[], 20);
        assert_eq!(members(&rings), vec![vec!["R"], vec![], vec!["a"], vec!["b"]]);
    }
}
