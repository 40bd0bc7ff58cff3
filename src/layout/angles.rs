//! Angle assignment within a ring
//!
//! Members are bucketed by category. A ring with a single bucket is spread
//! evenly from angle 0. Otherwise each bucket takes a contiguous sector of one
//! angular step per member. Anchored buckets are laid down first, in anchor
//! angle order, each as close to centered on its anchor as the sectors
//! already claimed allow. The remaining buckets follow the last claimed
//! sector in first-seen order. Sectors never overlap, so every category
//! occupies a single arc.

use std::f64::consts::TAU;

use indexmap::IndexMap;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::types::{normalize_angle, Category};

/// Angle chosen for one ring member
#[derive(Debug, Clone, PartialEq)]
pub struct AngleAssignment {
    pub node: String,
    pub category: Category,
    pub angle: f64,
}

/// Anchor angles available to a ring
#[derive(Debug, Clone, Copy)]
pub struct AnchorTable<'a> {
    /// Angle of every placed primary anchor
    pub primary_angles: &'a IndexMap<String, f64>,
    /// Candidate anchors per category, in preference order
    pub rules: &'a IndexMap<Category, Vec<String>>,
}

impl AnchorTable<'_> {
    /// Angle of the first candidate for `category` that is a placed anchor
    pub fn anchor_angle(&self, category: Category) -> Option<f64> {
        self.rules
            .get(&category)?
            .iter()
            .find_map(|candidate| self.primary_angles.get(candidate).copied())
    }
}

/// Seeded angle perturbation, owned by a single layout run
#[derive(Debug, Clone)]
pub struct Jitter {
    rng: ChaCha8Rng,
    amplitude: f64,
}

impl Jitter {
    pub fn new(seed: u64, amplitude: f64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            amplitude: amplitude.abs(),
        }
    }

    /// Shift `angle` by a uniform draw from `[-amplitude, amplitude]`
    pub fn perturb(&mut self, angle: f64) -> f64 {
        if self.amplitude == 0.0 {
            return angle;
        }
        normalize_angle(angle + self.rng.gen_range(-self.amplitude..=self.amplitude))
    }
}

/// Assign an angle to every member of a ring
///
/// Assignments come back grouped by bucket in the order sectors were
/// claimed (anchored buckets by anchor angle, then the rest in first-seen
/// order), which is also the order nodes should be placed in.
pub fn assign_angles<F>(
    members: &[String],
    classify: F,
    anchors: &AnchorTable<'_>,
    mut jitter: Option<&mut Jitter>,
) -> Vec<AngleAssignment>
where
    F: Fn(&str) -> Category,
{
    if members.is_empty() {
        return Vec::new();
    }

    let mut buckets: IndexMap<Category, Vec<&String>> = IndexMap::new();
    for node in members {
        buckets.entry(classify(node.as_str())).or_default().push(node);
    }

    let step = TAU / members.len() as f64;
    let mut assignments = Vec::with_capacity(members.len());

    for (category, nodes, start) in claim_sectors(&buckets, anchors, step) {
        for (i, node) in nodes.iter().enumerate() {
            let mut angle = normalize_angle(start + i as f64 * step);
            if let Some(jitter) = jitter.as_deref_mut() {
                angle = jitter.perturb(angle);
            }
            assignments.push(AngleAssignment {
                node: (*node).clone(),
                category,
                angle,
            });
        }
    }

    assignments
}

/// Starting angle of each bucket's sector, in claim order
///
/// The sectors are laid out one after another inside a single turn that
/// begins at the first sector's start, so together they cover the circle
/// exactly once.
fn claim_sectors<'a>(
    buckets: &'a IndexMap<Category, Vec<&'a String>>,
    anchors: &AnchorTable<'_>,
    step: f64,
) -> Vec<(Category, &'a [&'a String], f64)> {
    if buckets.len() == 1 {
        return buckets
            .iter()
            .map(|(category, nodes)| (*category, nodes.as_slice(), 0.0))
            .collect();
    }

    let mut anchored: Vec<(f64, Category, &[&String])> = Vec::new();
    let mut free: Vec<(Category, &[&String])> = Vec::new();
    for (category, nodes) in buckets {
        match anchors.anchor_angle(*category) {
            Some(angle) => anchored.push((normalize_angle(angle), *category, nodes.as_slice())),
            None => free.push((*category, nodes.as_slice())),
        }
    }
    // stable: equal anchor angles keep first-seen order
    anchored.sort_by(|a, b| a.0.total_cmp(&b.0));

    let centered = |anchor: f64, len: usize| anchor - (len - 1) as f64 * step / 2.0;
    let turn_start = anchored
        .first()
        .map(|(anchor, _, nodes)| centered(*anchor, nodes.len()))
        .unwrap_or(0.0);
    let turn_end = turn_start + TAU;

    let mut remaining: usize = buckets.values().map(Vec::len).sum();
    let mut cursor = turn_start;
    let mut sectors = Vec::with_capacity(buckets.len());

    for (anchor, category, nodes) in anchored {
        // Leave room for this bucket and everything after it
        let latest = turn_end - remaining as f64 * step;
        let start = centered(anchor, nodes.len()).max(cursor).min(latest);
        sectors.push((category, nodes, start));
        cursor = start + nodes.len() as f64 * step;
        remaining -= nodes.len();
    }
    for (category, nodes) in free {
        sectors.push((category, nodes, cursor));
        cursor += nodes.len() as f64 * step;
    }

    sectors
}
