//! Radial layout engine
//!
//! This module takes a graph document and computes a spider-web layout:
//! the root at the origin, primary anchors on the first ring, every other
//! node on a ring given by its BFS distance from the root.

pub mod adjacency;
pub mod angles;
pub mod category;
pub mod config;
pub mod engine;
pub mod error;
pub mod lint;
pub mod rings;
pub mod spacing;
pub mod types;

pub use adjacency::Adjacency;
pub use category::{classify, classify_labels};
pub use config::LayoutConfig;
pub use engine::{compute, fallback_position, fnv1a32};
pub use error::LayoutError;
pub use lint::{check, ValidationCategory, ValidationReport, ValidationWarning};
pub use spacing::{PlacementState, SpacingStrategy};
pub use types::*;

/// Compute Levenshtein edit distance between two strings
fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let m = a_chars.len();
    let n = b_chars.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    let mut dp = vec![vec![0usize; n + 1]; m + 1];

    for (i, row) in dp.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..=n {
        dp[0][j] = j;
    }

    for i in 1..=m {
        for j in 1..=n {
            let cost = usize::from(a_chars[i - 1] != b_chars[j - 1]);
            dp[i][j] = (dp[i - 1][j] + 1)
                .min(dp[i][j - 1] + 1)
                .min(dp[i - 1][j - 1] + cost);
        }
    }

    dp[m][n]
}

/// Find node ids within a maximum edit distance of `target`, closest first
pub(crate) fn find_similar(known: &[&str], target: &str, max_distance: usize) -> Vec<String> {
    let mut candidates: Vec<(&str, usize)> = known
        .iter()
        .filter_map(|name| {
            let dist = levenshtein_distance(name, target);
            if dist <= max_distance && dist > 0 {
                Some((*name, dist))
            } else {
                None
            }
        })
        .collect();

    // stable sort keeps document order among equal distances
    candidates.sort_by_key(|(_, d)| *d);
    candidates
        .into_iter()
        .map(|(name, _)| name.to_string())
        .take(3)
        .collect()
}
