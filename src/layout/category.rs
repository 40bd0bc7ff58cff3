//! Reaction category classification from edge labels

use super::adjacency::Adjacency;
use super::types::Category;

/// Keyword sets in priority order; the first category with a hit wins.
const RULES: [(Category, &[&str]); 7] = [
    (Category::FriedelCrafts, &["friedel", "acylation", "alkylation"]),
    (Category::Oxidation, &["oxidation", "epoxidation"]),
    (Category::Reduction, &["reduction", "hydrog"]),
    (Category::Substitution, &["substitution", "halogen", "nitration"]),
    (Category::Addition, &["addition", "cyclo"]),
    (Category::Condensation, &["condensation", "aldol"]),
    (Category::Rearrangement, &["rearrang", "migration"]),
];

/// Classify a node by the labels of the edges joining it to its neighbors
pub fn classify(node: &str, adjacency: &Adjacency) -> Category {
    let labels: Vec<&str> = adjacency
        .neighbors(node)
        .flat_map(|neighbor| adjacency.labels(node, neighbor))
        .map(String::as_str)
        .collect();
    classify_labels(&labels)
}

/// Classify a set of reaction labels (case-insensitive)
pub fn classify_labels<S: AsRef<str>>(labels: &[S]) -> Category {
    let lowered: Vec<String> = labels.iter().map(|l| l.as_ref().to_lowercase()).collect();

    RULES
        .iter()
        .find(|(_, keywords)| {
            lowered
                .iter()
                .any(|label| keywords.iter().any(|kw| label.contains(kw)))
        })
        .map(|(category, _)| *category)
        .unwrap_or(Category::Other)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Edge;
    use indexmap::IndexSet;

    #[test]
    fn test_keywords_per_category() {
        assert_eq!(classify_labels(&["Friedel-Crafts Acylation"]), Category::FriedelCrafts);
        assert_eq!(classify_labels(&["Epoxidation"]), Category::Oxidation);
        assert_eq!(classify_labels(&["Catalytic Hydrogenation"]), Category::Reduction);
        assert_eq!(classify_labels(&["Nitration"]), Category::Substitution);
        assert_eq!(classify_labels(&["Diels-Alder Cycloaddition"]), Category::Addition);
        assert_eq!(classify_labels(&["Aldol Reaction"]), Category::Condensation);
        assert_eq!(classify_labels(&["Beckmann Rearrangement"]), Category::Rearrangement);
        assert_eq!(classify_labels(&["Grignard Reaction"]), Category::Other);
    }

    #[test]
    fn test_no_labels_is_other() {
        let empty: [&str; 0] = [];
        assert_eq!(classify_labels(&empty), Category::Other);
    }

    #[test]
    fn test_priority_order_wins() {
        // "addition" alone would be Addition, but Oxidation ranks first
        assert_eq!(
            classify_labels(&["Electrophilic Addition", "Oxidation"]),
            Category::Oxidation
        );
        assert_eq!(
            classify_labels(&["Birch Reduction", "Friedel-Crafts Alkylation"]),
            Category::FriedelCrafts
        );
    }

    #[test]
    fn test_classify_uses_incident_edges_only() {
        let ids: IndexSet<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();
        let edges = vec![
            Edge::new("a", "b").with_label("Halogenation"),
            Edge::new("b", "c").with_label("Oxidation"),
        ];
        let adj = Adjacency::build(&edges, &ids);

        assert_eq!(classify("a", &adj), Category::Substitution);
        assert_eq!(classify("b", &adj), Category::Oxidation);
        assert_eq!(classify("c", &adj), Category::Oxidation);
        assert_eq!(classify("missing", &adj), Category::Other);
    }
}
