//! Error types for the layout engine

use thiserror::Error;

/// Errors that abort a layout computation
///
/// Everything else (unknown anchors, dangling edges, unsatisfied spacing) is
/// recorded in the [`LayoutReport`](super::LayoutReport) instead.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// The configured root is not one of the document's nodes
    #[error("root node '{root}' not found{}", format_suggestions(.suggestions))]
    MissingRoot {
        root: String,
        suggestions: Vec<String>,
    },

    /// A configuration value cannot drive a layout run
    #[error("invalid layout configuration for '{field}': {reason}")]
    InvalidConfig { field: String, reason: String },
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(" (did you mean: {}?)", suggestions.join(", "))
    }
}

impl LayoutError {
    /// Create a missing root error with suggestions
    pub fn missing_root(root: impl Into<String>, suggestions: Vec<String>) -> Self {
        Self::MissingRoot {
            root: root.into(),
            suggestions,
        }
    }

    /// Create an invalid configuration error
    pub fn invalid_config(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Get suggestions if available
    pub fn suggestions(&self) -> Option<&[String]> {
        match self {
            Self::MissingRoot { suggestions, .. } => Some(suggestions),
            _ => None,
        }
    }
}
