//! Spiderweb - radial "spider-web" layout for reaction graphs
//!
//! This library places the nodes of a compound/reaction graph on concentric
//! rings around a root compound and writes the positions back into the graph
//! document.
//!
//! # Example
//!
//! ```rust
//! use spiderweb::{layout, Graph, LayoutConfig, Point};
//!
//! let graph = Graph::from_json(
//!     r#"{
//!         "nodes": [{"id": "benzene"}, {"id": "nitrobenzene"}, {"id": "aniline"}],
//!         "edges": [
//!             {"source": "benzene", "target": "nitrobenzene", "label": "Nitration"},
//!             {"source": "nitrobenzene", "target": "aniline", "label": "Reduction"}
//!         ]
//!     }"#,
//! )
//! .unwrap();
//!
//! let laid = layout(graph, &LayoutConfig::default()).unwrap();
//! assert_eq!(laid.result.position("benzene"), Some(Point::origin()));
//! assert!(laid.graph.nodes.iter().all(|n| n.position.is_some()));
//! ```

pub mod document;
pub mod error;
pub mod layout;
pub mod settings;

pub use document::{Edge, Graph, Node};
pub use error::DocumentError;
pub use layout::{Category, LayoutConfig, LayoutError, LayoutReport, LayoutResult, Point};
pub use settings::{Settings, SettingsError};

use thiserror::Error;

/// Errors that can occur during a layout run
#[derive(Debug, Error)]
pub enum RunError {
    /// Error reading or writing the document
    #[error("document error: {0}")]
    Document(#[from] DocumentError),

    /// Error during layout
    #[error("layout error: {0}")]
    Layout(#[from] LayoutError),

    /// Error loading settings
    #[error("settings error: {0}")]
    Settings(#[from] SettingsError),
}

/// A graph with positions written into its nodes, plus the layout details
#[derive(Debug, Clone)]
pub struct Laid {
    pub graph: Graph,
    pub result: LayoutResult,
}

impl Laid {
    /// Verify the positioned document
    pub fn verify(&self, config: &LayoutConfig) -> layout::ValidationReport {
        layout::check(
            &self.graph,
            &self.result.root,
            config.min_spacing,
            &self.result.report,
        )
    }
}

/// Lay out `graph` and write the positions into its nodes
///
/// Any existing positions are overwritten. On error the graph is dropped
/// unchanged; nothing is partially applied.
pub fn layout(mut graph: Graph, config: &LayoutConfig) -> Result<Laid, LayoutError> {
    let result = layout::compute(&graph, config)?;
    graph.apply_positions(&result.positions);
    Ok(Laid { graph, result })
}

/// Lay out a JSON document and return the updated JSON
///
/// # Example
///
/// ```rust
/// use spiderweb::{layout_json, LayoutConfig};
///
/// let config = LayoutConfig::new().with_root("a");
/// let (json, result) = layout_json(r#"{"nodes": [{"id": "a"}]}"#, &config).unwrap();
/// assert!(json.contains("\"position\""));
/// assert_eq!(result.positions.len(), 1);
/// ```
pub fn layout_json(source: &str, config: &LayoutConfig) -> Result<(String, LayoutResult), RunError> {
    let graph = Graph::from_json(source)?;
    let laid = layout(graph, config)?;
    let json = laid.graph.to_json()?;
    Ok((json, laid.result))
}
