//! Configuration for the layout engine

use indexmap::IndexMap;

use super::error::LayoutError;
use super::spacing::SpacingStrategy;
use super::types::Category;

/// Configuration options for layout computation
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    /// Identifier of the node placed at the origin
    pub root_id: String,

    /// Minimum distance between any two placed nodes
    pub min_spacing: f64,

    /// Radius of ring 1 (the primary anchors)
    pub primary_radius: f64,

    /// Radius added per ring beyond ring 1
    pub radius_increment: f64,

    /// Nodes placed on ring 1, in angular order starting at angle 0
    pub primary_anchor_ids: Vec<String>,

    /// Candidate anchors per category; the first placed primary anchor wins
    pub category_anchor_rules: IndexMap<Category, Vec<String>>,

    /// Maximum candidates evaluated by spacing repair per node
    pub max_spacing_attempts: usize,

    /// How spacing repair perturbs a rejected candidate
    pub spacing_strategy: SpacingStrategy,

    /// Radius added by a radius-growing repair step
    pub radius_step: f64,

    /// Angle (radians) added by an angle-rotating repair step
    pub angle_nudge: f64,

    /// Maximum size of a ring of unreached nodes
    pub overflow_chunk_size: usize,

    /// Randomly perturb assigned angles
    pub enable_jitter: bool,

    /// Seed for the jitter stream; required when jitter is enabled
    pub jitter_seed: Option<u64>,

    /// Maximum absolute angle perturbation (radians)
    pub jitter_amplitude: f64,
}

const DEFAULT_PRIMARY_ANCHORS: [&str; 6] = [
    "benzaldehyde",
    "acetophenone",
    "nitrobenzene",
    "anisole",
    "cumene",
    "cyclohexa_1_4_diene",
];

fn default_category_anchor_rules() -> IndexMap<Category, Vec<String>> {
    let mut rules = IndexMap::new();
    rules.insert(
        Category::FriedelCrafts,
        vec!["acetophenone".into(), "anisole".into(), "cumene".into()],
    );
    rules.insert(Category::Substitution, vec!["nitrobenzene".into()]);
    rules.insert(Category::Reduction, vec!["cyclohexa_1_4_diene".into()]);
    rules
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            root_id: "benzene".to_string(),
            min_spacing: 500.0,
            primary_radius: 600.0,
            radius_increment: 600.0,
            primary_anchor_ids: DEFAULT_PRIMARY_ANCHORS.iter().map(|s| s.to_string()).collect(),
            category_anchor_rules: default_category_anchor_rules(),
            max_spacing_attempts: 50,
            spacing_strategy: SpacingStrategy::Alternate,
            radius_step: 50.0,
            angle_nudge: 0.2,
            overflow_chunk_size: 20,
            enable_jitter: false,
            jitter_seed: None,
            jitter_amplitude: 0.1,
        }
    }
}

impl LayoutConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the root node identifier
    pub fn with_root(mut self, root: impl Into<String>) -> Self {
        self.root_id = root.into();
        self
    }

    /// Set the minimum spacing between nodes
    pub fn with_min_spacing(mut self, spacing: f64) -> Self {
        self.min_spacing = spacing;
        self
    }

    /// Set the ring 1 radius
    pub fn with_primary_radius(mut self, radius: f64) -> Self {
        self.primary_radius = radius;
        self
    }

    /// Set the per-ring radius increment
    pub fn with_radius_increment(mut self, increment: f64) -> Self {
        self.radius_increment = increment;
        self
    }

    /// Replace the primary anchor list
    pub fn with_primary_anchors<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.primary_anchor_ids = ids.into_iter().map(Into::into).collect();
        self
    }

    /// Set (or replace) the anchor candidates for one category
    pub fn with_category_anchors<I, S>(mut self, category: Category, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.category_anchor_rules
            .insert(category, ids.into_iter().map(Into::into).collect());
        self
    }

    /// Remove every category anchor rule
    pub fn without_category_anchors(mut self) -> Self {
        self.category_anchor_rules.clear();
        self
    }

    /// Set the spacing repair attempt ceiling
    pub fn with_max_spacing_attempts(mut self, attempts: usize) -> Self {
        self.max_spacing_attempts = attempts;
        self
    }

    /// Set the spacing repair strategy and its radius step
    pub fn with_spacing_strategy(mut self, strategy: SpacingStrategy, radius_step: f64) -> Self {
        self.spacing_strategy = strategy;
        self.radius_step = radius_step;
        self
    }

    /// Set the angle added by rotating repair steps
    pub fn with_angle_nudge(mut self, nudge: f64) -> Self {
        self.angle_nudge = nudge;
        self
    }

    /// Set the overflow ring size cap
    pub fn with_overflow_chunk_size(mut self, size: usize) -> Self {
        self.overflow_chunk_size = size;
        self
    }

    /// Enable seeded angle jitter
    pub fn with_jitter(mut self, seed: u64) -> Self {
        self.enable_jitter = true;
        self.jitter_seed = Some(seed);
        self
    }

    /// Set the jitter amplitude (radians)
    pub fn with_jitter_amplitude(mut self, amplitude: f64) -> Self {
        self.jitter_amplitude = amplitude;
        self
    }

    /// Base radius of ring `index` before widening for spacing
    ///
    /// Ring 0 is the root; ring 1 sits on `primary_radius`.
    pub fn base_radius(&self, index: usize) -> f64 {
        match index {
            0 => 0.0,
            k => self.primary_radius + (k - 1) as f64 * self.radius_increment,
        }
    }

    /// Check that the configuration can drive a layout run
    pub fn validate(&self) -> Result<(), LayoutError> {
        let positive = [
            ("min_spacing", self.min_spacing),
            ("primary_radius", self.primary_radius),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(LayoutError::invalid_config(field, format!("must be a positive number, got {}", value)));
            }
        }

        let non_negative = [
            ("radius_increment", self.radius_increment),
            ("radius_step", self.radius_step),
            ("angle_nudge", self.angle_nudge),
            ("jitter_amplitude", self.jitter_amplitude),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(LayoutError::invalid_config(field, format!("must be a non-negative number, got {}", value)));
            }
        }

        if self.max_spacing_attempts == 0 {
            return Err(LayoutError::invalid_config("max_spacing_attempts", "must be at least 1"));
        }
        if self.overflow_chunk_size == 0 {
            return Err(LayoutError::invalid_config("overflow_chunk_size", "must be at least 1"));
        }
        if self.enable_jitter && self.jitter_seed.is_none() {
            return Err(LayoutError::invalid_config("jitter_seed", "required when jitter is enabled"));
        }
        Ok(())
    }
}
