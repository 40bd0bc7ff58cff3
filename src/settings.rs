//! Layout settings files
//!
//! Settings are TOML documents whose keys are all optional; whatever a file
//! sets is applied over [`LayoutConfig::default`].

use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;
use thiserror::Error;

use crate::layout::{Category, LayoutConfig, SpacingStrategy};

/// Errors that can occur when loading or parsing settings
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to read settings file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse settings TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Unknown category '{0}' in [anchors.categories]")]
    UnknownCategory(String),
}

/// A named layout configuration
#[derive(Debug, Clone)]
pub struct Settings {
    /// Optional name for the settings
    pub name: Option<String>,
    /// Optional description
    pub description: Option<String>,
    pub config: LayoutConfig,
}

/// TOML structure for deserializing settings
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlSettings {
    metadata: Option<TomlMetadata>,
    layout: Option<TomlLayout>,
    anchors: Option<TomlAnchors>,
    jitter: Option<TomlJitter>,
}

#[derive(Deserialize)]
struct TomlMetadata {
    name: Option<String>,
    description: Option<String>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlLayout {
    root: Option<String>,
    min_spacing: Option<f64>,
    primary_radius: Option<f64>,
    radius_increment: Option<f64>,
    max_spacing_attempts: Option<usize>,
    spacing_strategy: Option<SpacingStrategy>,
    radius_step: Option<f64>,
    angle_nudge: Option<f64>,
    overflow_chunk_size: Option<usize>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlAnchors {
    primary: Option<Vec<String>>,
    /// Replaces the default rules wholesale when present
    categories: Option<IndexMap<String, Vec<String>>>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlJitter {
    enabled: Option<bool>,
    seed: Option<u64>,
    amplitude: Option<f64>,
}

/// The built-in settings, spelled out as a settings file
pub const DEFAULT_SETTINGS: &str = r#"
[metadata]
name = "default"
description = "Benzene-rooted reaction web"

[layout]
root = "benzene"
min_spacing = 500.0
primary_radius = 600.0
radius_increment = 600.0
max_spacing_attempts = 50
spacing_strategy = "alternate"
radius_step = 50.0
angle_nudge = 0.2
overflow_chunk_size = 20

[anchors]
primary = [
    "benzaldehyde",
    "acetophenone",
    "nitrobenzene",
    "anisole",
    "cumene",
    "cyclohexa_1_4_diene",
]

[anchors.categories]
friedel-crafts = ["acetophenone", "anisole", "cumene"]
substitution = ["nitrobenzene"]
reduction = ["cyclohexa_1_4_diene"]

[jitter]
enabled = false
amplitude = 0.1
"#;

impl Settings {
    /// Load settings from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load settings from a TOML string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, SettingsError> {
        let parsed: TomlSettings = toml::from_str(content)?;
        let mut config = LayoutConfig::default();

        if let Some(layout) = parsed.layout {
            apply_layout(&mut config, layout);
        }
        if let Some(anchors) = parsed.anchors {
            if let Some(primary) = anchors.primary {
                config.primary_anchor_ids = primary;
            }
            if let Some(categories) = anchors.categories {
                config.category_anchor_rules = parse_category_rules(categories)?;
            }
        }
        if let Some(jitter) = parsed.jitter {
            if let Some(enabled) = jitter.enabled {
                config.enable_jitter = enabled;
            }
            if jitter.seed.is_some() {
                config.jitter_seed = jitter.seed;
            }
            if let Some(amplitude) = jitter.amplitude {
                config.jitter_amplitude = amplitude;
            }
        }

        Ok(Settings {
            name: parsed.metadata.as_ref().and_then(|m| m.name.clone()),
            description: parsed.metadata.as_ref().and_then(|m| m.description.clone()),
            config,
        })
    }
}

fn apply_layout(config: &mut LayoutConfig, layout: TomlLayout) {
    if let Some(root) = layout.root {
        config.root_id = root;
    }
    if let Some(v) = layout.min_spacing {
        config.min_spacing = v;
    }
    if let Some(v) = layout.primary_radius {
        config.primary_radius = v;
    }
    if let Some(v) = layout.radius_increment {
        config.radius_increment = v;
    }
    if let Some(v) = layout.max_spacing_attempts {
        config.max_spacing_attempts = v;
    }
    if let Some(v) = layout.spacing_strategy {
        config.spacing_strategy = v;
    }
    if let Some(v) = layout.radius_step {
        config.radius_step = v;
    }
    if let Some(v) = layout.angle_nudge {
        config.angle_nudge = v;
    }
    if let Some(v) = layout.overflow_chunk_size {
        config.overflow_chunk_size = v;
    }
}

fn parse_category_rules(
    raw: IndexMap<String, Vec<String>>,
) -> Result<IndexMap<Category, Vec<String>>, SettingsError> {
    let mut rules = IndexMap::new();
    for (name, anchors) in raw {
        let category: Category = name
            .parse()
            .map_err(|_| SettingsError::UnknownCategory(name.clone()))?;
        rules.insert(category, anchors);
    }
    Ok(rules)
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            name: Some("default".to_string()),
            description: None,
            config: LayoutConfig::default(),
        }
    }
}
