//! Grid session configuration
//!
//! Stores user preferences in `~/.config/gridpilot/config.yaml`

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::model::{CommitAction, ProposalLabels, Rectangularity};

const DEFAULT_INSTRUCTIONS: &str = "Based on the user's current spreadsheet and the cell they \
are working on, try to help the user by auto-completing what they might want to achieve. You \
can autocomplete the cell they are working on, or make any other changes to the spreadsheet. \
You must always return the complete spreadsheet, including all rows and columns.";

/// Configuration for a grid session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Base prompt sent with every suggestion request
    #[serde(default = "default_instructions")]
    pub instructions: String,

    /// Whether the whole grid or only incoming batches are kept rectangular
    #[serde(default)]
    pub rectangularity: Rectangularity,

    /// Labels for replace proposals
    #[serde(default = "default_replace_labels")]
    pub replace_labels: ProposalLabels,

    /// Labels for append proposals
    #[serde(default = "default_append_labels")]
    pub append_labels: ProposalLabels,
}

fn default_instructions() -> String {
    DEFAULT_INSTRUCTIONS.to_string()
}

fn default_replace_labels() -> ProposalLabels {
    ProposalLabels::new("Replace contents", "Changes committed")
}

fn default_append_labels() -> ProposalLabels {
    ProposalLabels::new("Append rows", "Rows appended")
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            instructions: default_instructions(),
            rectangularity: Rectangularity::default(),
            replace_labels: default_replace_labels(),
            append_labels: default_append_labels(),
        }
    }
}

impl GridConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(config) => {
                tracing::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("{}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Load config from a specific file
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;
        Self::from_yaml_str(&content)
    }

    /// Parse config from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Labels to attach to a new proposal
    pub fn labels_for(&self, action: CommitAction) -> ProposalLabels {
        match action {
            CommitAction::Replace => self.replace_labels.clone(),
            CommitAction::Append => self.append_labels.clone(),
        }
    }
}

/// Errors that can occur when loading configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Io(String),
    Parse(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "Failed to read config: {}", e),
            ConfigError::Parse(e) => write!(f, "Failed to parse config: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}
