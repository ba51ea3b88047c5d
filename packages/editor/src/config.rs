use crate::EditorError;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CONFIG_NAME: &str = "outline.config.json";

/// Editor configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorConfig {
    /// Tag used by `create_default_block`
    #[serde(default = "default_block_tag")]
    pub default_block_tag: String,

    /// Normalize text in dirty blocks before each commit
    #[serde(default = "default_true")]
    pub normalize_on_commit: bool,

    /// Translate selection into merged nodes during commit normalization
    #[serde(default = "default_true")]
    pub restore_selection: bool,
}

fn default_block_tag() -> String {
    "div".to_string()
}

fn default_true() -> bool {
    true
}

impl EditorConfig {
    /// Load config from a directory, falling back to defaults if the file
    /// does not exist
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, EditorError> {
        let config_path = dir.as_ref().join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Self::from_json(&content)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_json(json: &str) -> Result<Self, EditorError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            default_block_tag: default_block_tag(),
            normalize_on_commit: true,
            restore_selection: true,
        }
    }
}
