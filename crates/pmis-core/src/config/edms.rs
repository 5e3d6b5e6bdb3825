//! Document explorer configuration.

use serde::{Deserialize, Serialize};

/// How the explorer lays out documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Card grid.
    #[default]
    Grid,
    /// Detail list.
    List,
}

impl ViewMode {
    /// Return the other view mode.
    pub fn toggled(self) -> Self {
        match self {
            Self::Grid => Self::List,
            Self::List => Self::Grid,
        }
    }
}

/// EDMS explorer and document store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdmsConfig {
    /// Path to a JSON seed file. The embedded seed is used when unset.
    #[serde(default)]
    pub seed_path: Option<String>,
    /// Label shown for documents whose project is not in the project set.
    #[serde(default = "default_unknown_project_label")]
    pub unknown_project_label: String,
    /// Label of the synthetic root folder.
    #[serde(default = "default_root_label")]
    pub root_label: String,
    /// Initial explorer layout.
    #[serde(default)]
    pub default_view: ViewMode,
    /// Capacity of the document event channel.
    #[serde(default = "default_event_buffer")]
    pub event_buffer: usize,
}

impl Default for EdmsConfig {
    fn default() -> Self {
        Self {
            seed_path: None,
            unknown_project_label: default_unknown_project_label(),
            root_label: default_root_label(),
            default_view: ViewMode::default(),
            event_buffer: default_event_buffer(),
        }
    }
}

fn default_unknown_project_label() -> String {
    "Unknown Project".to_string()
}

fn default_root_label() -> String {
    "All Documents".to_string()
}

fn default_event_buffer() -> usize {
    64
}
