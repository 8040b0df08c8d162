use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use writify_editor::{TextStyle, DEFAULT_HISTORY_CAPACITY, STORAGE_KEY};

pub const DEFAULT_CONFIG_NAME: &str = "writify.config.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Notebook configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotebookConfig {
    /// Key the session is persisted under
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Quiet period before an autosave is written
    #[serde(default = "default_autosave_delay_ms")]
    pub autosave_delay_ms: u64,

    /// Undo levels kept per direction (0 = unlimited)
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,

    #[serde(default)]
    pub theme: Theme,

    #[serde(default)]
    pub export: ExportSettings,

    /// Style used when no session has been saved yet
    #[serde(default)]
    pub text_style: TextStyle,
}

fn default_storage_key() -> String {
    STORAGE_KEY.to_string()
}

fn default_autosave_delay_ms() -> u64 {
    800
}

fn default_history_capacity() -> usize {
    DEFAULT_HISTORY_CAPACITY
}

/// Color scheme of the host UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Export output options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportSettings {
    /// Device pixel ratio used when rasterizing (2.0 = high DPI)
    pub scale: f64,

    /// Keep the paper background instead of filling with white
    pub transparent_background: bool,

    /// Allow cross-origin fonts and images while rasterizing
    pub use_cors: bool,

    pub file_name: String,

    pub pdf_file_name: String,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            scale: 2.0,
            transparent_background: true,
            use_cors: true,
            file_name: "writify-note.png".to_string(),
            pdf_file_name: "writify-notes.pdf".to_string(),
        }
    }
}

impl NotebookConfig {
    /// Load config from a directory, defaults when the file is absent
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config_path = dir.as_ref().join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content =
                std::fs::read_to_string(&config_path).map_err(|source| ConfigError::Read {
                    path: config_path.clone(),
                    source,
                })?;
            let config: NotebookConfig =
                serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
                    path: config_path.clone(),
                    source,
                })?;
            Ok(config)
        } else {
            Ok(NotebookConfig::default())
        }
    }

    pub fn autosave_delay(&self) -> Duration {
        Duration::from_millis(self.autosave_delay_ms)
    }
}

impl Default for NotebookConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            autosave_delay_ms: default_autosave_delay_ms(),
            history_capacity: default_history_capacity(),
            theme: Theme::default(),
            export: ExportSettings::default(),
            text_style: TextStyle::default(),
        }
    }
}
