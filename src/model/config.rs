use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::options::DisplayOptions;

/// Configuration from linktree.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Notes directory; relative paths resolve against the base directory.
    /// Default: `notes`
    #[serde(default)]
    pub notes_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default)]
    pub hide_notes: bool,
    #[serde(default)]
    pub show_done: bool,
    #[serde(default)]
    pub link_lock: bool,
    #[serde(default)]
    pub show_context: bool,
    #[serde(default)]
    pub color: ColorMode,
}

/// When to emit ANSI styling
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Color when stdout is a terminal
    #[default]
    Auto,
    Always,
    Never,
}

impl DisplayConfig {
    /// Starting options for a render; command-line flags are layered on top
    pub fn to_options(&self) -> DisplayOptions {
        DisplayOptions {
            hide_notes: self.hide_notes,
            show_done: self.show_done,
            link_lock: self.link_lock,
            show_context: self.show_context,
            ..DisplayOptions::default()
        }
    }
}
