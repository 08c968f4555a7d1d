use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::model::config::Config;

/// Config file looked up in the base directory when `--config` is not given
pub const CONFIG_FILE: &str = "linktree.toml";

/// Error type for reading the config file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Read a config file.
pub fn read_config(path: &Path) -> Result<Config, ConfigError> {
    let text = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Load the config: an explicit path must exist, the default one in
/// `base_dir` is optional.
pub fn load_config(base_dir: &Path, explicit: Option<&Path>) -> Result<Config, ConfigError> {
    if let Some(path) = explicit {
        return read_config(path);
    }
    let path = base_dir.join(CONFIG_FILE);
    if path.is_file() {
        debug!("using config {}", path.display());
        read_config(&path)
    } else {
        Ok(Config::default())
    }
}

/// Notes directory: configured path (relative to `base_dir`) or `base_dir/notes`
pub fn notes_dir(base_dir: &Path, config: &Config) -> PathBuf {
    match &config.paths.notes_dir {
        Some(dir) => base_dir.join(dir),
        None => base_dir.join("notes"),
    }
}
