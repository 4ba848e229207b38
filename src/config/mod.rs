//! Configuration for idmanifest
//!
//! Resolution order, later wins: built-in defaults, the user config file
//! (`<config dir>/idmanifest/config.toml`), the project file
//! (`./idmanifest.toml` or `--config`), then command-line flags.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{ManifestError, Result};

pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_MANIFEST_FILE: &str = "manifest.json";
pub const PROJECT_CONFIG_FILE: &str = "idmanifest.toml";

/// Resolved settings for one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the per-item `*.json` files
    pub data_dir: PathBuf,
    /// Manifest file to write
    pub manifest_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            manifest_file: PathBuf::from(DEFAULT_MANIFEST_FILE),
        }
    }
}

/// On-disk config file. Every key is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub data_dir: Option<PathBuf>,
    pub manifest_file: Option<PathBuf>,
}

/// Command-line overrides
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub config_file: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,
    pub manifest_file: Option<PathBuf>,
}

impl Config {
    fn merge(&mut self, file: ConfigFile) {
        if let Some(dir) = file.data_dir {
            self.data_dir = dir;
        }
        if let Some(out) = file.manifest_file {
            self.manifest_file = out;
        }
    }

    fn apply(&mut self, overrides: &Overrides) {
        if let Some(dir) = &overrides.data_dir {
            self.data_dir = dir.clone();
        }
        if let Some(out) = &overrides.manifest_file {
            self.manifest_file = out.clone();
        }
    }
}

/// Path of the per-user config file, if the platform has a config dir
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("idmanifest").join("config.toml"))
}

/// Parse a config file
pub fn read_config_file(path: &Path) -> Result<ConfigFile> {
    let content = fs::read_to_string(path).map_err(|e| ManifestError::InvalidConfig {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    toml::from_str(&content).map_err(|e| ManifestError::InvalidConfig {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Resolve the configuration from all layers
pub fn load_config(overrides: &Overrides) -> Result<Config> {
    load_config_from(user_config_path().as_deref(), overrides)
}

/// Like [`load_config`] with an explicit user config location
pub fn load_config_from(user_config: Option<&Path>, overrides: &Overrides) -> Result<Config> {
    let mut config = Config::default();

    if let Some(path) = user_config.filter(|p| p.is_file()) {
        debug!("Loading user config {:?}", path);
        config.merge(read_config_file(path)?);
    }

    match &overrides.config_file {
        // An explicitly named file must exist.
        Some(path) => {
            debug!("Loading config {:?}", path);
            config.merge(read_config_file(path)?);
        }
        None => {
            let project = Path::new(PROJECT_CONFIG_FILE);
            if project.is_file() {
                debug!("Loading project config {:?}", project);
                config.merge(read_config_file(project)?);
            }
        }
    }

    config.apply(overrides);
    debug!(
        "Resolved data_dir={:?} manifest_file={:?}",
        config.data_dir, config.manifest_file
    );
    Ok(config)
}
