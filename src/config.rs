//! Where property data lives.
//!
//! Three layers, later ones winning: built-in defaults, a JSON config file,
//! then the `UNIPROPS_DATA_DIR` / `UNIPROPS_DATA_VERSION` environment
//! variables. The CLI adds its flags on top.
//!
//! ```json
//! { "data_dir": "/usr/share/uniprops", "data_version": "v1" }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::PropsError;

/// Default data root, relative to the working directory.
pub const DEFAULT_DATA_DIR: &str = "data/uprops";

/// Default data format version.
pub const DEFAULT_DATA_VERSION: &str = "v1";

pub const ENV_DATA_DIR: &str = "UNIPROPS_DATA_DIR";
pub const ENV_DATA_VERSION: &str = "UNIPROPS_DATA_VERSION";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root of the `<version>/<key>.uprop` tree.
    pub data_dir: PathBuf,
    pub data_version: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            data_version: DEFAULT_DATA_VERSION.to_string(),
        }
    }
}

impl Config {
    /// Defaults overridden by the environment.
    pub fn from_env() -> Self {
        Self::default().with_env()
    }

    /// Read a JSON config file. Missing fields keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, PropsError> {
        let text = fs::read_to_string(path).map_err(|e| PropsError::Config {
            message: format!("cannot read {}: {}", path.display(), e),
        })?;
        Self::from_json(&text).map_err(|e| PropsError::Config {
            message: format!("{}: {}", path.display(), e),
        })
    }

    pub fn from_json(text: &str) -> Result<Self, PropsError> {
        let config: Config = serde_json::from_str(text).map_err(|e| PropsError::Config {
            message: e.to_string(),
        })?;
        config.validated()
    }

    /// Apply environment overrides on top of `self`.
    pub fn with_env(self) -> Self {
        self.with_overrides(
            std::env::var_os(ENV_DATA_DIR).map(PathBuf::from),
            std::env::var(ENV_DATA_VERSION).ok(),
        )
    }

    /// Replace fields that have a value. Empty strings count as unset.
    pub fn with_overrides(mut self, data_dir: Option<PathBuf>, data_version: Option<String>) -> Self {
        if let Some(dir) = data_dir.filter(|d| !d.as_os_str().is_empty()) {
            self.data_dir = dir;
        }
        if let Some(version) = data_version.filter(|v| !v.is_empty()) {
            self.data_version = version;
        }
        self
    }

    fn validated(self) -> Result<Self, PropsError> {
        if self.data_version.is_empty() {
            return Err(PropsError::Config {
                message: "data_version must not be empty".to_string(),
            });
        }
        Ok(self)
    }
}
