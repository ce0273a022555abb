//! Configuration loaded from `~/.config/devprint/config.toml`.
//!
//! ```toml
//! store_path = "/home/me/.config/devprint/accounts.json"
//!
//! [product]
//! name = "antigravity"
//! version = "1.11.5"
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::fingerprint::ProductIdentity;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Account store file; defaults to `accounts.json` next to the config
    pub store_path: Option<PathBuf>,
    /// Identity stamped into generated User-Agents
    pub product: ProductIdentity,
    /// Directory of the config file this was loaded from
    #[serde(skip)]
    base_dir: Option<PathBuf>,
}

impl Config {
    /// Load from the default location.
    ///
    /// Returns defaults if the file doesn't exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&config_path())
    }

    /// Load from `path`; the default store then lives beside it.
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            toml::from_str::<Self>(&content)
                .with_context(|| format!("invalid TOML in {}", path.display()))?
        } else {
            Self::default()
        };
        config.base_dir = path.parent().map(|dir| {
            if dir.as_os_str().is_empty() {
                PathBuf::from(".")
            } else {
                dir.to_path_buf()
            }
        });
        Ok(config)
    }

    /// Resolved account store path
    #[must_use]
    pub fn store_path(&self) -> PathBuf {
        self.store_path.clone().unwrap_or_else(|| {
            self.base_dir
                .clone()
                .unwrap_or_else(config_dir)
                .join("accounts.json")
        })
    }
}

/// Directory holding the config and, by default, the account store
#[must_use]
pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("devprint")
}

fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}
