//! Configuration loading and backend factory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use ragerank_core::engine::{EngineConfig, CONFETTI_THRESHOLD};
use ragerank_core::store::{StoreConfig, DEFAULT_STORAGE_KEY};
use ragerank_core::traits::Persistence;
use ragerank_core::MAX_HISTORY;

use crate::file::JsonFileStore;
use crate::memory::MemoryStore;

/// Environment variable that forces the file backend at a given directory.
pub const DATA_DIR_ENV: &str = "RAGERANK_DATA_DIR";

/// Where the collection is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StorageConfig {
    File {
        #[serde(default = "default_data_dir")]
        dir: PathBuf,
    },
    /// Nothing survives the process.
    Memory,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig::File {
            dir: default_data_dir(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    std::env::var("HOME")
        .map(|h| PathBuf::from(h).join(".local").join("share").join("ragerank"))
        .unwrap_or_else(|_| PathBuf::from("./ragerank-data"))
}

/// Top-level ragerank configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RagerankConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    /// Key the whole collection is stored under.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
    /// Pending score whose upward crossing triggers the celebration.
    #[serde(default = "default_threshold")]
    pub celebration_threshold: u32,
    /// Committed snapshots kept per teacher.
    #[serde(default = "default_max_history")]
    pub max_history: usize,
    /// Save after every pending change, not only on commit.
    #[serde(default = "default_true")]
    pub persist_pending: bool,
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}
fn default_threshold() -> u32 {
    CONFETTI_THRESHOLD
}
fn default_max_history() -> usize {
    MAX_HISTORY
}
fn default_true() -> bool {
    true
}

impl Default for RagerankConfig {
    fn default() -> Self {
        Self {
            storage: StorageConfig::default(),
            storage_key: default_storage_key(),
            celebration_threshold: default_threshold(),
            max_history: default_max_history(),
            persist_pending: true,
        }
    }
}

impl RagerankConfig {
    /// Entity store settings derived from this configuration.
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            storage_key: self.storage_key.clone(),
            persist_pending: self.persist_pending,
            engine: EngineConfig {
                celebration_threshold: self.celebration_threshold,
                max_history: self.max_history,
            },
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

fn resolve_storage_config(config: &StorageConfig) -> StorageConfig {
    match config {
        StorageConfig::File { dir } => StorageConfig::File {
            dir: PathBuf::from(resolve_env_vars(&dir.to_string_lossy())),
        },
        StorageConfig::Memory => StorageConfig::Memory,
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order without a path:
/// 1. `ragerank.toml` in the current directory
/// 2. `~/.config/ragerank/config.toml`
///
/// `RAGERANK_DATA_DIR` overrides the storage backend.
pub fn load_config_from(path: Option<&Path>) -> Result<RagerankConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("ragerank.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading config");
            parse_config(
                &std::fs::read_to_string(&path)
                    .with_context(|| format!("failed to read config: {}", path.display()))?,
            )
            .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => RagerankConfig::default(),
    };

    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        if !dir.is_empty() {
            config.storage = StorageConfig::File {
                dir: PathBuf::from(dir),
            };
        }
    }

    config.storage = resolve_storage_config(&config.storage);
    Ok(config)
}

/// Parse a TOML config string and check its values.
pub fn parse_config(content: &str) -> Result<RagerankConfig> {
    let config: RagerankConfig = toml::from_str(content)?;
    if config.max_history == 0 {
        anyhow::bail!("max_history must be at least 1");
    }
    if config.storage_key.trim().is_empty() {
        anyhow::bail!("storage_key must not be empty");
    }
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("ragerank"))
}

/// Create a persistence backend from its configuration.
pub fn create_backend(config: &StorageConfig) -> Box<dyn Persistence> {
    match config {
        StorageConfig::File { dir } => Box::new(JsonFileStore::new(dir.clone())),
        StorageConfig::Memory => Box::new(MemoryStore::new()),
    }
}
