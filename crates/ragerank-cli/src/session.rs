//! Opening the board and resolving teachers named on the command line.

use std::path::PathBuf;

use anyhow::{bail, Result};

use ragerank_core::traits::Persistence;
use ragerank_core::{BoardError, Collection, EntityStore, TeacherId};
use ragerank_storage::config::{create_backend, load_config_from, StorageConfig};

/// The store type every command works on.
pub type Board = EntityStore<Box<dyn Persistence>>;

/// Shortest id prefix accepted when naming a teacher.
const MIN_ID_PREFIX: usize = 4;

pub const CONFETTI_BANNER: &str = "🎉🎊 RAGE OVERLOAD! 🎊🎉";

/// Global path options shared by all commands.
pub struct Paths {
    pub config: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,
}

/// Load configuration, build the backend, and load the collection.
pub fn open(paths: &Paths) -> Result<Board> {
    let mut config = load_config_from(paths.config.as_deref())?;
    if let Some(dir) = &paths.data_dir {
        config.storage = StorageConfig::File { dir: dir.clone() };
    }

    tracing::debug!(storage = ?config.storage, key = %config.storage_key, "opening board");
    let backend = create_backend(&config.storage);
    let mut board = EntityStore::new(backend, config.store_config())
        .with_hook(|| println!("{CONFETTI_BANNER}"));
    warn(board.load().warning);
    if board.is_degraded() {
        eprintln!("warning: saved data could not be read, changes will not be saved");
    }
    Ok(board)
}

/// Print a non-fatal board warning to stderr.
pub fn warn(warning: Option<BoardError>) {
    if let Some(w) = warning {
        eprintln!("warning: {w}");
    }
}

/// Find a teacher by exact id, unique id prefix, or case-insensitive name.
pub fn resolve(collection: &Collection, needle: &str) -> Result<TeacherId> {
    let needle = needle.trim();

    if let Ok(id) = needle.parse::<TeacherId>() {
        if collection.contains(id) {
            return Ok(id);
        }
    }

    let lowered = needle.to_lowercase();
    if lowered.len() >= MIN_ID_PREFIX {
        let by_prefix: Vec<TeacherId> = collection
            .iter()
            .filter(|r| r.id.to_string().starts_with(&lowered))
            .map(|r| r.id)
            .collect();
        match by_prefix.as_slice() {
            [id] => return Ok(*id),
            [] => {}
            _ => bail!("id prefix '{needle}' matches {} teachers", by_prefix.len()),
        }
    }

    let by_name: Vec<TeacherId> = collection
        .iter()
        .filter(|r| r.name.to_lowercase() == lowered)
        .map(|r| r.id)
        .collect();
    match by_name.as_slice() {
        [id] => Ok(*id),
        [] => bail!("no teacher matches '{needle}'"),
        _ => bail!(
            "{} teachers are named '{needle}', use an id instead",
            by_name.len()
        ),
    }
}

/// First eight characters of an id, enough to name it on the command line.
pub fn short_id(id: TeacherId) -> String {
    id.to_string().chars().take(8).collect()
}
