//! ragerank-storage — persistence backends and configuration.
//!
//! Implements the core `Persistence` trait for JSON files on disk and for
//! an in-memory map, and loads `ragerank.toml` configuration.

pub mod config;
pub mod error;
pub mod file;
pub mod memory;

pub use config::{create_backend, load_config_from, RagerankConfig, StorageConfig};
pub use error::StorageError;
pub use file::JsonFileStore;
pub use memory::MemoryStore;
