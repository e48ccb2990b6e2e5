//! In-memory backend for tests and throwaway sessions.

use std::collections::HashMap;

use ragerank_core::traits::Persistence;
use ragerank_core::BoardResult;

use crate::error::StorageError;

/// A persistence backend that keeps blobs in a `HashMap`.
///
/// Counts writes and can be told to fail reads or writes, so callers can
/// exercise the degraded paths without touching a disk.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    blobs: HashMap<String, String>,
    write_count: usize,
    fail_reads: bool,
    fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `blob` under `key`.
    pub fn with_blob(key: &str, blob: &str) -> Self {
        let mut store = Self::default();
        store.blobs.insert(key.to_string(), blob.to_string());
        store
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.write_count
    }

    pub fn blob(&self, key: &str) -> Option<&str> {
        self.blobs.get(key).map(String::as_str)
    }

    pub fn set_fail_reads(&mut self, fail: bool) {
        self.fail_reads = fail;
    }

    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }
}

impl Persistence for MemoryStore {
    fn read_all(&self, key: &str) -> BoardResult<Option<String>> {
        if self.fail_reads {
            return Err(StorageError::Simulated("read").into());
        }
        Ok(self.blobs.get(key).cloned())
    }

    fn write_all(&mut self, key: &str, blob: &str) -> BoardResult<()> {
        if self.fail_writes {
            return Err(StorageError::Simulated("write").into());
        }
        self.write_count += 1;
        self.blobs.insert(key.to_string(), blob.to_string());
        Ok(())
    }
}
