//! In-memory file provider for tests and embedding.
//!
//! Clones share one backing map, so a caller can hand a clone to a store
//! and keep another to inspect what was written.

use crate::provider::file::FileProvider;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
struct MemoryState {
    files: BTreeMap<String, String>,
    directories: BTreeSet<String>,
    fail_reads: bool,
    fail_writes: bool,
    write_count: usize,
}

/// Shared-handle fake with switchable failure modes.
#[derive(Debug, Clone, Default)]
pub struct MemoryFileProvider {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryFileProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Provider pre-seeded with one file.
    pub fn with_file(path: &str, content: &str) -> Self {
        let provider = Self::new();
        provider.put(path, content);
        provider
    }

    /// Sets file content without counting it as a store write.
    pub fn put(&self, path: &str, content: &str) {
        self.lock().files.insert(path.to_string(), content.to_string());
    }

    pub fn contents(&self, path: &str) -> Option<String> {
        self.lock().files.get(path).cloned()
    }

    pub fn remove(&self, path: &str) {
        self.lock().files.remove(path);
    }

    /// Makes subsequent `read` calls return `None`.
    pub fn fail_reads(&self, fail: bool) {
        self.lock().fail_reads = fail;
    }

    /// Makes subsequent `write` calls return `false` without applying.
    pub fn fail_writes(&self, fail: bool) {
        self.lock().fail_writes = fail;
    }

    /// Number of `write` calls that took effect.
    pub fn write_count(&self) -> usize {
        self.lock().write_count
    }

    pub fn has_directory(&self, path: &str) -> bool {
        self.lock().directories.contains(path)
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl FileProvider for MemoryFileProvider {
    fn exists(&self, path: &str) -> bool {
        let state = self.lock();
        state.files.contains_key(path) || state.directories.contains(path)
    }

    fn read(&self, path: &str) -> Option<String> {
        let state = self.lock();
        if state.fail_reads {
            return None;
        }
        state.files.get(path).cloned()
    }

    fn write(&self, path: &str, content: &str) -> bool {
        let mut state = self.lock();
        if state.fail_writes {
            return false;
        }
        state.files.insert(path.to_string(), content.to_string());
        state.write_count += 1;
        true
    }

    fn ensure_directory(&self, path: &str) -> bool {
        self.lock().directories.insert(path.to_string());
        true
    }
}
