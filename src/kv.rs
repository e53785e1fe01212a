//! Byte-blob key-value persistence used by the record store.
//!
//! No transactionality is promised across keys; each `set` stands alone.

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Arc, RwLock,
    },
};

use anyhow::{anyhow, bail, Result};

pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;
    fn set(&self, key: &str, value: &[u8]) -> Result<()>;
}

/// In-process store for tests and throwaway sessions.
///
/// Clones share state. `fail_writes` makes every `set` return an error so
/// callers can exercise their best-effort save path.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<HashMap<String, Vec<u8>>>>,
    fail_writes: Arc<AtomicBool>,
    write_attempts: Arc<AtomicUsize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn write_attempts(&self) -> usize {
        self.write_attempts.load(Ordering::SeqCst)
    }

    /// Overwrite a key directly, bypassing the failure switch.
    pub fn insert_raw(&self, key: &str, value: &[u8]) {
        let mut guard = match self.entries.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.insert(key.to_string(), value.to_vec());
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let guard = self
            .entries
            .read()
            .map_err(|_| anyhow!("memory store lock poisoned"))?;
        Ok(guard.get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        self.write_attempts.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            bail!("write to '{key}' rejected");
        }

        let mut guard = self
            .entries
            .write()
            .map_err(|_| anyhow!("memory store lock poisoned"))?;
        guard.insert(key.to_string(), value.to_vec());
        Ok(())
    }
}
