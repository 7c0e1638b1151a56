//! In-memory preference store

use envswitch_application::{PersistenceError, PreferenceStore};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

/// Preference store that lives only as long as the process.
///
/// Used for previewing switches without touching disk. Writes can be made
/// to fail on demand.
#[derive(Default)]
pub struct MemoryPreferenceStore {
    committed: Mutex<HashMap<String, i64>>,
    staged: Mutex<HashMap<String, i64>>,
    fail_writes: AtomicBool,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from already-committed values
    pub fn with_values<K: Into<String>>(values: impl IntoIterator<Item = (K, i64)>) -> Self {
        let store = Self::default();
        if let Ok(mut committed) = store.committed.lock() {
            committed.extend(values.into_iter().map(|(k, v)| (k.into(), v)));
        }
        store
    }

    /// Make every subsequent `put_long` and `commit` fail
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Committed value for `key`
    pub fn get(&self, key: &str) -> Option<i64> {
        self.committed.lock().ok()?.get(key).copied()
    }

    fn check_writable(&self) -> Result<(), PersistenceError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(PersistenceError::Write {
                location: "memory".to_string(),
                message: "writes disabled".to_string(),
            });
        }
        Ok(())
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get_long(&self, key: &str, default: i64) -> Result<i64, PersistenceError> {
        let committed = self
            .committed
            .lock()
            .map_err(|_| PersistenceError::Unavailable("memory store lock poisoned".to_string()))?;
        Ok(committed.get(key).copied().unwrap_or(default))
    }

    fn put_long(&self, key: &str, value: i64) -> Result<(), PersistenceError> {
        self.check_writable()?;
        self.staged
            .lock()
            .map_err(|_| PersistenceError::Unavailable("memory store lock poisoned".to_string()))?
            .insert(key.to_string(), value);
        Ok(())
    }

    fn commit(&self) -> Result<(), PersistenceError> {
        let poisoned = || PersistenceError::Unavailable("memory store lock poisoned".to_string());
        // Staged values are dropped even when the commit fails.
        let staged: Vec<_> = self.staged.lock().map_err(|_| poisoned())?.drain().collect();
        self.check_writable()?;
        self.committed.lock().map_err(|_| poisoned())?.extend(staged);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_publishes_staged_values() {
        let store = MemoryPreferenceStore::new();
        store.put_long("k", 4).unwrap();
        assert_eq!(store.get_long("k", 0).unwrap(), 0);
        store.commit().unwrap();
        assert_eq!(store.get("k"), Some(4));
    }

    #[test]
    fn test_with_values() {
        let store = MemoryPreferenceStore::with_values([("k", 99)]);
        assert_eq!(store.get_long("k", 1).unwrap(), 99);
        assert_eq!(store.get_long("missing", 1).unwrap(), 1);
    }

    #[test]
    fn test_failing_writes() {
        let store = MemoryPreferenceStore::new();
        store.set_fail_writes(true);
        assert!(matches!(
            store.put_long("k", 1),
            Err(PersistenceError::Write { .. })
        ));
        assert!(store.commit().is_err());
        assert_eq!(store.get("k"), None);
    }

    #[test]
    fn test_failed_commit_discards_staged_values() {
        let store = MemoryPreferenceStore::new();
        store.put_long("domain.a", 2).unwrap();
        store.set_fail_writes(true);
        assert!(store.commit().is_err());

        store.set_fail_writes(false);
        store.put_long("domain.b", 5).unwrap();
        store.commit().unwrap();

        assert_eq!(store.get("domain.a"), None);
        assert_eq!(store.get("domain.b"), Some(5));
    }
}
