//! Per-key async locks.

use std::{collections::HashMap, hash::Hash, sync::Arc};

use tokio::sync::{Mutex, OwnedMutexGuard};

/// Lock table entries are swept once the table grows past this size.
const SWEEP_THRESHOLD: usize = 1024;

/// A table of async mutexes, one per key.
///
/// Operations on the same key run one at a time while operations on different keys
/// proceed in parallel. The guard may be held across `.await` points.
pub struct KeyedLocks<K> {
    locks: Mutex<HashMap<K, Arc<Mutex<()>>>>,
}

impl<K> Default for KeyedLocks<K> {
    fn default() -> Self {
        Self {
            locks: Mutex::new(HashMap::new()),
        }
    }
}

impl<K: Eq + Hash> KeyedLocks<K> {
    /// Waits until the lock for `key` is free and takes it.
    pub async fn lock(&self, key: K) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            if locks.len() > SWEEP_THRESHOLD {
                // Entries only referenced by the table are not held by anyone
                locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            }
            locks.entry(key).or_default().clone()
        };

        lock.lock_owned().await
    }
}
