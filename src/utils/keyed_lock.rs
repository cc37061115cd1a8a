use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};

// ============================================================================
// Keyed Async Lock
// ============================================================================
//
// Serializes mutations per key: at most one holder per key at a time,
// while different keys proceed independently. Services hold the guard
// across their whole read-modify-rederive-write cycle so concurrent
// updates to the same aggregate cannot be lost.
//
// ============================================================================

pub struct KeyedLock<K> {
    locks: Mutex<HashMap<K, Arc<Mutex<()>>>>,
}

impl<K> KeyedLock<K>
where
    K: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self {
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Acquire the lock for a key, waiting until any current holder of the
    /// same key releases it. The guard releases on drop.
    pub async fn acquire(&self, key: &K) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            locks.entry(key.clone()).or_default().clone()
        };
        lock.lock_owned().await
    }
}

impl<K> Default for KeyedLock<K>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}
