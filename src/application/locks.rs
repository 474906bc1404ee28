use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// Per-owner mutual exclusion for cart read-modify-write sequences.
///
/// Both engines share one `OwnerLocks` so an add racing a checkout for the
/// same user is serialized, while different users never contend. Entries are
/// dropped from the registry once no task holds or waits on them.
#[derive(Default, Clone)]
pub struct OwnerLocks {
    registry: Arc<Mutex<HashMap<String, Arc<AsyncMutex<()>>>>>,
}

pub type OwnerGuard = OwnedMutexGuard<()>;

impl OwnerLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits until `owner` is free and returns a guard holding it.
    pub async fn acquire(&self, owner: &str) -> OwnerGuard {
        let lock = {
            let mut registry = self
                .registry
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            registry.retain(|_, lock| Arc::strong_count(lock) > 1);
            registry
                .entry(owner.to_string())
                .or_insert_with(|| Arc::new(AsyncMutex::new(())))
                .clone()
        };
        lock.lock_owned().await
    }

    /// Number of owners currently tracked.
    #[cfg(test)]
    fn tracked(&self) -> usize {
        self.registry
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }
}
