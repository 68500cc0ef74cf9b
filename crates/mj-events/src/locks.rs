use crate::tenant::TenantKey;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Hands out one async mutex per tenant key.
///
/// Entries are never evicted; the table grows with the number of distinct
/// tenants seen by the process.
#[derive(Clone, Default)]
pub struct TenantLocks {
    inner: Arc<Mutex<HashMap<String, Arc<Mutex<()>>>>>,
}

impl TenantLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for exclusive access to `key`. Access ends when the guard drops.
    pub async fn acquire(&self, key: &TenantKey) -> OwnedMutexGuard<()> {
        let lock = {
            let mut guard = self.inner.lock().await;
            guard.entry(key.as_str().to_string()).or_default().clone()
        };
        lock.lock_owned().await
    }
}
