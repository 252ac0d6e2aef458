use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Keyed async mutex serializing the aggregate read-merge-write per IP.
///
/// Entries are created on demand and dropped again once no task holds or
/// waits on them, so the map only grows with concurrently active IPs.
#[derive(Default)]
pub struct IpMergeLocks {
    locks: Arc<DashMap<String, Arc<Mutex<()>>>>,
}

impl IpMergeLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn lock(&self, ip_address: &str) -> IpMergeGuard {
        let mutex = self
            .locks
            .entry(ip_address.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();

        let guard = mutex.lock_owned().await;

        IpMergeGuard {
            ip_address: ip_address.to_string(),
            guard: Some(guard),
            locks: Arc::clone(&self.locks),
        }
    }

    pub fn active(&self) -> usize {
        self.locks.len()
    }
}

pub struct IpMergeGuard {
    ip_address: String,
    guard: Option<OwnedMutexGuard<()>>,
    locks: Arc<DashMap<String, Arc<Mutex<()>>>>,
}

impl Drop for IpMergeGuard {
    fn drop(&mut self) {
        // Release first so the map entry is the only remaining reference
        // when nobody else is waiting.
        self.guard.take();
        self.locks
            .remove_if(&self.ip_address, |_, m| Arc::strong_count(m) == 1);
    }
}
