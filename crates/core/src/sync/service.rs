//! Opportunistic flush orchestration over the offline queue.

use std::sync::Arc;
use std::time::Duration;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::queue::{FlushReport, OfflineMutationQueue};
use crate::sync::{FlushGate, FLUSH_DEBOUNCE_SECS};

/// What prompted a sync attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncTrigger {
    Startup,
    Foreground,
    NetworkRestored,
    Manual,
}

impl SyncTrigger {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Startup => "startup",
            Self::Foreground => "foreground",
            Self::NetworkRestored => "network_restored",
            Self::Manual => "manual",
        }
    }
}

/// Funnels every flush trigger through the debounce gate.
///
/// The UI layers call [`sync`](Self::sync) from process start, foreground
/// transitions, and network-restored events; at most one flush pass begins
/// per debounce window. A skipped trigger is a silent no-op, reported as
/// `None` so callers can tell "skipped" from "flushed nothing".
pub struct SyncService {
    queue: Arc<OfflineMutationQueue>,
    gate: FlushGate,
}

impl SyncService {
    pub fn new(queue: Arc<OfflineMutationQueue>) -> Self {
        Self::with_gate(
            queue,
            FlushGate::new(Duration::from_secs(FLUSH_DEBOUNCE_SECS)),
        )
    }

    pub fn with_gate(queue: Arc<OfflineMutationQueue>, gate: FlushGate) -> Self {
        Self { queue, gate }
    }

    /// Run one flush pass unless the debounce window denies it.
    pub async fn sync(&self, trigger: SyncTrigger) -> Result<Option<FlushReport>> {
        if !self.gate.try_acquire() {
            debug!("Skipping {} sync inside debounce window", trigger.label());
            return Ok(None);
        }

        debug!("Starting {} sync", trigger.label());
        let report = self.queue.flush().await?;
        debug!(
            "{} sync done: {} applied, {} retried, {} dropped",
            trigger.label(),
            report.applied,
            report.retried,
            report.dropped
        );
        Ok(Some(report))
    }

    /// Pending mutation count, for the sync indicator.
    pub fn pending_count(&self) -> Result<usize> {
        self.queue.pending_count()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde_json::json;

    use super::*;
    use crate::queue::{KeyValueStore, MutationOperation, RemoteStore};
    use crate::sync::gate::test_clock::ManualClock;

    #[derive(Default)]
    struct MemoryStore {
        entries: Mutex<HashMap<String, Vec<u8>>>,
    }

    impl KeyValueStore for MemoryStore {
        fn read(&self, key: &str) -> Result<Option<Vec<u8>>> {
            Ok(self.entries.lock().unwrap().get(key).cloned())
        }

        fn write(&self, key: &str, value: &[u8]) -> Result<()> {
            self.entries
                .lock()
                .unwrap()
                .insert(key.to_string(), value.to_vec());
            Ok(())
        }

        fn delete(&self, key: &str) -> Result<()> {
            self.entries.lock().unwrap().remove(key);
            Ok(())
        }
    }

    #[derive(Default)]
    struct CountingRemote {
        applies: AtomicUsize,
    }

    impl CountingRemote {
        fn applies(&self) -> usize {
            self.applies.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl RemoteStore for CountingRemote {
        async fn apply(
            &self,
            _table: &str,
            _operation: MutationOperation,
            _payload: &serde_json::Value,
        ) -> Result<()> {
            self.applies.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn service_with_manual_clock() -> (SyncService, Arc<ManualClock>, Arc<CountingRemote>) {
        let remote = Arc::new(CountingRemote::default());
        let queue = Arc::new(OfflineMutationQueue::new(
            Arc::new(MemoryStore::default()),
            remote.clone(),
        ));
        let clock = Arc::new(ManualClock::new());
        let gate = FlushGate::with_clock(
            Duration::from_secs(FLUSH_DEBOUNCE_SECS),
            clock.clone(),
        );
        (SyncService::with_gate(queue, gate), clock, remote)
    }

    async fn enqueue_one(service: &SyncService) {
        service
            .queue
            .enqueue("sessions", MutationOperation::Insert, json!({ "id": "s-1" }))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn triggers_inside_window_collapse_to_one_pass() {
        let (service, _clock, remote) = service_with_manual_clock();
        enqueue_one(&service).await;

        let first = service.sync(SyncTrigger::Startup).await.unwrap();
        assert_eq!(first.map(|r| r.applied), Some(1));

        enqueue_one(&service).await;
        let second = service.sync(SyncTrigger::NetworkRestored).await.unwrap();
        assert!(second.is_none());

        // Only the first trigger produced remote traffic.
        assert_eq!(remote.applies(), 1);
        assert_eq!(service.pending_count().unwrap(), 1);
    }

    #[tokio::test]
    async fn window_expiry_allows_the_next_trigger() {
        let (service, clock, remote) = service_with_manual_clock();
        enqueue_one(&service).await;

        assert!(service.sync(SyncTrigger::Startup).await.unwrap().is_some());
        enqueue_one(&service).await;

        clock.advance(Duration::from_secs(FLUSH_DEBOUNCE_SECS));
        let report = service.sync(SyncTrigger::Foreground).await.unwrap();
        assert_eq!(report.map(|r| r.applied), Some(1));
        assert_eq!(remote.applies(), 2);
    }

    #[tokio::test]
    async fn debounced_sync_with_empty_queue_is_silent() {
        let (service, _clock, remote) = service_with_manual_clock();

        assert_eq!(
            service.sync(SyncTrigger::Startup).await.unwrap(),
            Some(FlushReport::default())
        );
        assert!(service.sync(SyncTrigger::Manual).await.unwrap().is_none());
        assert_eq!(remote.applies(), 0);
    }
}
