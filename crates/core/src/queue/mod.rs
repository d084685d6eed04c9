//! Durable, ordered, at-least-once buffer of pending remote writes.
//!
//! UI actions enqueue mutations here when the remote service may be
//! unreachable; a later flush applies them in enqueue order. The whole queue
//! is persisted as one serialized blob under a single storage key: each
//! flush reads it, works in memory, and rewrites it once at the end. A crash
//! mid-flush can therefore re-apply mutations that already reached the
//! remote but were not yet removed from the persisted queue (at-least-once).

mod model;

pub use model::*;


use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use log::{debug, warn};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::errors::Result;

/// Storage key the queue blob lives under unless configured otherwise.
pub const DEFAULT_QUEUE_KEY: &str = "offline_queue";

/// Local durable key-value storage the queue persists through.
pub trait KeyValueStore: Send + Sync {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>>;
    fn write(&self, key: &str, value: &[u8]) -> Result<()>;
    fn delete(&self, key: &str) -> Result<()>;
}

/// The one capability the queue needs from the hosted data service:
/// apply a single row write to a named table.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    async fn apply(
        &self,
        table: &str,
        operation: MutationOperation,
        payload: &serde_json::Value,
    ) -> Result<()>;
}

/// FIFO buffer of pending writes with a bounded retry budget per entry.
///
/// The queue owns its storage key explicitly; construct one per process and
/// share it by reference. Callers trigger [`flush`](Self::flush)
/// opportunistically (startup, foreground, network restored); the internal
/// mutex serializes the read-modify-write cycle so overlapping triggers
/// cannot corrupt the persisted blob.
pub struct OfflineMutationQueue {
    storage: Arc<dyn KeyValueStore>,
    remote: Arc<dyn RemoteStore>,
    queue_key: String,
    cycle_lock: Mutex<()>,
}

impl OfflineMutationQueue {
    pub fn new(storage: Arc<dyn KeyValueStore>, remote: Arc<dyn RemoteStore>) -> Self {
        Self::with_queue_key(storage, remote, DEFAULT_QUEUE_KEY)
    }

    pub fn with_queue_key(
        storage: Arc<dyn KeyValueStore>,
        remote: Arc<dyn RemoteStore>,
        queue_key: impl Into<String>,
    ) -> Self {
        Self {
            storage,
            remote,
            queue_key: queue_key.into(),
            cycle_lock: Mutex::new(()),
        }
    }

    /// Read the persisted queue. A missing key is an empty queue; a blob
    /// that no longer deserializes is treated as empty too: fail open, lose
    /// the pending mutations, instead of wedging every later write.
    fn read_queue(&self) -> Result<Vec<QueuedMutation>> {
        let Some(bytes) = self.storage.read(&self.queue_key)? else {
            return Ok(Vec::new());
        };

        match serde_json::from_slice(&bytes) {
            Ok(queue) => Ok(queue),
            Err(err) => {
                warn!(
                    "Discarding corrupt offline queue blob under '{}': {}",
                    self.queue_key, err
                );
                Ok(Vec::new())
            }
        }
    }

    fn write_queue(&self, queue: &[QueuedMutation]) -> Result<()> {
        let bytes = serde_json::to_vec(queue)?;
        self.storage.write(&self.queue_key, &bytes)
    }

    /// Append a mutation with a fresh id and a zeroed retry count.
    ///
    /// Storage failures are returned to the caller rather than swallowed.
    /// No size bound is enforced; unbounded growth is a known limitation.
    pub async fn enqueue(
        &self,
        table: &str,
        operation: MutationOperation,
        payload: serde_json::Value,
    ) -> Result<()> {
        let _guard = self.cycle_lock.lock().await;

        let mut queue = self.read_queue()?;
        queue.push(QueuedMutation {
            id: Uuid::now_v7().to_string(),
            table: table.to_string(),
            operation,
            payload,
            created_at: Utc::now().to_rfc3339(),
            retry_count: 0,
        });
        self.write_queue(&queue)
    }

    /// Number of mutations currently pending. Side-effect free.
    pub fn pending_count(&self) -> Result<usize> {
        Ok(self.read_queue()?.len())
    }

    /// Apply every queued mutation against the remote service, in FIFO
    /// order, strictly sequentially.
    ///
    /// Applied mutations leave the queue; failed ones have their retry count
    /// bumped and keep their relative order while under
    /// [`MUTATION_MAX_RETRIES`], after which they are dropped. One failing
    /// mutation never aborts the rest of the pass. The surviving list is
    /// persisted as a single overwrite after the full pass; an empty queue
    /// returns immediately without touching storage.
    pub async fn flush(&self) -> Result<FlushReport> {
        let _guard = self.cycle_lock.lock().await;

        let queue = self.read_queue()?;
        if queue.is_empty() {
            return Ok(FlushReport::default());
        }

        debug!("Flushing {} queued mutations", queue.len());
        let mut remaining: Vec<QueuedMutation> = Vec::new();
        let mut report = FlushReport::default();

        for mut mutation in queue {
            match self
                .remote
                .apply(&mutation.table, mutation.operation, &mutation.payload)
                .await
            {
                Ok(()) => report.applied += 1,
                Err(err) => {
                    mutation.retry_count += 1;
                    if mutation.retry_count < MUTATION_MAX_RETRIES {
                        debug!(
                            "Mutation {} ({} on '{}') failed attempt {}/{}: {}",
                            mutation.id,
                            mutation.operation.label(),
                            mutation.table,
                            mutation.retry_count,
                            MUTATION_MAX_RETRIES,
                            err
                        );
                        report.retried += 1;
                        remaining.push(mutation);
                    } else {
                        warn!(
                            "Dropping mutation {} ({} on '{}') after {} failed attempts: {}",
                            mutation.id,
                            mutation.operation.label(),
                            mutation.table,
                            mutation.retry_count,
                            err
                        );
                        report.dropped += 1;
                    }
                }
            }
        }

        self.write_queue(&remaining)?;
        debug!(
            "Flush done: {} applied, {} retried, {} dropped",
            report.applied, report.retried, report.dropped
        );
        Ok(report)
    }

    /// Unconditionally empty the persisted queue. Diagnostic/reset only.
    pub async fn clear(&self) -> Result<()> {
        let _guard = self.cycle_lock.lock().await;
        self.storage.delete(&self.queue_key)
    }
}
