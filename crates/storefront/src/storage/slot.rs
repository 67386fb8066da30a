//! Typed, write-behind persistence for a single storage slot.

use std::marker::PhantomData;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, instrument, warn};

use super::KeyValueStore;

struct WriteRequest {
    value: String,
    ack: oneshot::Sender<bool>,
}

/// Handle for a queued slot write.
///
/// Dropping it leaves the write running in the background. Awaiting
/// [`PendingWrite::wait`] blocks until the value (or a newer one that
/// superseded it) has been written.
#[derive(Debug)]
pub struct PendingWrite {
    ack: Option<oneshot::Receiver<bool>>,
}

impl PendingWrite {
    const fn failed() -> Self {
        Self { ack: None }
    }

    /// Wait for the write to finish. Returns `true` if it reached storage.
    pub async fn wait(self) -> bool {
        match self.ack {
            Some(rx) => rx.await.unwrap_or(false),
            None => false,
        }
    }
}

/// A JSON array persisted under one storage key.
///
/// Opening the slot performs the only read. Every later [`save`] hands a
/// serialized snapshot to a background writer task, which applies snapshots
/// in the order they were submitted. When several snapshots are queued only
/// the newest is written, so storage always converges on the latest state.
///
/// The writer stops once the slot is dropped and its queue is drained.
///
/// [`save`]: PersistedSlot::save
pub struct PersistedSlot<T> {
    key: String,
    tx: mpsc::UnboundedSender<WriteRequest>,
    _items: PhantomData<fn() -> T>,
}

impl<T> std::fmt::Debug for PersistedSlot<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersistedSlot")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

impl<T: Serialize + DeserializeOwned> PersistedSlot<T> {
    /// Load the slot and start its writer task.
    ///
    /// A missing value, a read error, or unparseable JSON all yield an empty
    /// list; none of them is fatal.
    ///
    /// Must be called from within a Tokio runtime.
    #[instrument(skip(storage))]
    pub async fn open(storage: Arc<dyn KeyValueStore>, key: &str) -> (Self, Vec<T>) {
        let items = load_items(storage.as_ref(), key).await;

        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(run_writer(storage, key.to_owned(), rx));

        let slot = Self {
            key: key.to_owned(),
            tx,
            _items: PhantomData,
        };
        (slot, items)
    }

    /// Queue `items` to be written.
    ///
    /// Never fails: serialization or queueing problems are logged and
    /// reported through the returned handle.
    pub fn save(&self, items: &[T]) -> PendingWrite {
        let value = match serde_json::to_string(items) {
            Ok(value) => value,
            Err(e) => {
                warn!(key = %self.key, error = %e, "Failed to serialize slot");
                return PendingWrite::failed();
            }
        };

        let (ack, rx) = oneshot::channel();
        if self.tx.send(WriteRequest { value, ack }).is_err() {
            warn!(key = %self.key, "Slot writer is no longer running");
            return PendingWrite::failed();
        }
        PendingWrite { ack: Some(rx) }
    }
}

async fn load_items<T: DeserializeOwned>(storage: &dyn KeyValueStore, key: &str) -> Vec<T> {
    match storage.get(key).await {
        Ok(Some(raw)) => match serde_json::from_str::<Vec<T>>(&raw) {
            Ok(items) => {
                info!(key, count = items.len(), "Loaded slot");
                items
            }
            Err(e) => {
                warn!(key, error = %e, "Stored slot is malformed, starting empty");
                Vec::new()
            }
        },
        Ok(None) => {
            debug!(key, "No stored slot, starting empty");
            Vec::new()
        }
        Err(e) => {
            warn!(key, error = %e, "Failed to read slot, starting empty");
            Vec::new()
        }
    }
}

async fn run_writer(
    storage: Arc<dyn KeyValueStore>,
    key: String,
    mut rx: mpsc::UnboundedReceiver<WriteRequest>,
) {
    while let Some(first) = rx.recv().await {
        let mut superseded = Vec::new();
        let mut latest = first;
        while let Ok(next) = rx.try_recv() {
            superseded.push(std::mem::replace(&mut latest, next));
        }

        let ok = match storage.set(&key, &latest.value).await {
            Ok(()) => {
                debug!(key = %key, superseded = superseded.len(), "Persisted slot");
                true
            }
            Err(e) => {
                warn!(key = %key, error = %e, "Failed to persist slot");
                false
            }
        };

        for request in superseded {
            let _ = request.ack.send(ok);
        }
        let _ = latest.ack.send(ok);
    }
    debug!(key = %key, "Slot writer stopped");
}
