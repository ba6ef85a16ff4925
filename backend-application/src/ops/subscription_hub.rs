use std::collections::HashMap;

use backend_domain::{ViewModel, ViewSink};
use tokio::sync::Mutex;
use tracing::{debug, warn};
use uuid::Uuid;

/// Scope used by global update and reset. It matches only connections whose
/// page id is literally empty, which the streaming endpoint never registers.
pub const GLOBAL_SCOPE: &str = "";

pub type ConnectionId = Uuid;

struct Subscriber {
    page_id: String,
    sink: Box<dyn ViewSink>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BroadcastOutcome {
    pub delivered: usize,
    pub dropped: usize,
}

/// Live streaming connections tagged with the page they subscribed to.
///
/// Register, unregister and broadcast share one mutex. A broadcast holds it
/// for the whole pass, so membership is stable while it iterates and a
/// connection removed by a concurrent call never sees a later frame.
#[derive(Default)]
pub struct SubscriptionHub {
    connections: Mutex<HashMap<ConnectionId, Subscriber>>,
}

impl SubscriptionHub {
    pub async fn register(&self, page_id: &str, sink: Box<dyn ViewSink>) -> ConnectionId {
        let id = Uuid::new_v4();
        let mut connections = self.connections.lock().await;
        connections.insert(
            id,
            Subscriber {
                page_id: page_id.to_string(),
                sink,
            },
        );
        debug!(
            "subscriber registered: id={}, page_id={}, live={}",
            id,
            page_id,
            connections.len()
        );
        id
    }

    /// Removes and closes the connection. Returns false when it was already gone.
    pub async fn unregister(&self, id: ConnectionId) -> bool {
        let removed = {
            let mut connections = self.connections.lock().await;
            connections.remove(&id)
        };
        match removed {
            Some(mut subscriber) => {
                subscriber.sink.close().await;
                debug!(
                    "subscriber unregistered: id={}, page_id={}",
                    id, subscriber.page_id
                );
                true
            }
            None => false,
        }
    }

    /// Sends `view` to every connection subscribed to `page_id`.
    ///
    /// Connections whose send fails are closed and removed before this
    /// returns; failed sends are never retried.
    pub async fn broadcast(&self, view: &ViewModel, page_id: &str) -> BroadcastOutcome {
        let payload = match serde_json::to_string(view) {
            Ok(payload) => payload,
            Err(err) => {
                warn!("failed to encode view for page {:?}: {}", page_id, err);
                return BroadcastOutcome::default();
            }
        };

        let mut connections = self.connections.lock().await;
        let mut outcome = BroadcastOutcome::default();
        let mut failed = Vec::new();
        for (id, subscriber) in connections.iter_mut() {
            if subscriber.page_id != page_id {
                continue;
            }
            match subscriber.sink.send_text(payload.clone()).await {
                Ok(()) => outcome.delivered += 1,
                Err(err) => {
                    warn!(
                        "websocket send failed: id={}, page_id={:?}, err={}",
                        id, page_id, err
                    );
                    failed.push(*id);
                }
            }
        }
        for id in failed {
            if let Some(mut subscriber) = connections.remove(&id) {
                subscriber.sink.close().await;
                outcome.dropped += 1;
            }
        }
        debug!(
            "broadcast to page {:?}: delivered={}, dropped={}",
            page_id, outcome.delivered, outcome.dropped
        );
        outcome
    }

    /// Sends `view` to a single connection. A failed send drops it, exactly
    /// as a broadcast would. Returns whether the frame was delivered.
    pub async fn send_to(&self, id: ConnectionId, view: &ViewModel) -> bool {
        let payload = match serde_json::to_string(view) {
            Ok(payload) => payload,
            Err(err) => {
                warn!("failed to encode view for connection {}: {}", id, err);
                return false;
            }
        };

        let mut connections = self.connections.lock().await;
        let Some(subscriber) = connections.get_mut(&id) else {
            return false;
        };
        match subscriber.sink.send_text(payload).await {
            Ok(()) => true,
            Err(err) => {
                warn!("websocket send failed: id={}, err={}", id, err);
                if let Some(mut subscriber) = connections.remove(&id) {
                    subscriber.sink.close().await;
                }
                false
            }
        }
    }

    #[cfg(test)]
    pub(crate) async fn contains(&self, id: ConnectionId) -> bool {
        self.connections.lock().await.contains_key(&id)
    }

    pub async fn connection_count(&self) -> usize {
        self.connections.lock().await.len()
    }

    #[cfg(test)]
    pub(crate) async fn page_connection_count(&self, page_id: &str) -> usize {
        let connections = self.connections.lock().await;
        connections
            .values()
            .filter(|subscriber| subscriber.page_id == page_id)
            .count()
    }
}
