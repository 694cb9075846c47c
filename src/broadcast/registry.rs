use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::websocket::OutboundMessage;

/// Handle for a single connected observer (display or admin client).
pub struct ObserverHandle {
    pub id: Uuid,
    pub connected_at: DateTime<Utc>,
    sender: mpsc::Sender<OutboundMessage>,
}

impl ObserverHandle {
    fn new(sender: mpsc::Sender<OutboundMessage>) -> Self {
        Self {
            id: Uuid::new_v4(),
            connected_at: Utc::now(),
            sender,
        }
    }

    /// Queue a message for this observer, waiting for channel capacity.
    pub async fn send(
        &self,
        message: OutboundMessage,
    ) -> Result<(), mpsc::error::SendError<OutboundMessage>> {
        self.sender.send(message).await
    }

    /// Queue a message without waiting. Fails when the observer's channel
    /// is full or closed.
    pub fn try_send(
        &self,
        message: OutboundMessage,
    ) -> Result<(), mpsc::error::TrySendError<OutboundMessage>> {
        self.sender.try_send(message)
    }

    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

/// Registry of all currently-connected observers.
pub struct ObserverRegistry {
    observers: DashMap<Uuid, Arc<ObserverHandle>>,
}

impl ObserverRegistry {
    pub fn new() -> Self {
        Self {
            observers: DashMap::new(),
        }
    }

    /// Register a new observer and return its handle.
    pub fn register(&self, sender: mpsc::Sender<OutboundMessage>) -> Arc<ObserverHandle> {
        let handle = Arc::new(ObserverHandle::new(sender));
        self.observers.insert(handle.id, handle.clone());

        tracing::info!(
            observer_id = %handle.id,
            total = self.observers.len(),
            "Observer registered"
        );

        handle
    }

    /// Remove an observer. Safe to call for an already-removed id.
    pub fn unregister(&self, observer_id: Uuid) {
        if self.observers.remove(&observer_id).is_some() {
            tracing::info!(
                observer_id = %observer_id,
                total = self.observers.len(),
                "Observer unregistered"
            );
        }
    }

    /// Snapshot of all registered observer handles.
    pub fn observers(&self) -> Vec<Arc<ObserverHandle>> {
        self.observers.iter().map(|r| r.value().clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl Default for ObserverRegistry {
    fn default() -> Self {
        Self::new()
    }
}
