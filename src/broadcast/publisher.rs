use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::Serialize;

use crate::queue::QueueStatus;
use crate::websocket::{OutboundMessage, ServerMessage};

use super::ObserverRegistry;

/// Counters for broadcast fan-out.
#[derive(Debug, Default)]
pub struct BroadcastStats {
    /// Projections published
    pub published: AtomicU64,
    /// Successful per-observer deliveries
    pub delivered: AtomicU64,
    /// Deliveries skipped because the observer's channel was full or
    /// closed
    pub dropped: AtomicU64,
}

impl BroadcastStats {
    pub fn snapshot(&self) -> BroadcastStatsSnapshot {
        BroadcastStatsSnapshot {
            published: self.published.load(Ordering::Relaxed),
            delivered: self.delivered.load(Ordering::Relaxed),
            dropped: self.dropped.load(Ordering::Relaxed),
        }
    }
}

/// Snapshot of broadcast statistics.
#[derive(Debug, Clone, Serialize)]
pub struct BroadcastStatsSnapshot {
    pub published: u64,
    pub delivered: u64,
    pub dropped: u64,
}

/// Fans the queue status projection out to every registered observer.
///
/// Best-effort: delivery never blocks and a slow or disconnected observer
/// is skipped, not treated as an error. The next mutation (or a client
/// poll) corrects any missed update.
pub struct QueueBroadcaster {
    registry: Arc<ObserverRegistry>,
    stats: BroadcastStats,
}

impl QueueBroadcaster {
    pub fn new(registry: Arc<ObserverRegistry>) -> Self {
        Self {
            registry,
            stats: BroadcastStats::default(),
        }
    }

    pub fn stats(&self) -> BroadcastStatsSnapshot {
        self.stats.snapshot()
    }

    /// Serialize the projection once and push it to all observers.
    /// Returns the number of observers it was delivered to.
    pub fn publish(&self, status: &QueueStatus) -> usize {
        let observers = self.registry.observers();
        if observers.is_empty() {
            return 0;
        }

        let message = ServerMessage::queue_update(status.clone());
        let raw: Arc<str> = match serde_json::to_string(&message) {
            Ok(json) => json.into(),
            Err(e) => {
                tracing::error!(error = %e, "Failed to serialize queue update");
                return 0;
            }
        };

        self.stats.published.fetch_add(1, Ordering::Relaxed);

        let mut delivered = 0;
        for handle in &observers {
            match handle.try_send(OutboundMessage::Raw(raw.clone())) {
                Ok(()) => delivered += 1,
                Err(e) => {
                    self.stats.dropped.fetch_add(1, Ordering::Relaxed);
                    tracing::debug!(
                        observer_id = %handle.id,
                        error = %e,
                        "Skipping observer during broadcast"
                    );
                }
            }
        }
        self.stats.delivered.fetch_add(delivered as u64, Ordering::Relaxed);

        tracing::debug!(
            observers = observers.len(),
            delivered,
            "Queue update broadcast"
        );

        delivered
    }
}
