//! Queue service: the operations that mutate queue state.
//!
//! All mutating operations are serialized through a single write lock so
//! compound read-modify-write sequences never interleave, and each one
//! publishes a fresh status projection to every observer before the lock
//! is released. Reads (`status`) take no lock.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;

use crate::broadcast::QueueBroadcaster;
use crate::error::{AppError, Result};
use crate::store::QueueStore;

use super::{QueueItem, QueueSettings, QueueStatus, SettingsPatch, TicketStatus};

pub struct QueueService {
    store: Arc<dyn QueueStore>,
    broadcaster: Arc<QueueBroadcaster>,
    // Serializes mutating operations (single-writer)
    write_lock: Mutex<()>,
}

impl QueueService {
    pub fn new(store: Arc<dyn QueueStore>, broadcaster: Arc<QueueBroadcaster>) -> Self {
        Self {
            store,
            broadcaster,
            write_lock: Mutex::new(()),
        }
    }

    /// Current queue status projection.
    pub async fn status(&self) -> QueueStatus {
        let settings = self.store.read_settings().await;
        let waiting = self.store.list_by_status(TicketStatus::Waiting).await;
        let all = self.store.list_all().await;
        QueueStatus::project(&settings, &waiting, &all)
    }

    /// Issue the next sequential ticket, created in the waiting state.
    #[tracing::instrument(name = "queue.issue_ticket", skip(self))]
    pub async fn issue_ticket(&self) -> Result<QueueItem> {
        let _guard = self.write_lock.lock().await;

        let settings = self.store.read_settings().await;
        let number = settings.last_number + 1;
        self.store
            .write_settings(SettingsPatch {
                last_number: Some(number),
                ..Default::default()
            })
            .await;
        let item = self.store.insert(number, TicketStatus::Waiting).await?;

        tracing::info!(number, "Ticket issued");
        self.publish().await;
        Ok(item)
    }

    /// Call the smallest waiting number (FIFO by issuance order).
    ///
    /// The previously served ticket is left in whatever state it was in;
    /// staff complete it explicitly.
    #[tracing::instrument(name = "queue.call_next", skip(self))]
    pub async fn call_next(&self) -> Result<u32> {
        let _guard = self.write_lock.lock().await;

        let waiting = self.store.list_by_status(TicketStatus::Waiting).await;
        let next = waiting.first().ok_or(AppError::NoWaitingNumbers)?.number;
        self.set_current(next).await?;

        tracing::info!(number = next, "Called next number");
        self.publish().await;
        Ok(next)
    }

    /// Call a specific ticket regardless of its prior status. Recalling a
    /// completed ticket is allowed.
    #[tracing::instrument(name = "queue.call_number", skip(self))]
    pub async fn call_number(&self, number: u32) -> Result<u32> {
        let _guard = self.write_lock.lock().await;

        if self.store.get(number).await.is_none() {
            return Err(AppError::NotFound(number));
        }
        self.set_current(number).await?;

        tracing::info!(number, "Called specific number");
        self.publish().await;
        Ok(number)
    }

    /// Mark a ticket as completed. `current_number` is left unchanged.
    #[tracing::instrument(name = "queue.complete_number", skip(self))]
    pub async fn complete_number(&self, number: u32) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        self.store.set_status(number, TicketStatus::Completed).await?;

        tracing::info!(number, "Ticket completed");
        self.publish().await;
        Ok(())
    }

    /// Delete a ticket. If it was the one being served, the display drops
    /// back to "none".
    #[tracing::instrument(name = "queue.remove_number", skip(self))]
    pub async fn remove_number(&self, number: u32) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        self.store.delete(number).await?;

        let settings = self.store.read_settings().await;
        if settings.current_number == number {
            self.store
                .write_settings(SettingsPatch {
                    current_number: Some(0),
                    ..Default::default()
                })
                .await;
        }

        tracing::info!(number, "Ticket removed");
        self.publish().await;
        Ok(())
    }

    /// Clear every ticket and start a new epoch; numbering restarts at 1.
    #[tracing::instrument(name = "queue.reset", skip(self))]
    pub async fn reset_queue(&self) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        self.store.clear_all().await;
        self.store
            .write_settings(SettingsPatch {
                current_number: Some(0),
                last_number: Some(0),
                last_called_at: Some(None),
                epoch_started_at: Some(Utc::now()),
                ..Default::default()
            })
            .await;

        tracing::info!("Queue reset, new epoch started");
        self.publish().await;
        Ok(())
    }

    #[tracing::instrument(name = "queue.set_sound", skip(self))]
    pub async fn set_sound_enabled(&self, enabled: bool) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        self.store
            .write_settings(SettingsPatch {
                sound_enabled: Some(enabled),
                ..Default::default()
            })
            .await;

        self.publish().await;
        Ok(())
    }

    #[tracing::instrument(name = "queue.set_visual_alerts", skip(self))]
    pub async fn set_visual_alerts_enabled(&self, enabled: bool) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        self.store
            .write_settings(SettingsPatch {
                visual_alerts_enabled: Some(enabled),
                ..Default::default()
            })
            .await;

        self.publish().await;
        Ok(())
    }

    /// Current display settings (for callers that need them outside the
    /// projection).
    pub async fn settings(&self) -> QueueSettings {
        self.store.read_settings().await
    }

    /// Make `number` the served ticket and stamp the call time.
    async fn set_current(&self, number: u32) -> Result<()> {
        self.store
            .write_settings(SettingsPatch {
                current_number: Some(number),
                last_called_at: Some(Some(Utc::now())),
                ..Default::default()
            })
            .await;
        self.store.set_status(number, TicketStatus::Serving).await?;
        Ok(())
    }

    async fn publish(&self) {
        let status = self.status().await;
        self.broadcaster.publish(&status);
    }
}
