//! In-memory queue store backend.
//!
//! Tickets live in a `BTreeMap` keyed by number, so ordered listings fall
//! out of iteration order. All state is lost on restart.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::queue::{QueueItem, QueueSettings, SettingsPatch, TicketStatus};

use super::{QueueStore, StoreError};

#[derive(Debug, Default)]
struct MemoryInner {
    items: BTreeMap<u32, QueueItem>,
    settings: QueueSettings,
}

/// In-memory [`QueueStore`] backend.
pub struct MemoryStore {
    inner: RwLock<MemoryInner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(MemoryInner::default()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QueueStore for MemoryStore {
    async fn get(&self, number: u32) -> Option<QueueItem> {
        self.inner.read().await.items.get(&number).cloned()
    }

    async fn list_by_status(&self, status: TicketStatus) -> Vec<QueueItem> {
        self.inner
            .read()
            .await
            .items
            .values()
            .filter(|item| item.status == status)
            .cloned()
            .collect()
    }

    async fn list_all(&self) -> Vec<QueueItem> {
        self.inner.read().await.items.values().cloned().collect()
    }

    async fn insert(&self, number: u32, status: TicketStatus) -> Result<QueueItem, StoreError> {
        let mut inner = self.inner.write().await;
        if inner.items.contains_key(&number) {
            return Err(StoreError::DuplicateNumber(number));
        }

        let item = QueueItem {
            number,
            status,
            issued_at: Utc::now(),
        };
        inner.items.insert(number, item.clone());

        tracing::debug!(number, status = %status, "Ticket inserted");
        Ok(item)
    }

    async fn set_status(
        &self,
        number: u32,
        status: TicketStatus,
    ) -> Result<QueueItem, StoreError> {
        let mut inner = self.inner.write().await;
        let item = inner
            .items
            .get_mut(&number)
            .ok_or(StoreError::NotFound(number))?;
        item.status = status;

        tracing::debug!(number, status = %status, "Ticket status updated");
        Ok(item.clone())
    }

    async fn delete(&self, number: u32) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        inner
            .items
            .remove(&number)
            .map(|_| ())
            .ok_or(StoreError::NotFound(number))
    }

    async fn read_settings(&self) -> QueueSettings {
        self.inner.read().await.settings.clone()
    }

    async fn write_settings(&self, patch: SettingsPatch) {
        let mut inner = self.inner.write().await;
        patch.apply(&mut inner.settings);
    }

    async fn clear_all(&self) {
        let mut inner = self.inner.write().await;
        let removed = inner.items.len();
        inner.items.clear();

        tracing::debug!(removed, "Cleared all tickets");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_and_get() {
        let store = MemoryStore::new();
        let item = store.insert(1, TicketStatus::Waiting).await.unwrap();
        assert_eq!(item.number, 1);
        assert_eq!(item.status, TicketStatus::Waiting);

        let fetched = store.get(1).await.unwrap();
        assert_eq!(fetched, item);
        assert!(store.get(2).await.is_none());
    }

    #[tokio::test]
    async fn test_insert_duplicate_number_fails() {
        let store = MemoryStore::new();
        store.insert(1, TicketStatus::Waiting).await.unwrap();

        let err = store.insert(1, TicketStatus::Waiting).await.unwrap_err();
        assert_eq!(err, StoreError::DuplicateNumber(1));
    }

    #[tokio::test]
    async fn test_listings_are_ordered_by_number() {
        let store = MemoryStore::new();
        // Insert out of order
        store.insert(3, TicketStatus::Waiting).await.unwrap();
        store.insert(1, TicketStatus::Waiting).await.unwrap();
        store.insert(2, TicketStatus::Serving).await.unwrap();

        let all: Vec<u32> = store.list_all().await.iter().map(|i| i.number).collect();
        assert_eq!(all, vec![1, 2, 3]);

        let waiting: Vec<u32> = store
            .list_by_status(TicketStatus::Waiting)
            .await
            .iter()
            .map(|i| i.number)
            .collect();
        assert_eq!(waiting, vec![1, 3]);
    }

    #[tokio::test]
    async fn test_set_status() {
        let store = MemoryStore::new();
        store.insert(1, TicketStatus::Waiting).await.unwrap();

        let updated = store.set_status(1, TicketStatus::Serving).await.unwrap();
        assert_eq!(updated.status, TicketStatus::Serving);
        assert_eq!(store.get(1).await.unwrap().status, TicketStatus::Serving);

        let err = store.set_status(9, TicketStatus::Serving).await.unwrap_err();
        assert_eq!(err, StoreError::NotFound(9));
    }

    #[tokio::test]
    async fn test_delete() {
        let store = MemoryStore::new();
        store.insert(1, TicketStatus::Waiting).await.unwrap();

        store.delete(1).await.unwrap();
        assert!(store.get(1).await.is_none());

        let err = store.delete(1).await.unwrap_err();
        assert_eq!(err, StoreError::NotFound(1));
    }

    #[tokio::test]
    async fn test_settings_created_with_defaults() {
        let store = MemoryStore::new();
        let settings = store.read_settings().await;
        assert_eq!(settings.current_number, 0);
        assert_eq!(settings.last_number, 0);
        assert!(settings.sound_enabled);
        assert!(settings.visual_alerts_enabled);
    }

    #[tokio::test]
    async fn test_write_settings_is_partial() {
        let store = MemoryStore::new();
        store
            .write_settings(SettingsPatch {
                last_number: Some(5),
                ..Default::default()
            })
            .await;
        store
            .write_settings(SettingsPatch {
                sound_enabled: Some(false),
                ..Default::default()
            })
            .await;

        let settings = store.read_settings().await;
        assert_eq!(settings.last_number, 5);
        assert!(!settings.sound_enabled);
        assert!(settings.visual_alerts_enabled);
    }

    #[tokio::test]
    async fn test_clear_all_keeps_settings() {
        let store = MemoryStore::new();
        store.insert(1, TicketStatus::Waiting).await.unwrap();
        store.insert(2, TicketStatus::Serving).await.unwrap();
        store
            .write_settings(SettingsPatch {
                sound_enabled: Some(false),
                ..Default::default()
            })
            .await;

        store.clear_all().await;

        assert!(store.list_all().await.is_empty());
        assert!(!store.read_settings().await.sound_enabled);
    }
}
