use std::sync::Arc;
use std::time::Instant;

use crate::broadcast::{ObserverRegistry, QueueBroadcaster};
use crate::config::Settings;
use crate::queue::QueueService;
use crate::store::{MemoryStore, QueueStore};

#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub registry: Arc<ObserverRegistry>,
    pub broadcaster: Arc<QueueBroadcaster>,
    pub queue: Arc<QueueService>,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        let store: Arc<dyn QueueStore> = Arc::new(MemoryStore::new());
        Self::with_store(settings, store)
    }

    /// Build state around a specific store backend.
    pub fn with_store(settings: Settings, store: Arc<dyn QueueStore>) -> Self {
        let registry = Arc::new(ObserverRegistry::new());
        let broadcaster = Arc::new(QueueBroadcaster::new(registry.clone()));
        let queue = Arc::new(QueueService::new(store, broadcaster.clone()));

        Self {
            settings: Arc::new(settings),
            registry,
            broadcaster,
            queue,
            start_time: Instant::now(),
        }
    }
}
