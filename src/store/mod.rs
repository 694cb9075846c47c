//! Queue store abstraction.
//!
//! Defines the storage contract for queue tickets and the settings
//! singleton, allowing different backends to be used interchangeably.
//! The service ships with an in-memory backend; a persistent backend
//! implements the same trait.

mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;
use thiserror::Error;

use crate::queue::{QueueItem, QueueSettings, SettingsPatch, TicketStatus};

/// Errors that can occur during store operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// No ticket with the given number exists.
    #[error("ticket {0} not found")]
    NotFound(u32),

    /// A ticket with the given number already exists.
    #[error("ticket number {0} already exists")]
    DuplicateNumber(u32),
}

/// Durable CRUD over [`QueueItem`] and [`QueueSettings`] records.
///
/// The store provides no concurrency control of its own; callers that
/// compose multiple operations serialize them at the service layer.
#[async_trait]
pub trait QueueStore: Send + Sync {
    /// Look up a ticket by number.
    async fn get(&self, number: u32) -> Option<QueueItem>;

    /// All tickets with the given status, ascending by number.
    async fn list_by_status(&self, status: TicketStatus) -> Vec<QueueItem>;

    /// All tickets, ascending by number.
    async fn list_all(&self) -> Vec<QueueItem>;

    /// Create a ticket with the given number and status, stamping the
    /// issue time.
    async fn insert(&self, number: u32, status: TicketStatus) -> Result<QueueItem, StoreError>;

    /// Update a ticket's status.
    async fn set_status(&self, number: u32, status: TicketStatus)
        -> Result<QueueItem, StoreError>;

    /// Remove a ticket.
    async fn delete(&self, number: u32) -> Result<(), StoreError>;

    /// Read the settings singleton, creating it with defaults on first
    /// access.
    async fn read_settings(&self) -> QueueSettings;

    /// Apply a partial update to the settings singleton.
    async fn write_settings(&self, patch: SettingsPatch);

    /// Delete every ticket. Settings are untouched.
    async fn clear_all(&self);
}
