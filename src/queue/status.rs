//! Read-only queue status projection.
//!
//! Derived on demand from the store and pushed to observers after every
//! mutation. Field names follow the wire format consumed by display and
//! admin clients (camelCase).

use chrono::{DateTime, Local, Utc};
use serde::Serialize;

use super::{QueueItem, QueueSettings, TicketStatus};

/// A ticket as rendered in the projection, with a display-ready issue
/// time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueItemView {
    pub number: u32,
    pub status: TicketStatus,
    pub issued_at: String,
}

impl From<&QueueItem> for QueueItemView {
    fn from(item: &QueueItem) -> Self {
        Self {
            number: item.number,
            status: item.status,
            issued_at: clock_time(item.issued_at),
        }
    }
}

/// Self-contained snapshot of the queue, sent to API callers and
/// broadcast observers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueStatus {
    pub current_number: u32,
    pub next_numbers: Vec<u32>,
    pub waiting_count: usize,
    pub queue_items: Vec<QueueItemView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_called_at: Option<String>,
}

impl QueueStatus {
    /// Build a projection from the settings singleton, the waiting
    /// tickets and the full ticket list (both ascending by number).
    pub fn project(
        settings: &QueueSettings,
        waiting: &[QueueItem],
        all: &[QueueItem],
    ) -> Self {
        let next_numbers: Vec<u32> = waiting.iter().map(|item| item.number).collect();

        Self {
            current_number: settings.current_number,
            waiting_count: next_numbers.len(),
            next_numbers,
            queue_items: all.iter().map(QueueItemView::from).collect(),
            last_called_at: settings.last_called_at.map(clock_time),
        }
    }
}

/// Format a timestamp as a local wall-clock time, e.g. `3:05 PM`.
pub fn clock_time(ts: DateTime<Utc>) -> String {
    format_local(ts.with_timezone(&Local))
}

fn format_local(ts: DateTime<Local>) -> String {
    ts.format("%-I:%M %p").to_string()
}
