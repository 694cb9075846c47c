//! Queue domain: ticket model, the queue service state machine and the
//! status projection.

mod models;
mod service;
mod status;

pub use models::{QueueItem, QueueSettings, SettingsPatch, TicketStatus};
pub use service::QueueService;
pub use status::{clock_time, QueueItemView, QueueStatus};
