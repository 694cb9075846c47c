//! Broadcast channel: observer registry and best-effort fan-out of the
//! queue status projection.

mod publisher;
mod registry;

pub use publisher::{BroadcastStats, BroadcastStatsSnapshot, QueueBroadcaster};
pub use registry::{ObserverHandle, ObserverRegistry};
