//! WebSocket push interface for queue observers.

mod handler;
mod message;

pub use handler::ws_handler;
pub use message::{OutboundMessage, ServerMessage};
