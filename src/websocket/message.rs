use std::sync::Arc;

use serde::Serialize;

use crate::queue::QueueStatus;

/// Messages pushed from server to observers.
///
/// The envelope on the wire is `{ "kind": ..., "payload": ... }`.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServerMessage {
    QueueUpdate(QueueStatus),
}

impl ServerMessage {
    pub fn queue_update(status: QueueStatus) -> Self {
        Self::QueueUpdate(status)
    }
}

/// An outbound frame queued for a single observer connection.
///
/// Fan-out serializes the envelope once and ships the same bytes to every
/// observer; per-connection messages carry the typed form.
#[derive(Debug, Clone)]
pub enum OutboundMessage {
    Message(ServerMessage),
    Raw(Arc<str>),
}

impl OutboundMessage {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        match self {
            Self::Message(msg) => serde_json::to_string(msg),
            Self::Raw(raw) => Ok(raw.as_ref().to_owned()),
        }
    }
}
