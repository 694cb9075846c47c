use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a ticket.
///
/// Tickets are created `Waiting`, move to `Serving` when called and to
/// `Completed` when staff finish with them. A ticket may be deleted from
/// any state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketStatus {
    Waiting,
    Serving,
    Completed,
}

impl std::fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TicketStatus::Waiting => write!(f, "waiting"),
            TicketStatus::Serving => write!(f, "serving"),
            TicketStatus::Completed => write!(f, "completed"),
        }
    }
}

/// A single queue ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueItem {
    /// Sequential ticket number, unique within an epoch.
    pub number: u32,
    pub status: TicketStatus,
    /// Set once at issue time, never updated.
    pub issued_at: DateTime<Utc>,
}

/// Queue-wide singleton state and display preferences.
///
/// `last_called_at` is process-local; it is not required to survive a
/// restart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueSettings {
    /// Ticket number currently being served, 0 meaning "none".
    pub current_number: u32,
    /// Highest ticket number issued in the current epoch.
    pub last_number: u32,
    pub last_called_at: Option<DateTime<Utc>>,
    /// When the current epoch started (stamped by reset).
    pub epoch_started_at: DateTime<Utc>,
    pub sound_enabled: bool,
    pub visual_alerts_enabled: bool,
}

impl Default for QueueSettings {
    fn default() -> Self {
        Self {
            current_number: 0,
            last_number: 0,
            last_called_at: None,
            epoch_started_at: Utc::now(),
            sound_enabled: true,
            visual_alerts_enabled: true,
        }
    }
}

/// Partial update for [`QueueSettings`].
///
/// `last_called_at` is doubly optional: `None` leaves the field untouched,
/// `Some(None)` clears it.
#[derive(Debug, Clone, Default)]
pub struct SettingsPatch {
    pub current_number: Option<u32>,
    pub last_number: Option<u32>,
    pub last_called_at: Option<Option<DateTime<Utc>>>,
    pub epoch_started_at: Option<DateTime<Utc>>,
    pub sound_enabled: Option<bool>,
    pub visual_alerts_enabled: Option<bool>,
}

impl SettingsPatch {
    /// Apply this patch to a settings record in place.
    pub fn apply(&self, settings: &mut QueueSettings) {
        if let Some(n) = self.current_number {
            settings.current_number = n;
        }
        if let Some(n) = self.last_number {
            settings.last_number = n;
        }
        if let Some(ts) = self.last_called_at {
            settings.last_called_at = ts;
        }
        if let Some(ts) = self.epoch_started_at {
            settings.epoch_started_at = ts;
        }
        if let Some(v) = self.sound_enabled {
            settings.sound_enabled = v;
        }
        if let Some(v) = self.visual_alerts_enabled {
            settings.visual_alerts_enabled = v;
        }
    }
}
