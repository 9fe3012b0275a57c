//! Action payloads: what the user asked for, typed per action kind.
//!
//! One variant = one kind. The queue never inspects a payload beyond its
//! kind; the sync endpoint interprets the contents.

use serde::{Deserialize, Serialize};

/// What a deferred action carries, keyed by action kind.
///
/// Tagged so each persisted record is self-describing when read back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ActionPayload {
    /// Run the plot's valves for a fixed duration.
    Watering { duration_minutes: u32 },

    /// A user-recorded note, optionally with a moisture reading taken by hand.
    Observation {
        note: String,
        soil_moisture: Option<f32>,
    },

    /// Reference to a locally captured photo awaiting upload.
    ///
    /// The image bytes stay on disk; only the reference travels through
    /// the queue.
    Photo {
        file_name: String,
        caption: Option<String>,
    },

    /// Partial settings patch for the plot. `None` leaves a setting unchanged.
    Settings {
        auto_watering: Option<bool>,
        moisture_threshold: Option<f32>,
    },
}

impl ActionPayload {
    /// Stable name of the action kind, for logs and downstream routing.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Watering { .. } => "watering",
            Self::Observation { .. } => "observation",
            Self::Photo { .. } => "photo",
            Self::Settings { .. } => "settings",
        }
    }
}
