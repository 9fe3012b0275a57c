//! Deferred actions and their delivery lifecycle.
//!
//! An action is created `Pending`. Every later state change is driven by
//! the queue: a successful delivery seals it as `Synced`, a rejection or an
//! exhausted retry budget parks it as `Failed`. `Synced` is never left.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ActionPayload;

/// One deferred user intent, awaiting delivery to the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfflineAction {
    pub id: Uuid,

    /// The garden plot this action targets. Opaque to the queue —
    /// never validated against a plot registry.
    pub plot_id: String,

    pub payload: ActionPayload,

    /// When the action was created. Used for ordering and retention,
    /// never for conflict resolution.
    pub created_at: Timestamp,

    pub state: ActionState,
}

impl OfflineAction {
    /// A freshly created action: new id, no delivery attempts yet.
    pub fn new(
        plot_id: impl Into<String>,
        payload: ActionPayload,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            plot_id: plot_id.into(),
            payload,
            created_at,
            state: ActionState::pending(),
        }
    }

    /// Stable name of the action kind, for logs and reports.
    pub fn kind(&self) -> &'static str {
        self.payload.kind()
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, ActionState::Pending { .. })
    }

    pub fn is_synced(&self) -> bool {
        matches!(self.state, ActionState::Synced { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.state, ActionState::Failed { .. })
    }

    /// Whether the action is due for a delivery attempt at `now`.
    ///
    /// False for anything not pending, and for pending actions still
    /// backing off from an earlier failure.
    pub fn ready_at(&self, now: Timestamp) -> bool {
        match &self.state {
            ActionState::Pending { not_before, .. } => not_before.is_none_or(|t| t <= now),
            ActionState::Synced { .. } | ActionState::Failed { .. } => false,
        }
    }
}

/// Where an action stands in its delivery lifecycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ActionState {
    /// Awaiting delivery. `not_before` is the earliest next attempt,
    /// set when a failed attempt schedules a backoff.
    Pending {
        attempts: u32,
        last_error: Option<String>,
        not_before: Option<Timestamp>,
    },

    /// Delivered. Terminal — nothing moves an action out of this state.
    Synced { synced_at: Timestamp },

    /// Given up: rejected by the endpoint, or out of delivery attempts.
    /// A manual retry returns the action to `Pending`.
    Failed {
        attempts: u32,
        reason: String,
        failed_at: Timestamp,
    },
}

impl ActionState {
    /// The initial state: no attempts, no backoff.
    pub fn pending() -> Self {
        Self::Pending {
            attempts: 0,
            last_error: None,
            not_before: None,
        }
    }
}
