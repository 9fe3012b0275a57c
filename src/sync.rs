//! The remote sync boundary: how actions leave the device.
//!
//! The queue hands actions to a [`SyncEndpoint`] one at a time, in
//! insertion order. The endpoint is the host's problem — a REST call, an
//! RPC, a test double — but its failures must land in the taxonomy below,
//! because the queue treats transient and permanent failures differently.

use std::time::Duration;

use crate::model::OfflineAction;

/// Delivers one action to the remote side.
pub trait SyncEndpoint {
    /// Attempt delivery of a single action.
    ///
    /// Implementations must give up once `timeout` has elapsed and report
    /// [`DeliveryError::Timeout`]; the queue treats it as retryable. The
    /// payload's interpretation is entirely the endpoint's concern — the
    /// queue only routes by outcome.
    fn deliver(&self, action: &OfflineAction, timeout: Duration) -> Result<(), DeliveryError>;
}

/// Why a delivery attempt did not succeed.
#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    /// The attempt exceeded its deadline. Retryable.
    #[error("delivery timed out")]
    Timeout,

    /// The endpoint was unreachable or the transfer broke off. Retryable.
    #[error("transport error: {0}")]
    Transport(String),

    /// The endpoint understood the action and refused it (e.g. a malformed
    /// payload). Permanent — retrying would fail the same way.
    #[error("endpoint rejected action: {0}")]
    Rejected(String),
}

impl DeliveryError {
    /// Whether retrying can't help.
    pub fn is_permanent(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }
}
