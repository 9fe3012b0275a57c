//! Connectivity status, mirrored from the host's network signal.
//!
//! The host runtime owns the actual signal (browser online/offline events,
//! a platform reachability API, …) and forwards each transition into the
//! queue. The queue only mirrors: it never probes the network itself, and
//! anything short of an explicit `Online` means no deliveries are attempted.

/// The last connectivity state reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectivityStatus {
    Online,
    Offline,

    /// The signal has not been read yet. Treated as offline for delivery
    /// purposes until the host reports otherwise.
    Unknown,
}

impl ConnectivityStatus {
    /// Maps an initial boolean probe (e.g. `navigator.onLine`) to a status.
    pub fn from_signal(online: bool) -> Self {
        if online { Self::Online } else { Self::Offline }
    }

    pub fn is_online(self) -> bool {
        matches!(self, Self::Online)
    }
}
