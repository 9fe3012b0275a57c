//! Offline action queue for a smart-irrigation companion app.
//!
//! Users keep gardening when the connection drops: watering commands,
//! plot observations, photos, and settings changes are queued locally,
//! persisted, and replayed against the backend once connectivity returns.
//!
//! The host application owns the UI, the transport, and the runtime's
//! network signal. It implements [`SyncEndpoint`] over its real transport,
//! picks an [`ActionStore`] (a JSON file by default), and forwards each
//! connectivity transition into [`ActionQueue::set_connectivity`]. The
//! queue owns everything in between: durable buffering, serial in-order
//! delivery, bounded retries with exponential backoff, and a dead-letter
//! state the UI can surface with a reason and a retry button.

pub mod config;
pub mod connectivity;
pub mod model;
pub mod queue;
pub mod storage;
pub mod sync;

pub use config::{Config, ConfigError, RetentionPolicy, SyncPolicy};
pub use connectivity::ConnectivityStatus;
pub use model::{ActionPayload, ActionState, OfflineAction};
pub use queue::{ActionQueue, QueueError, SyncReport};
pub use storage::{ActionStore, FileStore, MemoryStore, StorageError};
pub use sync::{DeliveryError, SyncEndpoint};
