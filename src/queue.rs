//! The offline action queue: buffer, persist, replay.
//!
//! Actions are appended while connectivity is uncertain and replayed
//! against the sync endpoint when it returns. The queue exclusively owns
//! its action list; the injected store is a serialized mirror, kept equal
//! to memory after every completed mutation.
//!
//! Delivery is serial and in insertion order — one action at a time, which
//! keeps per-plot ordering without further machinery. A pass runs only
//! while the mirrored connectivity says online, and at most one pass runs
//! at a time.

use jiff::Timestamp;
use uuid::Uuid;

use crate::config::Config;
use crate::connectivity::ConnectivityStatus;
use crate::model::{ActionPayload, ActionState, OfflineAction};
use crate::storage::{ActionStore, StorageError};
use crate::sync::{DeliveryError, SyncEndpoint};

/// Errors surfaced by queue operations.
#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("action not found: {0}")]
    ActionNotFound(Uuid),

    #[error("action already synced: {0}")]
    AlreadySynced(Uuid),
}

/// What a sync pass did, by count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Actions delivered and sealed as synced.
    pub delivered: usize,

    /// Actions that failed transiently and were scheduled for another try.
    pub retrying: usize,

    /// Actions parked as failed: rejected, or out of attempts.
    pub abandoned: usize,

    /// Pending actions skipped because their backoff had not elapsed.
    pub deferred: usize,
}

impl SyncReport {
    /// Deliveries actually attempted in this pass.
    pub fn attempted(&self) -> usize {
        self.delivered + self.retrying + self.abandoned
    }
}

/// Buffers deferred user actions and replays them when connectivity allows.
///
/// The store and endpoint are injected; the queue never reaches for a
/// process-wide storage key or a concrete transport.
#[derive(Debug)]
pub struct ActionQueue<S, E> {
    store: S,
    endpoint: E,
    config: Config,
    connectivity: ConnectivityStatus,
    actions: Vec<OfflineAction>,
    in_flight: bool,
}

impl<S: ActionStore, E: SyncEndpoint> ActionQueue<S, E> {
    /// Creates a queue over the given store and endpoint, loading whatever
    /// the store already holds.
    ///
    /// A store whose contents cannot be decoded is an error here, not a
    /// silently emptied queue.
    pub fn new(
        store: S,
        endpoint: E,
        config: Config,
        connectivity: ConnectivityStatus,
    ) -> Result<Self, QueueError> {
        let actions = store.load()?;
        let pending = actions.iter().filter(|a| a.is_pending()).count();
        log::debug!("loaded {} stored actions ({pending} pending)", actions.len());

        Ok(Self {
            store,
            endpoint,
            config,
            connectivity,
            actions,
            in_flight: false,
        })
    }

    /// The last connectivity status reported by the host.
    pub fn is_online(&self) -> bool {
        self.connectivity.is_online()
    }

    /// Full action history, synced and unsynced, in insertion order.
    pub fn actions(&self) -> &[OfflineAction] {
        &self.actions
    }

    /// Number of actions still awaiting delivery.
    pub fn pending_count(&self) -> usize {
        self.actions.iter().filter(|a| a.is_pending()).count()
    }

    /// Actions parked as failed, with their reasons — the error channel
    /// the host surfaces to the user.
    pub fn failed(&self) -> impl Iterator<Item = &OfflineAction> {
        self.actions.iter().filter(|a| a.is_failed())
    }

    /// Queues an action for the given plot and persists it.
    ///
    /// Returns the new action's id once it is durably recorded. If the
    /// connectivity mirror says online, a sync pass runs before returning;
    /// its per-action outcomes land in action state, never in this result.
    pub fn submit(
        &mut self,
        plot_id: impl Into<String>,
        payload: ActionPayload,
    ) -> Result<Uuid, QueueError> {
        self.submit_at(plot_id.into(), payload, Timestamp::now())
    }

    fn submit_at(
        &mut self,
        plot_id: String,
        payload: ActionPayload,
        now: Timestamp,
    ) -> Result<Uuid, QueueError> {
        let action = OfflineAction::new(plot_id, payload, now);
        let id = action.id;
        log::info!(
            "queued {} action {id} for plot {}",
            action.kind(),
            action.plot_id
        );
        self.actions.push(action);
        self.store.save(&self.actions)?;

        if self.connectivity.is_online() {
            // Opportunistic pass. A persist failure inside it is logged,
            // not returned — the submitted action is already durable, and
            // the next pass re-persists.
            if let Err(e) = self.sync_at(now) {
                log::error!("sync pass after submit failed: {e}");
            }
        }

        Ok(id)
    }

    /// Delivers ready pending actions, serially, in insertion order.
    ///
    /// Not-online and re-entrant invocations return an empty report
    /// without touching the endpoint. The full list is persisted in one
    /// write after the pass, retention included.
    pub fn sync_pending(&mut self) -> Result<SyncReport, QueueError> {
        self.sync_at(Timestamp::now())
    }

    fn sync_at(&mut self, now: Timestamp) -> Result<SyncReport, QueueError> {
        if !self.connectivity.is_online() {
            log::debug!("sync requested while not online; nothing sent");
            return Ok(SyncReport::default());
        }
        if self.in_flight {
            log::debug!("sync pass already in flight; skipping");
            return Ok(SyncReport::default());
        }

        self.in_flight = true;
        let result = self.run_pass(now);
        self.in_flight = false;
        result
    }

    fn run_pass(&mut self, now: Timestamp) -> Result<SyncReport, QueueError> {
        let mut report = SyncReport::default();
        let timeout = self.config.sync.delivery_timeout();
        let max_attempts = self.config.sync.max_attempts;

        for action in &mut self.actions {
            let ActionState::Pending {
                attempts,
                not_before,
                ..
            } = &action.state
            else {
                continue;
            };
            if not_before.is_some_and(|t| t > now) {
                report.deferred += 1;
                continue;
            }
            let attempts = attempts + 1;

            match self.endpoint.deliver(action, timeout) {
                Ok(()) => {
                    log::info!(
                        "delivered {} action {} for plot {}",
                        action.kind(),
                        action.id,
                        action.plot_id
                    );
                    action.state = ActionState::Synced { synced_at: now };
                    report.delivered += 1;
                }
                Err(DeliveryError::Rejected(reason)) => {
                    log::error!("{} action {} rejected: {reason}", action.kind(), action.id);
                    action.state = ActionState::Failed {
                        attempts,
                        reason,
                        failed_at: now,
                    };
                    report.abandoned += 1;
                }
                Err(e) => {
                    if attempts >= max_attempts {
                        log::error!(
                            "{} action {} abandoned after {attempts} attempts: {e}",
                            action.kind(),
                            action.id
                        );
                        action.state = ActionState::Failed {
                            attempts,
                            reason: e.to_string(),
                            failed_at: now,
                        };
                        report.abandoned += 1;
                    } else {
                        let backoff = self.config.sync.backoff_after(attempts);
                        log::warn!(
                            "{} action {} attempt {attempts}/{max_attempts} failed: {e}; \
                             next try in {}s",
                            action.kind(),
                            action.id,
                            backoff.as_secs()
                        );
                        action.state = ActionState::Pending {
                            attempts,
                            last_error: Some(e.to_string()),
                            not_before: Some(
                                now.saturating_add(backoff)
                                    .expect("saturating_add with a SignedDuration is infallible"),
                            ),
                        };
                        report.retrying += 1;
                    }
                }
            }
        }

        let pruned = self.prune_at(now);
        if report.attempted() > 0 || pruned > 0 {
            self.store.save(&self.actions)?;
        }
        if report.attempted() > 0 {
            log::info!(
                "sync pass: {} delivered, {} retrying, {} abandoned, {} deferred",
                report.delivered,
                report.retrying,
                report.abandoned,
                report.deferred
            );
        }

        Ok(report)
    }

    /// Records a connectivity transition reported by the host.
    ///
    /// Duplicate same-status events are no-ops. A transition to online
    /// runs a sync pass and returns its report.
    pub fn set_connectivity(
        &mut self,
        status: ConnectivityStatus,
    ) -> Result<Option<SyncReport>, QueueError> {
        if status == self.connectivity {
            return Ok(None);
        }
        self.connectivity = status;

        if status.is_online() {
            log::info!(
                "connectivity restored; syncing {} pending actions",
                self.pending_count()
            );
            return self.sync_at(Timestamp::now()).map(Some);
        }

        log::info!("connectivity lost; buffering actions locally");
        Ok(None)
    }

    /// Returns a failed action to pending, resetting its attempt budget.
    ///
    /// The manual affordance behind a "retry" button. A pending action is
    /// an idempotent no-op; a synced action cannot be retried — delivered
    /// is delivered.
    pub fn retry(&mut self, id: Uuid) -> Result<(), QueueError> {
        let action = self
            .actions
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(QueueError::ActionNotFound(id))?;

        match &action.state {
            ActionState::Synced { .. } => return Err(QueueError::AlreadySynced(id)),
            ActionState::Pending { .. } => return Ok(()),
            ActionState::Failed { .. } => {
                log::info!("requeueing failed {} action {id}", action.kind());
                action.state = ActionState::pending();
            }
        }
        self.store.save(&self.actions)?;

        if self.connectivity.is_online() {
            // Same contract as submit: the requeue is durable, the pass
            // is opportunistic.
            if let Err(e) = self.sync_at(Timestamp::now()) {
                log::error!("sync pass after retry failed: {e}");
            }
        }

        Ok(())
    }

    /// Drops synced actions that have aged out, and enforces the store cap
    /// by dropping the oldest synced entries. Pending and failed actions
    /// are never pruned.
    fn prune_at(&mut self, now: Timestamp) -> usize {
        let before = self.actions.len();

        let cutoff = now
            .saturating_sub(self.config.retention.keep_synced())
            .expect("saturating_sub with a SignedDuration is infallible");
        self.actions.retain(|a| match a.state {
            ActionState::Synced { synced_at } => synced_at > cutoff,
            ActionState::Pending { .. } | ActionState::Failed { .. } => true,
        });

        let max = self.config.retention.max_entries;
        while self.actions.len() > max {
            let Some(oldest) = self.actions.iter().position(OfflineAction::is_synced) else {
                break;
            };
            self.actions.remove(oldest);
        }

        let pruned = before - self.actions.len();
        if pruned > 0 {
            log::debug!("pruned {pruned} synced actions");
        }
        pruned
    }
}
