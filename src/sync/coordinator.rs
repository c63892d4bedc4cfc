//! Sync coordinator
//!
//! Runs fetch -> merge -> commit cycles against the remote collection and
//! forwards newly added quotes to it.

use std::sync::Arc;

use chrono::Utc;
use parking_lot::Mutex;
use tokio::sync::watch;
use uuid::Uuid;

use super::conflict::Reconciler;
use super::notify::NotificationSink;
use super::remote::RemoteSource;
use super::types::{MergeResult, NotificationKind, SyncReport, SyncState, SyncStatus};
use crate::error::{SyncError, TransportError};
use crate::quotes::{Quote, QuoteStore};

pub struct SyncCoordinator {
    store: QuoteStore,
    remote: Arc<dyn RemoteSource>,
    notifier: Arc<dyn NotificationSink>,
    state: watch::Sender<SyncState>,
    status: Mutex<SyncStatus>,
}

impl SyncCoordinator {
    pub fn new(
        store: QuoteStore,
        remote: Arc<dyn RemoteSource>,
        notifier: Arc<dyn NotificationSink>,
    ) -> Self {
        let (state, _) = watch::channel(SyncState::Idle);
        Self {
            store,
            remote,
            notifier,
            state,
            status: Mutex::new(SyncStatus::default()),
        }
    }

    /// Watch state transitions
    pub fn subscribe(&self) -> watch::Receiver<SyncState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> SyncState {
        *self.state.borrow()
    }

    pub fn status(&self) -> SyncStatus {
        let mut status = self.status.lock().clone();
        status.state = self.state();
        status
    }

    /// Run one fetch -> merge -> commit cycle
    ///
    /// On failure the store is left untouched and the coordinator returns
    /// to `Idle`; the next trigger starts a fresh cycle.
    pub async fn sync_now(&self) -> Result<SyncReport, SyncError> {
        let cycle_id = Uuid::new_v4();
        tracing::debug!(%cycle_id, "Sync cycle started");

        let result = self.run_cycle(cycle_id).await;

        match &result {
            Ok(report) => {
                {
                    let mut status = self.status.lock();
                    status.last_sync = Some(report.finished_at);
                    status.error = None;
                    status.cycles += 1;
                    status.added_total += report.added.len();
                }

                tracing::info!(
                    %cycle_id,
                    "Synced with remote: {} fetched, {} added, {} conflicts",
                    report.fetched,
                    report.added.len(),
                    report.conflicts.len()
                );

                if !report.conflicts.is_empty() {
                    self.notifier.notify(
                        NotificationKind::ConflictResolved,
                        &format!(
                            "Data synced with the server. {} conflict(s) resolved in favor of local quotes.",
                            report.conflicts.len()
                        ),
                    );
                }
                // Fires even when nothing was added
                self.notifier.notify(
                    NotificationKind::Synced,
                    &format!("Quotes synced with server! {} new quote(s).", report.added.len()),
                );
            }
            Err(e) => {
                self.set_state(SyncState::Failed);
                tracing::warn!(%cycle_id, "Sync cycle failed: {}", e);

                {
                    let mut status = self.status.lock();
                    status.error = Some(e.to_string());
                    status.cycles += 1;
                }
                // Let watchers observe `Failed` before the reset to `Idle`
                tokio::task::yield_now().await;
            }
        }

        self.set_state(SyncState::Idle);
        result
    }

    async fn run_cycle(&self, cycle_id: Uuid) -> Result<SyncReport, SyncError> {
        self.set_state(SyncState::Fetching);
        let remote = self.remote.fetch_quotes().await?;

        self.set_state(SyncState::Reconciling);
        // Merge against the collection as it is now, not as it was before
        // the fetch; inserts made during the fetch are part of `current()`.
        let txn = self.store.transaction().await;
        let MergeResult {
            merged,
            added_from_remote,
            conflicts,
            ..
        } = Reconciler::merge(txn.current(), &remote);

        self.set_state(SyncState::Committing);
        if !added_from_remote.is_empty() {
            txn.commit(merged).await?;
        }

        Ok(SyncReport {
            cycle_id,
            fetched: remote.len(),
            added: added_from_remote,
            conflicts,
            finished_at: Utc::now(),
        })
    }

    /// Best-effort transmission of a newly added quote
    ///
    /// Failure is logged and returned; the local insert stays in place.
    pub async fn post_quote(&self, quote: &Quote) -> Result<(), TransportError> {
        match self.remote.post_quote(quote).await {
            Ok(()) => {
                tracing::debug!("Posted quote to remote: {}", quote.text);
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Failed to post quote to remote: {}", e);
                Err(e)
            }
        }
    }

    fn set_state(&self, state: SyncState) {
        self.state.send_replace(state);
    }
}
