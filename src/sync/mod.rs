//! Sync module for remote reconciliation
//!
//! Provides:
//! - Local-wins merge of a remote collection into the local one
//! - Fetch/post access to the remote collection endpoint
//! - A coordinator that runs fetch -> merge -> commit cycles
//! - A scheduler that triggers cycles periodically
//!
//! # Sync Cycle
//!
//! 1. Coordinator fetches the remote collection (no lock held)
//! 2. Coordinator opens a store transaction, which waits for in-flight inserts
//! 3. [`Reconciler`] merges the remote entries into the current collection
//! 4. The merged collection is persisted, then installed in memory
//! 5. Observers are notified
//!
//! # Conflict Resolution
//!
//! - Identity is the quote text
//! - Local always wins; remote category changes are discarded
//! - Only genuinely new remote quotes are appended

mod conflict;
mod coordinator;
mod notify;
mod remote;
mod scheduler;
#[cfg(test)]
pub(crate) mod testing;
mod types;

pub use conflict::Reconciler;
pub use coordinator::SyncCoordinator;
pub use notify::{NotificationLog, NotificationSink};
pub use remote::{decode_remote_quotes, HttpRemote, RemoteSource};
pub use scheduler::{ChannelTicker, IntervalTicker, SchedulerHandle, SyncScheduler, Ticker};
pub use types::{
    Conflict, MergeResult, Notification, NotificationKind, SyncReport, SyncState, SyncStatus,
};
