//! Sync data types
//!
//! Defines types for remote reconciliation including:
//! - Merge results and conflict reports
//! - Coordinator state and status
//! - Observer notifications

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::quotes::{Collection, Quote};

/// A remote entry discarded because its text already exists locally with a
/// different category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conflict {
    pub text: String,
    /// Category that was kept
    #[serde(rename = "localCategory")]
    pub local_category: String,
    /// Category that was discarded
    #[serde(rename = "remoteCategory")]
    pub remote_category: String,
}

/// Output of [`Reconciler::merge`](super::Reconciler::merge)
#[derive(Debug, Clone)]
pub struct MergeResult {
    pub merged: Collection,
    pub added_from_remote: Vec<Quote>,
    pub conflicts: Vec<Conflict>,
    /// Remote entries identical to a retained entry
    pub unchanged: usize,
}

impl MergeResult {
    pub fn has_conflicts(&self) -> bool {
        !self.conflicts.is_empty()
    }
}

/// Sync coordinator state
///
/// A cycle walks `Idle -> Fetching -> Reconciling -> Committing -> Idle`.
/// `Failed` is entered when a cycle aborts and is always followed by `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncState {
    Idle,
    Fetching,
    Reconciling,
    Committing,
    Failed,
}

/// Result of one successful sync cycle
#[derive(Debug, Clone, Serialize)]
pub struct SyncReport {
    #[serde(rename = "cycleId")]
    pub cycle_id: Uuid,
    /// Number of usable entries in the remote payload
    pub fetched: usize,
    pub added: Vec<Quote>,
    pub conflicts: Vec<Conflict>,
    #[serde(rename = "finishedAt")]
    pub finished_at: DateTime<Utc>,
}

/// Sync status exposed to observers
#[derive(Debug, Clone, Serialize)]
pub struct SyncStatus {
    pub state: SyncState,
    /// Last successful sync timestamp
    #[serde(rename = "lastSync")]
    pub last_sync: Option<DateTime<Utc>>,
    /// Last error if the most recent cycle failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Completed cycles, successful or not
    pub cycles: u64,
    /// Entries added from the remote across all cycles
    #[serde(rename = "addedTotal")]
    pub added_total: usize,
}

impl Default for SyncStatus {
    fn default() -> Self {
        Self {
            state: SyncState::Idle,
            last_sync: None,
            error: None,
            cycles: 0,
            added_total: 0,
        }
    }
}

/// Kinds of observer notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NotificationKind {
    Synced,
    ConflictResolved,
}

/// A message emitted to observers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}
