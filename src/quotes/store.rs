//! Quote collection store
//!
//! Owns the in-memory collection and keeps the durable snapshot in step with
//! it. Every mutation writes the durable snapshot first and only then swaps
//! the in-memory collection, so a failed write leaves both unchanged.

use std::sync::Arc;

use tokio::sync::{RwLock, RwLockWriteGuard};

use super::types::{Collection, Quote};
use crate::error::{StorageError, StoreError};
use crate::storage::{KeyValueStore, QUOTES_KEY};
use crate::sync::Reconciler;

/// Outcome of a single-quote insert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    /// A quote with the same text already exists; nothing changed
    Duplicate,
}

/// Shared handle to the quote collection
#[derive(Clone)]
pub struct QuoteStore {
    collection: Arc<RwLock<Collection>>,
    kv: Arc<dyn KeyValueStore>,
}

impl QuoteStore {
    /// Open the store, loading the persisted collection
    pub async fn open(kv: Arc<dyn KeyValueStore>) -> Self {
        let collection = load(kv.as_ref()).await;
        tracing::info!("Quote store opened with {} quotes", collection.len());
        Self {
            collection: Arc::new(RwLock::new(collection)),
            kv,
        }
    }

    /// Snapshot of the current collection
    pub async fn current(&self) -> Collection {
        self.collection.read().await.clone()
    }

    /// Replace the whole collection and persist it
    pub async fn save(&self, collection: Collection) -> Result<(), StorageError> {
        let mut guard = self.collection.write().await;
        persist(self.kv.as_ref(), &collection).await?;
        *guard = collection;
        Ok(())
    }

    /// Validate and append a quote unless its text is already present
    pub async fn insert(&self, quote: Quote) -> Result<InsertOutcome, StoreError> {
        quote.validate()?;

        let mut guard = self.collection.write().await;
        if guard.contains_text(&quote.text) {
            tracing::debug!("Rejected duplicate quote: {}", quote.text);
            return Ok(InsertOutcome::Duplicate);
        }

        let mut next = guard.clone();
        next.push(quote);
        persist(self.kv.as_ref(), &next).await?;
        *guard = next;

        Ok(InsertOutcome::Inserted)
    }

    /// Exclusive read-merge-write section
    ///
    /// Inserts and other transactions wait until the returned guard is
    /// committed or dropped, so whatever is committed was computed from the
    /// freshest collection.
    pub async fn transaction(&self) -> StoreTransaction<'_> {
        StoreTransaction {
            guard: self.collection.write().await,
            kv: self.kv.as_ref(),
        }
    }

    /// Pretty-printed JSON array of the collection
    pub async fn export_json(&self) -> Result<String, StorageError> {
        let collection = self.collection.read().await;
        Ok(serde_json::to_string_pretty(&*collection)?)
    }

    /// Fold a JSON array of quotes into the collection, local entries winning
    ///
    /// Returns the quotes that were added.
    pub async fn import_json(&self, json: &str) -> Result<Vec<Quote>, StoreError> {
        let imported: Vec<Quote> = serde_json::from_str(json).map_err(StorageError::from)?;
        let valid: Vec<Quote> = imported.into_iter().filter(|q| q.validate().is_ok()).collect();

        let txn = self.transaction().await;
        let result = Reconciler::merge(txn.current(), &valid);
        if !result.added_from_remote.is_empty() {
            txn.commit(result.merged).await?;
        }

        tracing::info!(
            "Imported {} quotes ({} skipped)",
            result.added_from_remote.len(),
            result.conflicts.len() + result.unchanged
        );
        Ok(result.added_from_remote)
    }
}

/// Write access to the collection held for one read-merge-write sequence
pub struct StoreTransaction<'a> {
    guard: RwLockWriteGuard<'a, Collection>,
    kv: &'a dyn KeyValueStore,
}

impl StoreTransaction<'_> {
    /// Collection as of now, including any insert that landed before the
    /// transaction began
    pub fn current(&self) -> &Collection {
        &self.guard
    }

    /// Persist and install `next`
    pub async fn commit(mut self, next: Collection) -> Result<(), StorageError> {
        persist(self.kv, &next).await?;
        *self.guard = next;
        Ok(())
    }
}

/// Load the persisted collection, falling back to the seed collection
///
/// Never fails: a missing, unreadable or corrupt snapshot yields the seed.
pub async fn load(kv: &dyn KeyValueStore) -> Collection {
    let raw = match kv.get(QUOTES_KEY).await {
        Ok(Some(raw)) => raw,
        Ok(None) => return Collection::seed(),
        Err(e) => {
            tracing::warn!("Failed to read persisted quotes: {}. Using defaults", e);
            return Collection::seed();
        }
    };

    match parse_snapshot(&raw) {
        Ok(collection) => collection,
        Err(e) => {
            tracing::warn!("{}. Using defaults", e);
            Collection::seed()
        }
    }
}

fn parse_snapshot(raw: &str) -> Result<Collection, StorageError> {
    let quotes: Vec<Quote> = serde_json::from_str(raw).map_err(|e| StorageError::Corrupt {
        key: QUOTES_KEY.to_string(),
        message: e.to_string(),
    })?;

    let total = quotes.len();
    let collection = Collection::from_quotes(quotes);
    if collection.len() < total {
        tracing::warn!(
            "Dropped {} invalid or duplicate persisted quotes",
            total - collection.len()
        );
    }
    Ok(collection)
}

async fn persist(kv: &dyn KeyValueStore, collection: &Collection) -> Result<(), StorageError> {
    let json = serde_json::to_string(collection)?;
    kv.set(QUOTES_KEY, &json).await
}
