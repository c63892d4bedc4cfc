//! Key-value persistence
//!
//! The quote collection and the user's preferences are stored as serialized
//! strings under fixed keys. Two backends are provided:
//!
//! - [`SqliteKv`]: durable, backed by a single SQLite table
//! - [`MemoryKv`]: process-lifetime, used for session-scoped values and tests

mod memory;
mod sqlite;

pub use memory::MemoryKv;
pub use sqlite::{create_pool, SqliteKv};

use async_trait::async_trait;

use crate::error::StorageError;

/// Durable key for the serialized quote collection
pub const QUOTES_KEY: &str = "quotes";
/// Durable key for the last selected category filter
pub const SELECTED_CATEGORY_KEY: &str = "selectedCategory";
/// Session key for the last quote shown to the user
pub const LAST_VIEWED_QUOTE_KEY: &str = "lastViewedQuote";

/// String key-value persistence capability
///
/// `set` replaces the whole value atomically: a subsequent `get` observes
/// either the old or the new value, never a partial write.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}
