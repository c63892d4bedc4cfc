//! In-memory key-value store

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;

use super::KeyValueStore;
use crate::error::StorageError;

/// Process-lifetime key-value store
#[derive(Clone, Default)]
pub struct MemoryKv {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryKv {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryKv {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.read().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.write().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_clones_share_entries() {
        let kv = MemoryKv::new();
        let other = kv.clone();

        kv.set("lastViewedQuote", "{}").await.unwrap();

        assert_eq!(other.get("lastViewedQuote").await.unwrap().as_deref(), Some("{}"));
        assert_eq!(other.get("quotes").await.unwrap(), None);
    }
}
