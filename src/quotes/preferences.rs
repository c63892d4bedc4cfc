//! Persisted view preferences
//!
//! The selected category lives in durable storage; the last viewed quote
//! lives in session storage and is gone after a restart.

use std::sync::Arc;

use super::filter::CategoryFilter;
use super::types::Quote;
use crate::error::StorageError;
use crate::storage::{KeyValueStore, LAST_VIEWED_QUOTE_KEY, SELECTED_CATEGORY_KEY};

#[derive(Clone)]
pub struct Preferences {
    durable: Arc<dyn KeyValueStore>,
    session: Arc<dyn KeyValueStore>,
}

impl Preferences {
    pub fn new(durable: Arc<dyn KeyValueStore>, session: Arc<dyn KeyValueStore>) -> Self {
        Self { durable, session }
    }

    /// Last selected category, `All` when never set
    pub async fn selected_category(&self) -> Result<CategoryFilter, StorageError> {
        let value = self.durable.get(SELECTED_CATEGORY_KEY).await?;
        Ok(value.map(CategoryFilter::from).unwrap_or_default())
    }

    pub async fn set_selected_category(&self, filter: &CategoryFilter) -> Result<(), StorageError> {
        self.durable.set(SELECTED_CATEGORY_KEY, filter.as_str()).await
    }

    /// Last quote shown in this session
    ///
    /// An unparsable value is treated as absent.
    pub async fn last_viewed(&self) -> Result<Option<Quote>, StorageError> {
        let raw = self.session.get(LAST_VIEWED_QUOTE_KEY).await?;
        Ok(raw.and_then(|s| match serde_json::from_str(&s) {
            Ok(quote) => Some(quote),
            Err(e) => {
                tracing::warn!("Ignoring unreadable last viewed quote: {}", e);
                None
            }
        }))
    }

    pub async fn set_last_viewed(&self, quote: &Quote) -> Result<(), StorageError> {
        let json = serde_json::to_string(quote)?;
        self.session.set(LAST_VIEWED_QUOTE_KEY, &json).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryKv;

    fn preferences() -> (Preferences, MemoryKv) {
        let session = MemoryKv::new();
        let prefs = Preferences::new(Arc::new(MemoryKv::new()), Arc::new(session.clone()));
        (prefs, session)
    }

    #[tokio::test]
    async fn test_selected_category_defaults_to_all() {
        let (prefs, _) = preferences();
        assert_eq!(prefs.selected_category().await.unwrap(), CategoryFilter::All);
    }

    #[tokio::test]
    async fn test_selected_category_round_trip() {
        let (prefs, _) = preferences();
        let filter = CategoryFilter::Category("Life".to_string());

        prefs.set_selected_category(&filter).await.unwrap();

        assert_eq!(prefs.selected_category().await.unwrap(), filter);
    }

    #[tokio::test]
    async fn test_last_viewed_round_trip() {
        let (prefs, _) = preferences();
        let quote = Quote::new("a", "X").unwrap();

        assert!(prefs.last_viewed().await.unwrap().is_none());
        prefs.set_last_viewed(&quote).await.unwrap();

        assert_eq!(prefs.last_viewed().await.unwrap(), Some(quote));
    }

    #[tokio::test]
    async fn test_unreadable_last_viewed_is_absent() {
        let (prefs, session) = preferences();
        session.set(LAST_VIEWED_QUOTE_KEY, "garbage").await.unwrap();

        assert!(prefs.last_viewed().await.unwrap().is_none());
    }
}
