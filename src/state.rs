//! Application state management

use std::sync::Arc;

use crate::config::Config;
use crate::quotes::{Preferences, QuoteStore};
use crate::storage::{KeyValueStore, MemoryKv};
use crate::sync::{NotificationLog, RemoteSource, SyncCoordinator};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,
    store: QuoteStore,
    preferences: Preferences,
    coordinator: Arc<SyncCoordinator>,
    notifications: NotificationLog,
}

impl AppState {
    /// Wire the store, preferences and coordinator together
    ///
    /// `durable` backs the collection and the selected category; session
    /// values live in memory for the lifetime of the process.
    pub async fn new(
        config: Config,
        durable: Arc<dyn KeyValueStore>,
        remote: Arc<dyn RemoteSource>,
    ) -> Self {
        let store = QuoteStore::open(durable.clone()).await;
        let preferences = Preferences::new(durable, Arc::new(MemoryKv::new()));
        let notifications = NotificationLog::default();
        let coordinator = Arc::new(SyncCoordinator::new(
            store.clone(),
            remote,
            Arc::new(notifications.clone()),
        ));

        Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                preferences,
                coordinator,
                notifications,
            }),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Get the quote store
    pub fn store(&self) -> &QuoteStore {
        &self.inner.store
    }

    pub fn preferences(&self) -> &Preferences {
        &self.inner.preferences
    }

    /// Get the sync coordinator
    pub fn coordinator(&self) -> &Arc<SyncCoordinator> {
        &self.inner.coordinator
    }

    pub fn notifications(&self) -> &NotificationLog {
        &self.inner.notifications
    }
}
