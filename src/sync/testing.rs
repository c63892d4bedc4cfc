//! In-process remote used by unit tests

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::Notify;

use super::remote::RemoteSource;
use crate::error::TransportError;
use crate::quotes::Quote;

pub struct FakeRemote {
    quotes: Mutex<Vec<Quote>>,
    posted: Mutex<Vec<Quote>>,
    fail_fetch: AtomicBool,
    fail_post: AtomicBool,
    fetches: AtomicUsize,
    /// When set, each fetch waits for one permit before answering
    gate: Option<Arc<Notify>>,
}

impl FakeRemote {
    pub fn with_quotes(quotes: Vec<Quote>) -> Self {
        Self {
            quotes: Mutex::new(quotes),
            posted: Mutex::new(Vec::new()),
            fail_fetch: AtomicBool::new(false),
            fail_post: AtomicBool::new(false),
            fetches: AtomicUsize::new(0),
            gate: None,
        }
    }

    pub fn gated(quotes: Vec<Quote>) -> Self {
        Self {
            gate: Some(Arc::new(Notify::new())),
            ..Self::with_quotes(quotes)
        }
    }

    pub fn gate(&self) -> Arc<Notify> {
        self.gate.clone().unwrap_or_else(|| Arc::new(Notify::new()))
    }

    pub fn set_fail_fetch(&self, fail: bool) {
        self.fail_fetch.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_post(&self, fail: bool) {
        self.fail_post.store(fail, Ordering::SeqCst);
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn posted(&self) -> Vec<Quote> {
        self.posted.lock().clone()
    }

    fn unreachable() -> TransportError {
        TransportError::Network {
            url: "fake://remote".to_string(),
            message: "connection refused".to_string(),
        }
    }
}

#[async_trait]
impl RemoteSource for FakeRemote {
    async fn fetch_quotes(&self) -> Result<Vec<Quote>, TransportError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(Self::unreachable());
        }
        Ok(self.quotes.lock().clone())
    }

    async fn post_quote(&self, quote: &Quote) -> Result<(), TransportError> {
        if self.fail_post.load(Ordering::SeqCst) {
            return Err(Self::unreachable());
        }
        self.posted.lock().push(quote.clone());
        Ok(())
    }
}
