//! Periodic sync trigger
//!
//! The scheduler pulls ticks from an injected [`Ticker`] and runs one sync
//! cycle per tick. Production uses [`IntervalTicker`]; tests drive cycles
//! by hand through [`ChannelTicker`].

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use super::coordinator::SyncCoordinator;

/// Source of sync triggers
#[async_trait]
pub trait Ticker: Send {
    /// Wait for the next trigger; `false` means no more triggers will come
    async fn tick(&mut self) -> bool;
}

/// Fixed-period ticker; the first tick fires immediately
pub struct IntervalTicker {
    interval: Interval,
}

impl IntervalTicker {
    pub fn new(period: Duration) -> Self {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self { interval }
    }
}

#[async_trait]
impl Ticker for IntervalTicker {
    async fn tick(&mut self) -> bool {
        self.interval.tick().await;
        true
    }
}

/// Ticker fired by sending `()` on a channel; ends when every sender is gone
pub struct ChannelTicker {
    rx: mpsc::Receiver<()>,
}

impl ChannelTicker {
    pub fn channel(buffer: usize) -> (mpsc::Sender<()>, Self) {
        let (tx, rx) = mpsc::channel(buffer.max(1));
        (tx, Self { rx })
    }
}

#[async_trait]
impl Ticker for ChannelTicker {
    async fn tick(&mut self) -> bool {
        self.rx.recv().await.is_some()
    }
}

pub struct SyncScheduler;

impl SyncScheduler {
    /// Start running a sync cycle on every tick
    pub fn spawn<T>(coordinator: Arc<SyncCoordinator>, mut ticker: T) -> SchedulerHandle
    where
        T: Ticker + 'static,
    {
        let token = CancellationToken::new();
        let cancelled = token.clone();

        let join = tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = cancelled.cancelled() => break,
                    more = ticker.tick() => {
                        if !more {
                            break;
                        }
                        // An in-flight cycle is never interrupted; errors are
                        // already logged and recorded by the coordinator.
                        let _ = coordinator.sync_now().await;
                    }
                }
            }
            tracing::info!("Sync scheduler stopped");
        });

        SchedulerHandle { token, join }
    }
}

/// Handle to a running scheduler
pub struct SchedulerHandle {
    token: CancellationToken,
    join: JoinHandle<()>,
}

impl SchedulerHandle {
    /// Cancel and wait for the current cycle, if any, to finish
    pub async fn shutdown(self) {
        self.token.cancel();
        if let Err(e) = self.join.await {
            tracing::warn!("Sync scheduler task ended abnormally: {}", e);
        }
    }

    /// Wait for the ticker to run out without cancelling
    pub async fn wait(self) {
        if let Err(e) = self.join.await {
            tracing::warn!("Sync scheduler task ended abnormally: {}", e);
        }
    }
}
