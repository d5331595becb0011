//! The polling loop: fetch, validate, translate, deliver, advance.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use practicum_api::{ApiError, PracticumClient};
use practicum_models::StatusPage;
use serde_json::Value;
use tokio::sync::watch;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, error, info, warn};

use crate::error::{FailureSignature, Result};
use crate::notifier::Notify;

/// Default delay between poll cycles.
pub const DEFAULT_POLL_PERIOD: Duration = Duration::from_secs(600);

/// Capability to fetch raw homework-status pages.
///
/// Implemented by [`PracticumClient`] in production and by scripted
/// sources in tests.
#[async_trait]
pub trait StatusSource: Send + Sync {
    /// Returns the decoded body listing all changes since `from_date`.
    async fn homework_statuses(&self, from_date: u64) -> std::result::Result<Value, ApiError>;
}

#[async_trait]
impl StatusSource for PracticumClient {
    async fn homework_statuses(&self, from_date: u64) -> std::result::Result<Value, ApiError> {
        PracticumClient::homework_statuses(self, from_date).await
    }
}

#[async_trait]
impl<T: StatusSource + ?Sized> StatusSource for Arc<T> {
    async fn homework_statuses(&self, from_date: u64) -> std::result::Result<Value, ApiError> {
        (**self).homework_statuses(from_date).await
    }
}

/// What one completed cycle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleReport {
    /// The page was empty; nothing to announce.
    Idle,
    /// A status change was announced for the given homework id.
    Delivered {
        /// Id of the homework whose change was delivered.
        id: u64,
    },
}

/// State carried between poll cycles.
///
/// Owned by the watcher; nothing else reads or writes it while the loop
/// runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WatchState {
    /// Lower bound of the next status query (Unix seconds). Zero means
    /// the full history, so the latest known status is replayed once at
    /// startup.
    pub watermark: u64,
    /// Signature of the last announced failure, for duplicate
    /// suppression.
    pub last_failure: Option<FailureSignature>,
}

impl WatchState {
    /// State that starts polling from the given watermark.
    pub fn starting_at(watermark: u64) -> Self {
        Self {
            watermark,
            last_failure: None,
        }
    }
}

/// Polls the homework-status feed and announces the newest change to the
/// configured chat.
pub struct Watcher<S, N> {
    source: S,
    notifier: N,
    period: Duration,
    state: WatchState,
}

impl<S: StatusSource, N: Notify> Watcher<S, N> {
    /// Creates a watcher polling `source` every `period`.
    pub fn new(source: S, notifier: N, period: Duration, state: WatchState) -> Self {
        Self {
            source,
            notifier,
            period,
            state,
        }
    }

    /// Current inter-cycle state.
    pub fn state(&self) -> &WatchState {
        &self.state
    }

    /// Runs one poll cycle.
    ///
    /// Errors propagate untouched; recovery and alerting belong to
    /// [`tick`](Self::tick). The watermark advances only after this
    /// page's notification was delivered, so a failed cycle is retried
    /// against the same lower bound and no change is lost.
    pub async fn poll_once(&mut self) -> Result<CycleReport> {
        let raw = self.source.homework_statuses(self.state.watermark).await?;
        let page = StatusPage::from_value(&raw)?;

        let Some(latest) = page.latest() else {
            debug!(watermark = self.state.watermark, "no homework updates");
            return Ok(CycleReport::Idle);
        };

        let text = latest.status_line()?;
        let id = latest.id;
        self.notifier.send(&text).await?;

        self.state.watermark = page.current_date;
        info!(
            homework_id = id,
            watermark = self.state.watermark,
            "status change delivered"
        );
        Ok(CycleReport::Delivered { id })
    }

    /// Runs one cycle and applies the error policy.
    ///
    /// Every failure is logged. A failure is announced in the chat only
    /// when its signature differs from the last announced one, so an
    /// outage produces a single alert instead of one per cycle. A
    /// successful cycle clears the stored signature, and a failed alert
    /// delivery leaves it unset so the alert is retried next cycle.
    pub async fn tick(&mut self) {
        match self.poll_once().await {
            Ok(_) => {
                self.state.last_failure = None;
            }
            Err(e) => {
                error!(error = %e, "poll cycle failed");
                let signature = e.signature();
                if self.state.last_failure.as_ref() == Some(&signature) {
                    debug!("failure alert suppressed, same condition as last cycle");
                    return;
                }
                match self.notifier.send(&format!("Program failure: {e}")).await {
                    Ok(()) => self.state.last_failure = Some(signature),
                    Err(send_error) => {
                        warn!(error = %send_error, "failure alert could not be delivered");
                    }
                }
            }
        }
    }

    /// Polls at the configured period until `shutdown` flips to true.
    ///
    /// The interval spaces cycle starts apart regardless of how each
    /// cycle ended; a cycle that overruns the period delays the next tick
    /// instead of bursting.
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(period_secs = self.period.as_secs(), "watcher started");

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.tick().await;
                }
                _ = shutdown.changed() => {
                    if *shutdown.borrow() {
                        debug!("watcher received shutdown signal");
                        break;
                    }
                }
            }
        }

        info!("watcher stopped");
    }
}
