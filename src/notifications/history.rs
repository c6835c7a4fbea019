//! Slow-cadence polling of the full alert history.
//!
//! The alerts page shows read and unread alerts together; freshness matters
//! far less there than for the badge, so this feed ticks on its own longer
//! interval and shares nothing with the unread poller.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::gateway::AlertGateway;
use crate::models::Alert;

/// 告警历史轮询配置
#[derive(Debug, Clone)]
pub struct HistoryFeedConfig {
    pub poll_interval: Duration,
}

impl Default for HistoryFeedConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(30),
        }
    }
}

/// 告警历史轮询器
#[derive(Clone)]
pub struct AlertHistoryFeed {
    inner: Arc<FeedInner>,
}

struct FeedInner {
    gateway: Arc<dyn AlertGateway>,
    config: HistoryFeedConfig,
    snapshot_tx: watch::Sender<Vec<Alert>>,
    cancel: CancellationToken,
}

impl AlertHistoryFeed {
    pub fn new(gateway: Arc<dyn AlertGateway>, config: HistoryFeedConfig) -> Self {
        let (snapshot_tx, _) = watch::channel(Vec::new());
        Self {
            inner: Arc::new(FeedInner {
                gateway,
                config,
                snapshot_tx,
                cancel: CancellationToken::new(),
            }),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<Alert>> {
        self.inner.snapshot_tx.subscribe()
    }

    pub fn snapshot(&self) -> Vec<Alert> {
        self.inner.snapshot_tx.borrow().clone()
    }

    /// Start the history loop; first poll fires immediately.
    pub fn start(&self) -> JoinHandle<()> {
        let feed = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(feed.inner.config.poll_interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            info!(
                interval_secs = feed.inner.config.poll_interval.as_secs(),
                "alert history polling started"
            );
            loop {
                tokio::select! {
                    _ = feed.inner.cancel.cancelled() => {
                        debug!("alert history polling stopped");
                        break;
                    }
                    _ = ticker.tick() => {
                        feed.poll_now().await;
                    }
                }
            }
        })
    }

    pub fn stop(&self) {
        self.inner.cancel.cancel();
    }

    pub async fn poll_now(&self) {
        match self.inner.gateway.fetch_alert_history().await {
            Ok(alerts) => {
                // send_replace: the stored value must advance even with no
                // subscribers, since snapshot() reads the channel.
                self.inner.snapshot_tx.send_replace(alerts);
            }
            Err(err) => {
                warn!(error = %err, "alert history poll failed, keeping previous snapshot");
            }
        }
    }
}
