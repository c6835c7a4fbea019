//! Fixed-interval polling of the unread-alert endpoint.
//!
//! Poll results always apply in completion order: unread snapshots are
//! idempotent whole-set replacements, so an out-of-order completion only
//! yields a slightly stale but self-consistent snapshot corrected by the
//! next tick. No staleness tag is needed here, unlike the log query path.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::gateway::AlertGateway;
use crate::models::Alert;

/// 告警轮询配置
#[derive(Debug, Clone)]
pub struct PollerConfig {
    /// Interval between unread-alert polls.
    pub poll_interval: Duration,
    /// How long the one-shot attention pulse stays up before auto-clearing.
    pub pulse_duration: Duration,
    /// Delay between a mark-as-read call and its follow-up reconcile poll.
    pub reconcile_delay: Duration,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(10),
            pulse_duration: Duration::from_millis(600),
            reconcile_delay: Duration::from_millis(500),
        }
    }
}

/// Point-in-time notification state, replaced wholesale on every change.
#[derive(Debug, Clone, Default)]
pub struct NotificationSnapshot {
    /// Unread alerts in server order (most recent first by contract; the
    /// client does not re-sort).
    pub alerts: Vec<Alert>,
    /// Badge count: the size of the unread collection.
    pub unread_count: usize,
    /// One-shot attention cue, armed only by a strict count increase.
    pub pulse: bool,
}

/// 未读告警轮询器
#[derive(Clone)]
pub struct AlertPoller {
    inner: Arc<PollerInner>,
}

struct PollerInner {
    gateway: Arc<dyn AlertGateway>,
    config: PollerConfig,
    state: Mutex<PollerState>,
    snapshot_tx: watch::Sender<NotificationSnapshot>,
    cancel: CancellationToken,
}

#[derive(Default)]
struct PollerState {
    alerts: Vec<Alert>,
    /// Count recorded from the previous completed poll (or local removal);
    /// the only value that survives across ticks.
    previous_count: usize,
    pulse: bool,
    /// Distinguishes overlapping pulse windows so a late auto-clear never
    /// cuts short a pulse re-armed by a newer increase.
    pulse_epoch: u64,
}

impl AlertPoller {
    pub fn new(gateway: Arc<dyn AlertGateway>, config: PollerConfig) -> Self {
        let (snapshot_tx, _) = watch::channel(NotificationSnapshot::default());
        Self {
            inner: Arc::new(PollerInner {
                gateway,
                config,
                state: Mutex::new(PollerState::default()),
                snapshot_tx,
                cancel: CancellationToken::new(),
            }),
        }
    }

    pub fn config(&self) -> &PollerConfig {
        &self.inner.config
    }

    /// Subscribe to whole-snapshot replacements.
    pub fn subscribe(&self) -> watch::Receiver<NotificationSnapshot> {
        self.inner.snapshot_tx.subscribe()
    }

    pub fn snapshot(&self) -> NotificationSnapshot {
        self.inner.snapshot_tx.borrow().clone()
    }

    /// Start the polling loop. The first poll fires immediately, then every
    /// `poll_interval` until [`stop`](Self::stop) is called.
    pub fn start(&self) -> JoinHandle<()> {
        let poller = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(poller.inner.config.poll_interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            info!(
                interval_secs = poller.inner.config.poll_interval.as_secs(),
                "alert polling started"
            );
            loop {
                tokio::select! {
                    _ = poller.inner.cancel.cancelled() => {
                        debug!("alert polling stopped");
                        break;
                    }
                    _ = ticker.tick() => {
                        poller.poll_now().await;
                    }
                }
            }
        })
    }

    /// Cancel the polling loop deterministically. Outstanding fetches may
    /// complete and apply; they are idempotent replacements.
    pub fn stop(&self) {
        self.inner.cancel.cancel();
    }

    /// Issue one poll immediately (also used for the open-panel event and
    /// the reconciliation follow-up).
    pub async fn poll_now(&self) {
        match self.inner.gateway.fetch_unread_alerts().await {
            Ok(alerts) => self.apply_unread(alerts),
            Err(err) => {
                // Previous collection and count stay untouched; the next
                // scheduled tick simply retries.
                warn!(error = %err, "alert poll failed, keeping previous snapshot");
            }
        }
    }

    /// Optimistically drop one alert from the local unread collection.
    /// Marking an already-absent id is a no-op.
    pub(crate) fn remove_local(&self, alert_id: u64) {
        {
            let mut state = self.inner.state.lock();
            let before = state.alerts.len();
            state.alerts.retain(|alert| alert.id != alert_id);
            if state.alerts.len() == before {
                return;
            }
            // A removal is never an increase; re-baseline so the next poll
            // compares against what the user currently sees.
            state.previous_count = state.alerts.len();
        }
        self.inner.publish();
    }

    /// Replace the unread collection with a completed poll result and apply
    /// the pulse-trigger rule: strictly greater count => one-shot pulse.
    fn apply_unread(&self, alerts: Vec<Alert>) {
        let armed_epoch = {
            let mut state = self.inner.state.lock();
            let new_count = alerts.len();
            let increased = new_count > state.previous_count;
            state.alerts = alerts;
            state.previous_count = new_count;
            if increased {
                state.pulse = true;
                state.pulse_epoch += 1;
                Some(state.pulse_epoch)
            } else {
                None
            }
        };
        self.inner.publish();

        if let Some(epoch) = armed_epoch {
            debug!("unread count increased, arming attention pulse");
            let poller = self.clone();
            tokio::spawn(async move {
                tokio::time::sleep(poller.inner.config.pulse_duration).await;
                poller.clear_pulse(epoch);
            });
        }
    }

    fn clear_pulse(&self, epoch: u64) {
        {
            let mut state = self.inner.state.lock();
            if state.pulse_epoch != epoch {
                return;
            }
            state.pulse = false;
        }
        self.inner.publish();
    }
}

impl PollerInner {
    fn publish(&self) {
        let snapshot = {
            let state = self.state.lock();
            NotificationSnapshot {
                alerts: state.alerts.clone(),
                unread_count: state.alerts.len(),
                pulse: state.pulse,
            }
        };
        // send_replace: the stored value must advance even with no
        // subscribers, since snapshot() reads the channel.
        self.snapshot_tx.send_replace(snapshot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GatewayError;
    use crate::notifications::test_support::{alerts, ScriptedAlertGateway};

    fn poller_with_script(script: Vec<crate::error::GatewayResult<Vec<Alert>>>) -> AlertPoller {
        let gateway = Arc::new(ScriptedAlertGateway::new(script));
        AlertPoller::new(gateway, PollerConfig::default())
    }

    async fn expire_pulse() {
        // Paused-clock tests: sleeping past the pulse window lets the
        // auto-clear task run.
        tokio::time::sleep(Duration::from_millis(700)).await;
        tokio::task::yield_now().await;
    }

    #[tokio::test(start_paused = true)]
    async fn pulse_fires_only_on_strict_increase() {
        // Counts across five ticks: [2, 2, 5, 5, 3].
        let poller = poller_with_script(vec![
            Ok(alerts(&[1, 2])),
            Ok(alerts(&[1, 2])),
            Ok(alerts(&[1, 2, 3, 4, 5])),
            Ok(alerts(&[1, 2, 3, 4, 5])),
            Ok(alerts(&[3, 4, 5])),
        ]);

        // Tick 1: initial load, 0 -> 2 is a strict increase.
        poller.poll_now().await;
        assert!(poller.snapshot().pulse);
        expire_pulse().await;
        assert!(!poller.snapshot().pulse);

        // Tick 2: equal count, no pulse.
        poller.poll_now().await;
        assert!(!poller.snapshot().pulse);

        // Tick 3: 2 -> 5, pulse.
        poller.poll_now().await;
        assert!(poller.snapshot().pulse);
        assert_eq!(poller.snapshot().unread_count, 5);
        expire_pulse().await;
        assert!(!poller.snapshot().pulse);

        // Tick 4: equal count, no pulse.
        poller.poll_now().await;
        assert!(!poller.snapshot().pulse);

        // Tick 5: decreasing count, no pulse.
        poller.poll_now().await;
        assert!(!poller.snapshot().pulse);
        assert_eq!(poller.snapshot().unread_count, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn pulse_auto_clears_after_fixed_duration() {
        let poller = poller_with_script(vec![Ok(alerts(&[1]))]);
        let mut rx = poller.subscribe();

        poller.poll_now().await;
        let armed = rx.wait_for(|s| s.pulse).await.unwrap().clone();
        assert_eq!(armed.unread_count, 1);

        tokio::time::sleep(Duration::from_millis(700)).await;
        let cleared = rx.wait_for(|s| !s.pulse).await.unwrap().clone();
        assert_eq!(cleared.unread_count, 1, "clearing the pulse keeps alerts");
    }

    #[tokio::test(start_paused = true)]
    async fn reinforced_increase_rearms_pulse_window() {
        let poller = poller_with_script(vec![Ok(alerts(&[1])), Ok(alerts(&[1, 2]))]);

        poller.poll_now().await;
        assert!(poller.snapshot().pulse);

        // A second strict increase inside the first pulse window re-arms it;
        // the first window's auto-clear must not cut the new one short.
        tokio::time::sleep(Duration::from_millis(300)).await;
        poller.poll_now().await;
        assert!(poller.snapshot().pulse);

        tokio::time::sleep(Duration::from_millis(400)).await;
        tokio::task::yield_now().await;
        assert!(
            poller.snapshot().pulse,
            "stale auto-clear from the first window must be ignored"
        );

        expire_pulse().await;
        assert!(!poller.snapshot().pulse);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_poll_keeps_previous_snapshot() {
        let poller = poller_with_script(vec![
            Ok(alerts(&[1, 2])),
            Err(GatewayError::unexpected_status(502, "/alerts/unread")),
        ]);

        poller.poll_now().await;
        expire_pulse().await;

        poller.poll_now().await;
        let snapshot = poller.snapshot();
        assert_eq!(snapshot.unread_count, 2, "badge is not zeroed on failure");
        assert!(!snapshot.pulse, "failure never triggers the pulse");
    }

    #[tokio::test(start_paused = true)]
    async fn polling_loop_ticks_and_stops_cleanly() {
        let gateway = Arc::new(ScriptedAlertGateway::new(vec![Ok(alerts(&[1]))]));
        let poller = AlertPoller::new(
            gateway.clone(),
            PollerConfig {
                poll_interval: Duration::from_secs(10),
                ..PollerConfig::default()
            },
        );

        let handle = poller.start();

        // First tick fires immediately, then once per interval.
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(gateway.unread_call_count(), 1);
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(gateway.unread_call_count(), 2);

        poller.stop();
        handle.await.expect("polling task panicked");

        // No leaked background fetches after teardown.
        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(gateway.unread_call_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn snapshot_updates_without_any_subscriber() {
        // Nothing holds a watch receiver; snapshot() must still reflect the
        // completed poll, not the construction-time default.
        let poller = poller_with_script(vec![Ok(alerts(&[1]))]);

        poller.poll_now().await;
        let snapshot = poller.snapshot();
        assert_eq!(snapshot.unread_count, 1);
        assert!(snapshot.pulse);
    }

    #[tokio::test]
    async fn remove_local_is_idempotent() {
        let poller = poller_with_script(vec![Ok(alerts(&[1, 2]))]);
        poller.poll_now().await;

        poller.remove_local(1);
        assert_eq!(poller.snapshot().unread_count, 1);

        // Absent id: no-op, no panic, collection intact.
        poller.remove_local(1);
        poller.remove_local(99);
        let snapshot = poller.snapshot();
        assert_eq!(snapshot.unread_count, 1);
        assert_eq!(snapshot.alerts[0].id, 2);
    }
}
