//! Optimistic mark-as-read with eventual server reconciliation.
//!
//! Two intentionally decoupled effects: a synchronous local-state edit so
//! the UI reflects the action without perceived latency, and a scheduled
//! reconciliation poll that corrects any optimistic error. A failed server
//! call is never rolled back manually; the follow-up poll restores server
//! truth instead.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::gateway::AlertGateway;

use super::AlertPoller;

/// 已读回执协调器
#[derive(Clone)]
pub struct NotificationReconciler {
    gateway: Arc<dyn AlertGateway>,
    poller: AlertPoller,
    reconcile_delay: Duration,
}

impl NotificationReconciler {
    pub fn new(gateway: Arc<dyn AlertGateway>, poller: AlertPoller) -> Self {
        let reconcile_delay = poller.config().reconcile_delay;
        Self {
            gateway,
            poller,
            reconcile_delay,
        }
    }

    /// Mark one alert as read.
    ///
    /// The alert disappears from the local unread collection before any
    /// network round trip completes; the returned handle finishes once the
    /// follow-up reconciliation poll has applied. Marking an already-absent
    /// id is idempotent.
    pub fn mark_read(&self, alert_id: u64) -> JoinHandle<()> {
        self.poller.remove_local(alert_id);

        let gateway = self.gateway.clone();
        let poller = self.poller.clone();
        let delay = self.reconcile_delay;
        tokio::spawn(async move {
            match gateway.mark_alert_read(alert_id).await {
                Ok(()) => debug!(alert_id, "mark-as-read acknowledged"),
                Err(err) => {
                    // No local rollback: the reconcile poll below restores
                    // server truth either way.
                    warn!(alert_id, error = %err, "mark-as-read failed, reconciling with server");
                }
            }
            tokio::time::sleep(delay).await;
            poller.poll_now().await;
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifications::poller::PollerConfig;
    use crate::notifications::test_support::{alerts, ScriptedAlertGateway};

    fn setup(
        script: Vec<crate::error::GatewayResult<Vec<crate::models::Alert>>>,
    ) -> (Arc<ScriptedAlertGateway>, AlertPoller, NotificationReconciler) {
        let gateway = Arc::new(ScriptedAlertGateway::new(script));
        let poller = AlertPoller::new(gateway.clone(), PollerConfig::default());
        let reconciler = NotificationReconciler::new(gateway.clone(), poller.clone());
        (gateway, poller, reconciler)
    }

    #[tokio::test(start_paused = true)]
    async fn mark_read_removes_immediately_and_reconciles() {
        let (gateway, poller, reconciler) = setup(vec![
            Ok(alerts(&[1, 2])),
            // Server truth after the mark: only alert 2 remains unread.
            Ok(alerts(&[2])),
        ]);

        poller.poll_now().await;
        assert_eq!(poller.snapshot().unread_count, 2);

        // Let the initial-load pulse expire before exercising the mark flow.
        tokio::time::sleep(Duration::from_millis(700)).await;
        tokio::task::yield_now().await;
        assert!(!poller.snapshot().pulse);

        let handle = reconciler.mark_read(1);
        // Optimistic removal is visible before the server call resolves.
        assert_eq!(poller.snapshot().unread_count, 1);

        handle.await.unwrap();
        assert_eq!(gateway.marked.lock().as_slice(), &[1]);

        let snapshot = poller.snapshot();
        assert_eq!(snapshot.unread_count, 1);
        assert_eq!(snapshot.alerts[0].id, 2);
        assert!(!snapshot.pulse, "reconcile with equal count must not pulse");
    }

    #[tokio::test(start_paused = true)]
    async fn failed_mark_still_reconciles_with_server_truth() {
        let (gateway, poller, reconciler) = setup(vec![
            Ok(alerts(&[1, 2])),
            // The PATCH fails, so the server still reports both unread.
            Ok(alerts(&[1, 2])),
        ]);
        gateway.fail_next_marks(1);

        poller.poll_now().await;
        let handle = reconciler.mark_read(1);
        assert_eq!(poller.snapshot().unread_count, 1, "optimistic removal");

        handle.await.unwrap();

        // The alert reappears because the server still reports it unread;
        // no manual rollback code was involved.
        let snapshot = poller.snapshot();
        assert_eq!(snapshot.unread_count, 2);
        assert!(gateway.marked.lock().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn marking_absent_id_is_a_no_op_locally() {
        let (gateway, poller, reconciler) = setup(vec![Ok(alerts(&[1])), Ok(alerts(&[1]))]);

        poller.poll_now().await;
        let handle = reconciler.mark_read(42);
        assert_eq!(poller.snapshot().unread_count, 1, "collection intact");

        handle.await.unwrap();
        // The server call and reconcile still happen; PATCH is idempotent.
        assert_eq!(gateway.marked.lock().as_slice(), &[42]);
        assert_eq!(poller.snapshot().unread_count, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn reconcile_never_readds_a_confirmed_read() {
        let (_, poller, reconciler) = setup(vec![
            Ok(alerts(&[1, 2, 3])),
            // Server truth moved on concurrently: 1 read, 4 arrived.
            Ok(alerts(&[2, 3, 4])),
        ]);

        poller.poll_now().await;
        let handle = reconciler.mark_read(1);
        handle.await.unwrap();

        let snapshot = poller.snapshot();
        assert_eq!(snapshot.unread_count, 3);
        assert!(snapshot.alerts.iter().all(|a| a.id != 1));
        assert!(
            snapshot.pulse,
            "2 -> 3 after removal is a strict increase and pulses"
        );
    }
}
