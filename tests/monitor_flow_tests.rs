//! End-to-end flows: real components wired to a mock gateway backend.

use std::sync::Arc;
use std::time::Duration;

use log_monitor::models::LogFilter;
use log_monitor::{
    AlertPoller, GatewayConfig, HttpGateway, LogQueryController, NotificationReconciler,
    PollerConfig,
};

fn gateway_for(server: &mockito::ServerGuard) -> Arc<HttpGateway> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
    Arc::new(
        HttpGateway::new(GatewayConfig {
            base_url: server.url(),
            request_timeout: Duration::from_secs(5),
            ..GatewayConfig::default()
        })
        .unwrap(),
    )
}

#[tokio::test]
async fn submitted_filter_reaches_the_wire_and_fills_the_snapshot() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/monitor")
        .match_query(mockito::Matcher::UrlEncoded(
            "level".into(),
            "ERROR".into(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
                "content": [
                    {
                        "id": 1,
                        "serviceName": "payment-service",
                        "level": "ERROR",
                        "message": "charge declined",
                        "timestamp": "2024-01-15T14:30:22.000Z"
                    }
                ],
                "totalElements": 41
            }"#,
        )
        .create_async()
        .await;

    let controller = LogQueryController::new(gateway_for(&server));
    let mut rx = controller.subscribe();

    controller.submit(&LogFilter {
        level: "ERROR".to_string(),
        ..LogFilter::default()
    });

    let snapshot = rx
        .wait_for(|s| !s.loading && !s.rows.is_empty())
        .await
        .unwrap()
        .clone();
    assert_eq!(snapshot.total, 41);
    assert_eq!(snapshot.rows[0].message, "charge declined");
}

#[tokio::test]
async fn optimistic_read_receipt_reconciles_against_the_server() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/alerts/unread")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"[
                {"id": 1, "level": "ERROR", "message": "a", "timestamp": "2024-01-15T14:30:22.000Z", "read": false},
                {"id": 2, "level": "WARN", "message": "b", "timestamp": "2024-01-15T14:31:00.000Z", "read": false}
            ]"#,
        )
        .expect_at_least(1)
        .create_async()
        .await;
    let patch = server
        .mock("PATCH", "/alerts/1/read")
        .with_status(200)
        .create_async()
        .await;

    let gateway = gateway_for(&server);
    let poller = AlertPoller::new(
        gateway.clone(),
        PollerConfig {
            reconcile_delay: Duration::from_millis(10),
            ..PollerConfig::default()
        },
    );
    poller.poll_now().await;
    assert_eq!(poller.snapshot().unread_count, 2);

    let reconciler = NotificationReconciler::new(gateway, poller.clone());
    let handle = reconciler.mark_read(1);
    assert_eq!(poller.snapshot().unread_count, 1, "optimistic removal");

    handle.await.unwrap();
    patch.assert_async().await;
    // The mock still reports both unread, so the reconcile poll restores
    // server truth over the optimistic state.
    assert_eq!(poller.snapshot().unread_count, 2);
}
