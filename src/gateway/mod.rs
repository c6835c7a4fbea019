//! 远程日志/告警网关边界
//!
//! The core treats the gateway as an opaque request/response boundary.
//! Controllers depend on the traits below so they can be exercised against
//! in-process fakes; [`HttpGateway`] is the production implementation.

use async_trait::async_trait;

use crate::error::GatewayResult;
use crate::models::{Alert, LevelCount, LogCount, LogPage, ServiceCount, UserSettings};
use crate::query::LogQuery;

mod http;

pub use http::{GatewayConfig, HttpGateway};

/// Log search and autocomplete-suggestion operations.
#[async_trait]
pub trait LogGateway: Send + Sync {
    /// `GET /monitor` with the canonical query parameters.
    async fn fetch_logs(&self, query: &LogQuery) -> GatewayResult<LogPage>;

    /// `GET /monitor/levels` - known level values for autocomplete.
    async fn fetch_levels(&self) -> GatewayResult<Vec<String>>;

    /// `GET /monitor/services` - known service names for autocomplete.
    async fn fetch_services(&self) -> GatewayResult<Vec<String>>;
}

/// Alert listing and mark-as-read operations.
#[async_trait]
pub trait AlertGateway: Send + Sync {
    /// `GET /alerts/unread` - alerts with `read=false`, most recent first.
    async fn fetch_unread_alerts(&self) -> GatewayResult<Vec<Alert>>;

    /// `GET /alerts` - full alert history (read + unread).
    async fn fetch_alert_history(&self) -> GatewayResult<Vec<Alert>>;

    /// `PATCH /alerts/{id}/read` - idempotent; only success/failure matters.
    async fn mark_alert_read(&self, alert_id: u64) -> GatewayResult<()>;
}

/// Dashboard aggregate counters.
#[async_trait]
pub trait AggregateGateway: Send + Sync {
    /// `GET /monitor/count`
    async fn fetch_log_count(&self) -> GatewayResult<LogCount>;

    /// `GET /monitor/count/services`
    async fn fetch_counts_by_service(&self) -> GatewayResult<Vec<ServiceCount>>;

    /// `GET /monitor/count/levels`
    async fn fetch_counts_by_level(&self) -> GatewayResult<Vec<LevelCount>>;
}

/// Opaque settings persistence.
#[async_trait]
pub trait SettingsGateway: Send + Sync {
    /// `GET /settings`
    async fn fetch_settings(&self) -> GatewayResult<UserSettings>;

    /// `POST /settings`
    async fn save_settings(&self, settings: &UserSettings) -> GatewayResult<()>;
}
