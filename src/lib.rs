//! 日志监控核心库
//!
//! Query-driven log browsing, alert polling with optimistic read receipts,
//! dashboard aggregates and persisted user settings, all speaking to a
//! remote monitoring gateway over HTTP.
//!
//! The crate is organized around a small set of long-lived components:
//!
//! - [`query::LogQueryController`] serializes filter submissions into
//!   canonical [`query::LogQuery`] values and keeps exactly one fetch
//!   outstanding per distinct query.
//! - [`notifications::AlertPoller`] polls unread alerts on a fixed cadence
//!   and arms a short attention pulse on strict count increases.
//! - [`notifications::NotificationReconciler`] applies mark-as-read
//!   optimistically and reconciles with server truth shortly after.
//! - [`settings::SettingsStore`] write-through persists user preferences
//!   with debounced saves.
//!
//! All components publish whole snapshots through `tokio::sync::watch`
//! channels; consumers never observe partial state.

pub mod config;
pub mod dashboard;
pub mod error;
pub mod gateway;
pub mod models;
pub mod notifications;
pub mod query;
pub mod settings;

pub use config::{ConfigError, MonitorConfig};
pub use dashboard::{load_dashboard, DashboardSnapshot};
pub use error::{GatewayError, GatewayResult};
pub use gateway::{
    AggregateGateway, AlertGateway, GatewayConfig, HttpGateway, LogGateway, SettingsGateway,
};
pub use models::{
    Alert, AlertLevelPreference, LevelCount, LogCount, LogEntry, LogFilter, LogLevel, LogPage,
    ServiceCount, UserSettings,
};
pub use notifications::{
    AlertHistoryFeed, AlertPoller, HistoryFeedConfig, NotificationReconciler,
    NotificationSnapshot, PollerConfig,
};
pub use query::{
    load_filter_suggestions, FilterSuggestions, LogQuery, LogQueryController, LogViewSnapshot,
    DEFAULT_PAGE_SIZE,
};
pub use settings::{SettingsStore, SettingsStoreConfig};
