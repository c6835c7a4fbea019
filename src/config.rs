//! 应用配置
//!
//! Layered configuration: built-in defaults, an optional TOML file, then
//! `LOG_MONITOR__*` environment overrides. Loaded once at startup and handed
//! explicitly to the components that need it (never ambient global state).

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::Validate;

use crate::gateway::GatewayConfig;
use crate::notifications::{HistoryFeedConfig, PollerConfig};
use crate::settings::SettingsStoreConfig;

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置加载失败: {0}")]
    Load(#[from] config::ConfigError),

    #[error("配置验证失败: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

/// 全局配置根结构
#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
#[serde(default)]
pub struct MonitorConfig {
    #[validate(nested)]
    pub gateway: GatewaySection,

    #[validate(nested)]
    pub polling: PollingSection,
}

/// 网关连接配置
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct GatewaySection {
    #[validate(length(min = 1, max = 500))]
    pub base_url: String,

    #[validate(length(min = 1, max = 100))]
    pub username: String,

    pub password: String,

    #[validate(range(min = 1, max = 300))]
    pub request_timeout_seconds: u64,
}

impl Default for GatewaySection {
    fn default() -> Self {
        let defaults = GatewayConfig::default();
        Self {
            base_url: defaults.base_url,
            username: defaults.username,
            password: defaults.password,
            request_timeout_seconds: defaults.request_timeout.as_secs(),
        }
    }
}

/// 轮询与防抖配置
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct PollingSection {
    #[validate(range(min = 1, max = 3600))]
    pub poll_interval_seconds: u64,

    #[validate(range(min = 1, max = 3600))]
    pub history_poll_interval_seconds: u64,

    #[validate(range(min = 100, max = 5000))]
    pub pulse_duration_ms: u64,

    #[validate(range(min = 0, max = 10000))]
    pub reconcile_delay_ms: u64,

    #[validate(range(min = 0, max = 10000))]
    pub settings_debounce_ms: u64,
}

impl Default for PollingSection {
    fn default() -> Self {
        let poller = PollerConfig::default();
        let history = HistoryFeedConfig::default();
        let settings = SettingsStoreConfig::default();
        Self {
            poll_interval_seconds: poller.poll_interval.as_secs(),
            history_poll_interval_seconds: history.poll_interval.as_secs(),
            pulse_duration_ms: poller.pulse_duration.as_millis() as u64,
            reconcile_delay_ms: poller.reconcile_delay.as_millis() as u64,
            settings_debounce_ms: settings.save_debounce.as_millis() as u64,
        }
    }
}

impl MonitorConfig {
    /// Load configuration from an optional TOML file plus environment
    /// overrides (`LOG_MONITOR__GATEWAY__BASE_URL=...`).
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        }
        builder = builder.add_source(
            config::Environment::with_prefix("LOG_MONITOR")
                .separator("__")
                .try_parsing(true),
        );

        let loaded: MonitorConfig = builder.build()?.try_deserialize()?;
        loaded.validate()?;
        Ok(loaded)
    }

    pub fn gateway_config(&self) -> GatewayConfig {
        GatewayConfig {
            base_url: self.gateway.base_url.clone(),
            username: self.gateway.username.clone(),
            password: self.gateway.password.clone(),
            request_timeout: Duration::from_secs(self.gateway.request_timeout_seconds),
        }
    }

    pub fn poller_config(&self) -> PollerConfig {
        PollerConfig {
            poll_interval: Duration::from_secs(self.polling.poll_interval_seconds),
            pulse_duration: Duration::from_millis(self.polling.pulse_duration_ms),
            reconcile_delay: Duration::from_millis(self.polling.reconcile_delay_ms),
        }
    }

    pub fn history_feed_config(&self) -> HistoryFeedConfig {
        HistoryFeedConfig {
            poll_interval: Duration::from_secs(self.polling.history_poll_interval_seconds),
        }
    }

    pub fn settings_store_config(&self) -> SettingsStoreConfig {
        SettingsStoreConfig {
            save_debounce: Duration::from_millis(self.polling.settings_debounce_ms),
        }
    }
}
