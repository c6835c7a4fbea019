//! HTTP implementation of the gateway boundary.
//!
//! Every request carries the fixed credential pair as HTTP basic auth.
//! Not a hard security boundary in this design; replace with a real token
//! scheme in production.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::error::{GatewayError, GatewayResult};
use crate::models::{Alert, LevelCount, LogCount, LogPage, ServiceCount, UserSettings};
use crate::query::LogQuery;

use super::{AggregateGateway, AlertGateway, LogGateway, SettingsGateway};

/// 网关连接配置
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Base URL of the gateway API, without a trailing slash.
    pub base_url: String,
    pub username: String,
    pub password: String,
    pub request_timeout: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api".to_string(),
            username: "admin".to_string(),
            password: "admin123".to_string(),
            request_timeout: Duration::from_secs(10),
        }
    }
}

/// Production gateway backed by `reqwest`.
pub struct HttpGateway {
    client: reqwest::Client,
    base_url: String,
    username: String,
    password: String,
}

impl HttpGateway {
    pub fn new(config: GatewayConfig) -> GatewayResult<Self> {
        if config.base_url.trim().is_empty() {
            return Err(GatewayError::config_error("gateway base URL is empty"));
        }

        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            username: config.username,
            password: config.password,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> GatewayResult<T> {
        let response = self
            .client
            .get(self.url(path))
            .basic_auth(&self.username, Some(&self.password))
            .query(query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::unexpected_status(status.as_u16(), path));
        }

        debug!(endpoint = path, status = status.as_u16(), "gateway GET ok");
        Ok(response.json().await?)
    }

    async fn post_json<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> GatewayResult<()> {
        let response = self
            .client
            .post(self.url(path))
            .basic_auth(&self.username, Some(&self.password))
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::unexpected_status(status.as_u16(), path));
        }
        Ok(())
    }
}

#[async_trait]
impl LogGateway for HttpGateway {
    async fn fetch_logs(&self, query: &LogQuery) -> GatewayResult<LogPage> {
        self.get_json("/monitor", &query.to_params()).await
    }

    async fn fetch_levels(&self) -> GatewayResult<Vec<String>> {
        self.get_json("/monitor/levels", &[]).await
    }

    async fn fetch_services(&self) -> GatewayResult<Vec<String>> {
        self.get_json("/monitor/services", &[]).await
    }
}

#[async_trait]
impl AlertGateway for HttpGateway {
    async fn fetch_unread_alerts(&self) -> GatewayResult<Vec<Alert>> {
        self.get_json("/alerts/unread", &[]).await
    }

    async fn fetch_alert_history(&self) -> GatewayResult<Vec<Alert>> {
        self.get_json("/alerts", &[]).await
    }

    async fn mark_alert_read(&self, alert_id: u64) -> GatewayResult<()> {
        let path = format!("/alerts/{}/read", alert_id);
        let response = self
            .client
            .patch(self.url(&path))
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::unexpected_status(status.as_u16(), &path));
        }

        debug!(alert_id, "alert marked read on server");
        Ok(())
    }
}

#[async_trait]
impl AggregateGateway for HttpGateway {
    async fn fetch_log_count(&self) -> GatewayResult<LogCount> {
        self.get_json("/monitor/count", &[]).await
    }

    async fn fetch_counts_by_service(&self) -> GatewayResult<Vec<ServiceCount>> {
        self.get_json("/monitor/count/services", &[]).await
    }

    async fn fetch_counts_by_level(&self) -> GatewayResult<Vec<LevelCount>> {
        self.get_json("/monitor/count/levels", &[]).await
    }
}

#[async_trait]
impl SettingsGateway for HttpGateway {
    async fn fetch_settings(&self) -> GatewayResult<UserSettings> {
        self.get_json("/settings", &[]).await
    }

    async fn save_settings(&self, settings: &UserSettings) -> GatewayResult<()> {
        self.post_json("/settings", settings).await
    }
}
