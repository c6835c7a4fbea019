//! 用户设置存储
//!
//! Settings are loaded once at startup and written through on every change
//! with a short debounce, so a burst of toggles coalesces into a single
//! `POST /settings`. The store never interprets the values beyond
//! pass-through; theme and alert-level preferences are configuration handed
//! explicitly to the views that need them.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::gateway::SettingsGateway;
use crate::models::{AlertLevelPreference, UserSettings};

/// 设置存储配置
#[derive(Debug, Clone)]
pub struct SettingsStoreConfig {
    /// Debounce window for write-through saves.
    pub save_debounce: Duration,
}

impl Default for SettingsStoreConfig {
    fn default() -> Self {
        Self {
            save_debounce: Duration::from_millis(400),
        }
    }
}

/// 设置存储
#[derive(Clone)]
pub struct SettingsStore {
    inner: Arc<SettingsInner>,
}

struct SettingsInner {
    gateway: Arc<dyn SettingsGateway>,
    config: SettingsStoreConfig,
    state: Mutex<SettingsState>,
    snapshot_tx: watch::Sender<UserSettings>,
}

#[derive(Default)]
struct SettingsState {
    settings: UserSettings,
    /// Debounce tag: only the save scheduled by the latest edit runs.
    save_epoch: u64,
}

impl SettingsStore {
    /// Load persisted settings once at startup. An unreachable gateway
    /// degrades to defaults rather than blocking the application.
    pub async fn load(gateway: Arc<dyn SettingsGateway>, config: SettingsStoreConfig) -> Self {
        let settings = match gateway.fetch_settings().await {
            Ok(settings) => settings,
            Err(err) => {
                warn!(error = %err, "failed to load settings, falling back to defaults");
                UserSettings::default()
            }
        };

        let (snapshot_tx, _) = watch::channel(settings);
        Self {
            inner: Arc::new(SettingsInner {
                gateway,
                config,
                state: Mutex::new(SettingsState {
                    settings,
                    save_epoch: 0,
                }),
                snapshot_tx,
            }),
        }
    }

    pub fn settings(&self) -> UserSettings {
        self.inner.state.lock().settings
    }

    /// Subscribe to settings replacements.
    pub fn subscribe(&self) -> watch::Receiver<UserSettings> {
        self.inner.snapshot_tx.subscribe()
    }

    pub fn set_dark_mode(&self, dark_mode: bool) {
        self.update(|settings| settings.dark_mode = dark_mode);
    }

    pub fn set_alert_level(&self, alert_level: AlertLevelPreference) {
        self.update(|settings| settings.alert_level = alert_level);
    }

    fn update(&self, edit: impl FnOnce(&mut UserSettings)) {
        let epoch = {
            let mut state = self.inner.state.lock();
            edit(&mut state.settings);
            state.save_epoch += 1;
            // send_replace: late subscribers must see the latest settings,
            // not the value loaded at startup.
            self.inner.snapshot_tx.send_replace(state.settings);
            state.save_epoch
        };

        let store = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(store.inner.config.save_debounce).await;

            let settings = {
                let state = store.inner.state.lock();
                if state.save_epoch != epoch {
                    // A newer edit superseded this save.
                    return;
                }
                state.settings
            };

            match store.inner.gateway.save_settings(&settings).await {
                Ok(()) => debug!(?settings, "settings saved"),
                Err(err) => warn!(error = %err, "failed to persist settings"),
            }
        });
    }
}
