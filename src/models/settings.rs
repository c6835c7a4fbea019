//! 用户偏好设置数据结构
//!
//! The core persists these values through the settings gateway without
//! interpreting them: the notification badge shows all unread alerts
//! regardless of `alert_level` (the preference is carried for the settings
//! view only).

use serde::{Deserialize, Serialize};

/// Alert-level preference persisted with the user settings.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertLevelPreference {
    /// Only ERROR
    Error,
    /// WARN & ERROR
    WarnError,
    /// INFO, WARN & ERROR
    InfoWarnError,
    /// All alert levels including debug
    #[default]
    All,
}

/// 用户设置（跨会话持久化）
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserSettings {
    #[serde(rename = "darkMode", default)]
    pub dark_mode: bool,
    #[serde(rename = "alertLevel", default)]
    pub alert_level: AlertLevelPreference,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            dark_mode: false,
            alert_level: AlertLevelPreference::All,
        }
    }
}
