//! 告警数据结构
//!
//! Alerts are created by the server; the client only toggles `read`
//! optimistically before server confirmation. Unread alerts form the
//! authoritative badge-count source.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::log_entry::{LogLevel, INVALID_TIMESTAMP};

/// Fallback service label when the server omits `relatedService`.
pub const SYSTEM_SERVICE_LABEL: &str = "System";

/// 告警条目
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Alert {
    pub id: u64,
    pub level: LogLevel,
    pub message: String,
    #[serde(
        rename = "relatedService",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub related_service: Option<String>,
    /// ISO-8601 timestamp, kept verbatim from the wire.
    pub timestamp: String,
    pub read: bool,
}

impl Alert {
    /// Service label for display; absent services show as "System".
    pub fn service_label(&self) -> &str {
        self.related_service
            .as_deref()
            .unwrap_or(SYSTEM_SERVICE_LABEL)
    }

    /// Parsed timestamp, `None` when the wire value is malformed.
    pub fn parsed_timestamp(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.timestamp)
            .ok()
            .map(|ts| ts.with_timezone(&Utc))
    }

    /// Timestamp for display; malformed values render as an explicit
    /// invalid-value indicator.
    pub fn display_timestamp(&self) -> &str {
        if self.parsed_timestamp().is_some() {
            &self.timestamp
        } else {
            INVALID_TIMESTAMP
        }
    }
}
