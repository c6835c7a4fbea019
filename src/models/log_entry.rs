//! 日志条目和日志级别数据结构
//!
//! 本模块定义了日志表所使用的核心实体。条目一经获取即不可变，
//! 每次查询都会整体替换上一批结果。

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Display placeholder for timestamps that fail to parse.
///
/// A malformed timestamp never crashes row rendering; it is shown as this
/// explicit invalid-value indicator instead.
pub const INVALID_TIMESTAMP: &str = "invalid timestamp";

/// Severity domain shared by log entries and alerts.
///
/// Input is case-insensitive; `WARNING` is accepted as an alias for `WARN`.
/// The client never invents levels outside this domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Wire representation (uppercase).
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
            LogLevel::Trace => "TRACE",
        }
    }
}

/// 未知日志级别
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown log level: {0}")]
pub struct ParseLevelError(pub String);

impl FromStr for LogLevel {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim();
        if normalized.eq_ignore_ascii_case("ERROR") {
            Ok(LogLevel::Error)
        } else if normalized.eq_ignore_ascii_case("WARN")
            || normalized.eq_ignore_ascii_case("WARNING")
        {
            Ok(LogLevel::Warn)
        } else if normalized.eq_ignore_ascii_case("INFO") {
            Ok(LogLevel::Info)
        } else if normalized.eq_ignore_ascii_case("DEBUG") {
            Ok(LogLevel::Debug)
        } else if normalized.eq_ignore_ascii_case("TRACE") {
            Ok(LogLevel::Trace)
        } else {
            Err(ParseLevelError(s.to_string()))
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for LogLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for LogLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// 日志条目
///
/// Owned by the log query controller for the duration of one result set.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct LogEntry {
    pub id: u64,
    #[serde(rename = "serviceName")]
    pub service_name: String,
    pub level: LogLevel,
    pub message: String,
    /// ISO-8601 timestamp, kept verbatim from the wire and parsed on demand.
    pub timestamp: String,
}

impl LogEntry {
    /// Parsed timestamp, `None` when the wire value is malformed.
    pub fn parsed_timestamp(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.timestamp)
            .ok()
            .map(|ts| ts.with_timezone(&Utc))
    }

    /// Timestamp for display; malformed values render as an explicit
    /// invalid-value indicator rather than crashing the row.
    pub fn display_timestamp(&self) -> &str {
        if self.parsed_timestamp().is_some() {
            &self.timestamp
        } else {
            INVALID_TIMESTAMP
        }
    }
}

/// 分页查询结果
///
/// Page envelope returned by `GET /monitor`. Unknown envelope fields are
/// ignored on deserialization.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct LogPage {
    pub content: Vec<LogEntry>,
    #[serde(rename = "totalElements")]
    pub total_elements: u64,
}
