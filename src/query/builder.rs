use chrono::{DateTime, SecondsFormat, Utc};

use crate::models::LogFilter;

/// Fixed page size for the log table.
///
/// Pagination always restarts at page zero on every fetch; no server-side
/// cursor state is held client-side.
pub const DEFAULT_PAGE_SIZE: u32 = 25;

/// Canonical query descriptor for `GET /monitor`.
///
/// Empty or absent filter fields are omitted entirely, so two filters that
/// differ only in "empty string vs. absent" build equal queries. Instants
/// serialize as RFC 3339 with millisecond precision and a `Z` suffix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogQuery {
    pub page: u32,
    pub size: u32,
    pub level: Option<String>,
    pub service_name: Option<String>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl Default for LogQuery {
    fn default() -> Self {
        Self::from_filter(&LogFilter::default())
    }
}

impl LogQuery {
    /// Build the canonical query from the current filter fields.
    ///
    /// Pure and total: no error conditions, no side effects.
    pub fn from_filter(filter: &LogFilter) -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
            level: non_empty(&filter.level),
            service_name: non_empty(&filter.service),
            start: filter.start,
            end: filter.end,
        }
    }

    /// Query-string parameters in wire order; absent fields are not sent at
    /// all (never as empty strings).
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("page", self.page.to_string()),
            ("size", self.size.to_string()),
        ];
        if let Some(level) = &self.level {
            params.push(("level", level.clone()));
        }
        if let Some(service) = &self.service_name {
            params.push(("serviceName", service.clone()));
        }
        if let Some(start) = self.start {
            params.push(("start", format_instant(start)));
        }
        if let Some(end) = self.end {
            params.push(("end", format_instant(end)));
        }
        params
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn format_instant(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}
