//! 日志过滤器数据结构
//!
//! A new filter snapshot is produced on every keystroke or selection; only a
//! snapshot whose canonical query differs from the last issued one triggers
//! a fetch (see `query::LogQuery`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 日志过滤条件
///
/// Empty strings and `None` both mean "no constraint". Free text is always
/// permitted for `service` and `level`; the known-value endpoints only feed
/// autocomplete suggestions. `start <= end` is not enforced here, the server
/// may reject inverted ranges.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct LogFilter {
    /// 服务名（空字符串 = 不限）
    #[serde(default)]
    pub service: String,
    /// 日志级别（空字符串 = 不限）
    #[serde(default)]
    pub level: String,
    /// 开始时间（含）
    #[serde(default)]
    pub start: Option<DateTime<Utc>>,
    /// 结束时间（不含）
    #[serde(default)]
    pub end: Option<DateTime<Utc>>,
}

impl LogFilter {
    /// True when no field constrains the result set.
    pub fn is_unconstrained(&self) -> bool {
        self.service.trim().is_empty()
            && self.level.trim().is_empty()
            && self.start.is_none()
            && self.end.is_none()
    }
}
