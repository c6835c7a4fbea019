//! 仪表盘聚合计数数据结构

use serde::{Deserialize, Serialize};

/// Total log count (`GET /monitor/count`).
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogCount {
    #[serde(default)]
    pub count: u64,
}

/// Per-service log count (`GET /monitor/count/services`).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ServiceCount {
    #[serde(rename = "serviceName")]
    pub service_name: String,
    pub count: u64,
}

/// Per-level log count (`GET /monitor/count/levels`).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LevelCount {
    pub level: String,
    pub count: u64,
}
