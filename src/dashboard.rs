//! 仪表盘聚合数据加载
//!
//! The three aggregate counters are fetched concurrently and each degrades
//! independently to an empty/zero value on failure, so one broken endpoint
//! never blanks the whole dashboard.

use tracing::warn;

use crate::gateway::AggregateGateway;
use crate::models::{LevelCount, ServiceCount};

/// Point-in-time dashboard aggregates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardSnapshot {
    pub total_logs: u64,
    pub by_service: Vec<ServiceCount>,
    pub by_level: Vec<LevelCount>,
}

/// Fetch all dashboard aggregates in one round.
pub async fn load_dashboard(gateway: &dyn AggregateGateway) -> DashboardSnapshot {
    let (count, by_service, by_level) = futures::join!(
        gateway.fetch_log_count(),
        gateway.fetch_counts_by_service(),
        gateway.fetch_counts_by_level(),
    );

    DashboardSnapshot {
        total_logs: count
            .map(|c| c.count)
            .unwrap_or_else(|err| {
                warn!(error = %err, "failed to fetch log count");
                0
            }),
        by_service: by_service.unwrap_or_else(|err| {
            warn!(error = %err, "failed to fetch per-service counts");
            Vec::new()
        }),
        by_level: by_level.unwrap_or_else(|err| {
            warn!(error = %err, "failed to fetch per-level counts");
            Vec::new()
        }),
    }
}
