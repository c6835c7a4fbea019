//! Autocomplete suggestions for the filter bar.

use tracing::warn;

use crate::gateway::LogGateway;

/// Known level and service values offered by the filter inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSuggestions {
    pub levels: Vec<String>,
    pub services: Vec<String>,
}

/// Fetch both suggestion lists. Failures degrade to empty lists; an
/// unavailable suggestion endpoint never blocks filtering, it only costs
/// autocomplete.
pub async fn load_filter_suggestions(gateway: &dyn LogGateway) -> FilterSuggestions {
    let (levels, services) = futures::join!(gateway.fetch_levels(), gateway.fetch_services());

    FilterSuggestions {
        levels: levels.unwrap_or_else(|err| {
            warn!(error = %err, "failed to fetch level suggestions");
            Vec::new()
        }),
        services: services.unwrap_or_else(|err| {
            warn!(error = %err, "failed to fetch service suggestions");
            Vec::new()
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    use crate::error::{GatewayError, GatewayResult};
    use crate::models::LogPage;
    use crate::query::LogQuery;

    struct LevelsOnlyGateway;

    #[async_trait]
    impl LogGateway for LevelsOnlyGateway {
        async fn fetch_logs(&self, _query: &LogQuery) -> GatewayResult<LogPage> {
            Ok(LogPage::default())
        }

        async fn fetch_levels(&self) -> GatewayResult<Vec<String>> {
            Ok(vec!["ERROR".to_string(), "WARN".to_string()])
        }

        async fn fetch_services(&self) -> GatewayResult<Vec<String>> {
            Err(GatewayError::unexpected_status(500, "/monitor/services"))
        }
    }

    #[tokio::test]
    async fn unavailable_endpoint_degrades_to_empty_list() {
        let suggestions = load_filter_suggestions(&LevelsOnlyGateway).await;
        assert_eq!(suggestions.levels, vec!["ERROR", "WARN"]);
        assert!(suggestions.services.is_empty());
    }
}
