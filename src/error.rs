use miette::Diagnostic;
use thiserror::Error;

/// Gateway error type - uses miette for user-friendly diagnostics.
///
/// Every failure in this core is recoverable: read failures degrade to the
/// last known good state, write failures are corrected by the follow-up
/// reconciliation poll.
#[derive(Error, Debug, Diagnostic)]
pub enum GatewayError {
    #[error("HTTP request failed: {0}")]
    #[diagnostic(
        code(gateway::http_error),
        help("Check that the log gateway is running and reachable")
    )]
    Http(#[from] reqwest::Error),

    #[error("unexpected status {status} from {endpoint}")]
    #[diagnostic(
        code(gateway::unexpected_status),
        help("The gateway rejected the request; check credentials and query parameters")
    )]
    UnexpectedStatus { status: u16, endpoint: String },

    #[error("invalid gateway configuration: {0}")]
    #[diagnostic(code(gateway::config_error))]
    Config(String),
}

impl GatewayError {
    /// Create an unexpected-status error for a given endpoint.
    pub fn unexpected_status(status: u16, endpoint: impl Into<String>) -> Self {
        GatewayError::UnexpectedStatus {
            status,
            endpoint: endpoint.into(),
        }
    }

    /// Create a configuration error.
    pub fn config_error(message: impl Into<String>) -> Self {
        GatewayError::Config(message.into())
    }

    /// True when the next natural trigger (timer tick or filter change) may
    /// succeed without any intervention.
    pub fn is_transient(&self) -> bool {
        match self {
            GatewayError::Http(_) => true,
            GatewayError::UnexpectedStatus { status, .. } => *status >= 500,
            GatewayError::Config(_) => false,
        }
    }
}

/// Unified result type for gateway operations.
pub type GatewayResult<T> = std::result::Result<T, GatewayError>;
