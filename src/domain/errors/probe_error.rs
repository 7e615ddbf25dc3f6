//! Errors raised while verifying that an avatar image loads.

use thiserror::Error;

/// Failure of a single avatar image probe.
///
/// A failed probe is an expected outcome (most accounts have no uploaded
/// avatar), so variants stay cheap to construct and compare.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProbeError {
    /// The request never produced an HTTP response.
    #[error("probe transport failed: {0}")]
    Network(String),

    /// The server answered with a non-success status.
    #[error("probe returned status {0}")]
    Status(u16),
}

impl ProbeError {
    /// Creates a `Network` error from any transport failure.
    pub fn network(err: impl std::fmt::Display) -> Self {
        Self::Network(err.to_string())
    }
}
