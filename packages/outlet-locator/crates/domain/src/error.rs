use thiserror::Error;

pub type Result<T> = std::result::Result<T, LocatorError>;

/// Every failure the outlet core can report. None of these are retried.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LocatorError {
    #[error("Outlet repository unavailable: {0}")]
    RepositoryUnavailable(String),

    #[error("Outlet repository query failed: {0}")]
    RepositoryQueryFailed(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Provider failure: {0}")]
    ProviderFailure(String),

    #[error("Cannot compare outlet {outlet} with outlet {other}: {reason}")]
    OverlapComputation {
        outlet: i64,
        other: i64,
        reason: String,
    },
}

impl LocatorError {
    /// True when the caller supplied bad input, as opposed to a failure on our side.
    pub fn is_client_error(&self) -> bool {
        matches!(self, LocatorError::InvalidInput(_))
    }
}
