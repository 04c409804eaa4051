use thiserror::Error;

/// Why a lookup (or a location request) produced no snapshot.
///
/// None of these are fatal: the caller can issue the next lookup right away.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// Unknown place, or the provider answered with an HTTP error status.
    #[error("Place not found")]
    NotFound,

    /// The user declined access to their location.
    #[error("Location access denied")]
    PermissionDenied,

    /// Transport failure or an undecodable provider payload.
    #[error("Network failure: {0}")]
    NetworkFailure(String),

    /// No location capability is available on this platform.
    #[error("Location is not supported on this platform")]
    Unsupported,

    /// The query was rejected before any request was sent.
    #[error("Invalid query: {0}")]
    InvalidQuery(String),
}

impl LookupError {
    pub(crate) fn network(err: impl std::fmt::Display) -> Self {
        LookupError::NetworkFailure(err.to_string())
    }
}

impl From<reqwest::Error> for LookupError {
    fn from(err: reqwest::Error) -> Self {
        LookupError::network(err)
    }
}
