use uuid::Uuid;

use aci_core::error::CoreError;

/// Errors from the API client layer.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The requested resource does not exist. Kept distinct from generic
    /// API failure so views can render a dedicated not-found state.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: Uuid },

    /// The server returned a non-2xx status.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The action is illegal for the current role and article state.
    /// Raised before any network call; callers treat it as a no-op.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Request input failed client-side validation.
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Convenience alias for client call results.
pub type ClientResult<T> = Result<T, ClientError>;

impl From<CoreError> for ClientError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NotFound { entity, id } => Self::NotFound { entity, id },
            CoreError::Forbidden(msg) => Self::Forbidden(msg),
            CoreError::Validation(msg) => Self::Validation(msg),
            CoreError::InvalidTransition { from, to } => {
                Self::Validation(format!("invalid status transition: {from} -> {to}"))
            }
        }
    }
}
