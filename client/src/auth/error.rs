//! Auth error taxonomy.

use crate::net::api::ApiError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// The backend rejected the username/password pair.
    #[error("invalid credentials")]
    InvalidCredentials,
    /// The stored or refreshed token is no longer accepted.
    #[error("session expired")]
    SessionExpired,
    /// A data call was refused for a reason other than the session.
    #[error("backend rejected the request: status {status}")]
    Backend { status: u16 },
    /// Transport-level failure; the request may be retried.
    #[error("network failure: {0}")]
    NetworkFailure(String),
    /// An auth consumer was used outside `<AuthProvider>`.
    #[error("auth context used outside <AuthProvider>")]
    ProviderMissing,
}

impl AuthError {
    /// Message suitable for inline display on the login form.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "Invalid credentials. Please check your username and password.",
            Self::SessionExpired => "Your session has expired. Please sign in again.",
            Self::Backend { .. } => "The server could not complete the request. Please try again.",
            Self::NetworkFailure(_) => "An error occurred during login. Please try again.",
            Self::ProviderMissing => "Authentication is not available.",
        }
    }
}

impl From<ApiError> for AuthError {
    /// Map a failed call on an already-issued token. Only a 401 speaks to
    /// the session; other statuses are the endpoint's own failure.
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Rejected { status: 401 } => Self::SessionExpired,
            ApiError::Rejected { status } => Self::Backend { status },
            ApiError::Network(msg) | ApiError::Decode(msg) => Self::NetworkFailure(msg),
        }
    }
}
