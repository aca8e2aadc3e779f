//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Owned by the auth provider and read by route guards and user-aware pages.
//! Constructors are the only way to build a value, so a token that has not
//! been verified by a profile fetch never reads as authenticated.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::types::User;

/// Authentication state tracking the verified user, the bearer token and the
/// boot-time loading flag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthState {
    user: Option<User>,
    access_token: Option<String>,
    loading: bool,
}

impl AuthState {
    /// Initial state before persisted tokens have been checked.
    #[must_use]
    pub fn booting() -> Self {
        Self { user: None, access_token: None, loading: true }
    }

    /// Settled, unauthenticated state.
    #[must_use]
    pub fn signed_out() -> Self {
        Self { user: None, access_token: None, loading: false }
    }

    /// Settled state for a token whose profile fetch succeeded.
    #[must_use]
    pub fn signed_in(access_token: impl Into<String>, user: User) -> Self {
        Self { user: Some(user), access_token: Some(access_token.into()), loading: false }
    }

    /// Swap in a refreshed access token, keeping the verified user.
    ///
    /// A signed-out state stays signed out: a fresh token alone proves nothing.
    #[must_use]
    pub fn with_access_token(self, access_token: impl Into<String>) -> Self {
        match self.user {
            Some(user) => Self::signed_in(access_token, user),
            None => self,
        }
    }

    #[must_use]
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    #[must_use]
    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some() && self.user.is_some()
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(|u| u.is_admin)
    }
}

impl Default for AuthState {
    fn default() -> Self {
        Self::booting()
    }
}
