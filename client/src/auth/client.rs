//! Credential exchange, session re-validation, token refresh and logout.
//!
//! ARCHITECTURE
//! ============
//! `AuthClient` never holds the session itself. Every operation returns the
//! next `AuthState` (or token) and the provider writes it into its signal, so
//! there is exactly one writer of session state.
//!
//! ERROR HANDLING
//! ==============
//! Login errors are returned for inline display. Startup and refresh errors
//! are never surfaced: they settle into a clean signed-out state, with network
//! failures treated like an invalid session.

#[cfg(test)]
#[path = "client_test.rs"]
mod client_test;

use crate::net::api::{ApiError, AuthApi, HttpApi};
use crate::net::types::UserType;
use crate::state::auth::AuthState;

use super::error::AuthError;
use super::navigate::{BrowserNavigator, LOGIN_PATH, Navigator};
use super::store::{KeyValueStore, LocalStorage, SessionStore};

/// Client wired to the real backend, `localStorage` and `window.location`.
pub type WebAuthClient = AuthClient<HttpApi, LocalStorage, BrowserNavigator>;

/// Result of an authenticated call made through [`AuthClient::authorized`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Authorized<T> {
    pub value: T,
    /// New access token when the call needed a refresh.
    pub refreshed: Option<String>,
}

#[derive(Clone, Debug)]
pub struct AuthClient<A, K, N> {
    api: A,
    store: SessionStore<K>,
    navigator: N,
}

impl WebAuthClient {
    #[must_use]
    pub fn web() -> Self {
        Self::new(HttpApi::default(), LocalStorage, BrowserNavigator)
    }
}

impl<A, K, N> AuthClient<A, K, N>
where
    A: AuthApi,
    K: KeyValueStore,
    N: Navigator,
{
    pub fn new(api: A, medium: K, navigator: N) -> Self {
        Self { api, store: SessionStore::new(medium), navigator }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn store(&self) -> &SessionStore<K> {
        &self.store
    }

    /// Exchange credentials, verify them with a profile fetch, then persist.
    ///
    /// Nothing is written to the store unless both calls succeed.
    ///
    /// # Errors
    ///
    /// `InvalidCredentials` when the token endpoint rejects the pair,
    /// `SessionExpired` when the fresh token is refused by the profile
    /// endpoint, `NetworkFailure` on transport or decode errors.
    pub async fn login(&self, username: &str, password: &str) -> Result<AuthState, AuthError> {
        let tokens = self.api.obtain_token(username, password).await.map_err(|e| match e {
            ApiError::Rejected { .. } => AuthError::InvalidCredentials,
            ApiError::Network(msg) | ApiError::Decode(msg) => AuthError::NetworkFailure(msg),
        })?;

        let user = self.api.fetch_profile(&tokens.access).await.map_err(|e| match e {
            ApiError::Rejected { .. } => AuthError::SessionExpired,
            other => other.into(),
        })?;

        self.store.save(&tokens);
        self.store.set_user_type(UserType::for_user(&user));
        log::info!("signed in as {} (admin: {})", user.username, user.is_admin);
        Ok(AuthState::signed_in(tokens.access, user))
    }

    /// Re-validate the persisted access token. Always returns a settled state.
    pub async fn check_auth_status(&self) -> AuthState {
        let Some(access) = self.store.read().access else {
            return AuthState::signed_out();
        };

        match self.api.fetch_profile(&access).await {
            Ok(user) => AuthState::signed_in(access, user),
            Err(e) => {
                log::info!("stored session rejected: {e}");
                self.store.clear();
                AuthState::signed_out()
            }
        }
    }

    /// Exchange the persisted refresh token for a new access token.
    ///
    /// Any failure, including a missing refresh token, performs a full logout
    /// and returns `None`.
    pub async fn refresh_token(&self) -> Option<String> {
        let Some(refresh) = self.store.read().refresh else {
            log::info!("no refresh token; logging out");
            self.logout();
            return None;
        };

        match self.api.refresh_access(&refresh).await {
            Ok(access) => {
                self.store.save_access(&access);
                Some(access)
            }
            Err(e) => {
                log::warn!("token refresh failed: {e}");
                self.logout();
                None
            }
        }
    }

    /// Clear persisted tokens and leave for the login page.
    pub fn logout(&self) -> AuthState {
        self.store.clear();
        self.navigator.hard_navigate(LOGIN_PATH);
        AuthState::signed_out()
    }

    /// Run an authenticated backend call, refreshing and retrying once on 401.
    ///
    /// `access` falls back to the persisted token when `None`. Every path that
    /// ends in `SessionExpired` has already logged out.
    ///
    /// # Errors
    ///
    /// `SessionExpired` when no token is available, the refresh fails, or the
    /// retried call is still unauthorized. `Backend` for any other rejection
    /// and `NetworkFailure` for transport or decode errors.
    pub async fn authorized<T, F, Fut>(&self, access: Option<&str>, attempt: F) -> Result<Authorized<T>, AuthError>
    where
        F: Fn(String) -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        let stored = match access {
            Some(token) => Some(token.to_owned()),
            None => self.store.read().access,
        };
        let Some(token) = stored else {
            self.logout();
            return Err(AuthError::SessionExpired);
        };

        match attempt(token).await {
            Ok(value) => Ok(Authorized { value, refreshed: None }),
            Err(e) if e.is_unauthorized() => {
                let fresh = self.refresh_token().await.ok_or(AuthError::SessionExpired)?;
                match attempt(fresh.clone()).await {
                    Ok(value) => Ok(Authorized { value, refreshed: Some(fresh) }),
                    Err(e) if e.is_unauthorized() => {
                        log::warn!("refreshed token still unauthorized; logging out");
                        self.logout();
                        Err(AuthError::SessionExpired)
                    }
                    Err(e) => Err(e.into()),
                }
            }
            Err(e) => Err(e.into()),
        }
    }
}
