//! Auth context provider.
//!
//! SYSTEM CONTEXT
//! ==============
//! `AuthProvider` is mounted once at the application root. It owns the only
//! writable handle on the session and runs `check_auth_status` as its single
//! startup side effect. Everything below it reads the session through
//! `use_auth()`; guards never write it.
//!
//! TRADE-OFFS
//! ==========
//! In-flight requests are not cancelled on unmount. Their results are written
//! with `try_set`, which is a no-op once the provider's owner is disposed;
//! calls started after disposal find no client and do nothing.

#[cfg(test)]
#[path = "context_test.rs"]
mod context_test;

use leptos::prelude::*;

use super::client::{AuthClient, WebAuthClient};
use super::error::AuthError;
use super::navigate::Navigator;
use super::store::KeyValueStore;
use crate::net::api::{ApiError, AuthApi};
use crate::net::types::User;
use crate::state::auth::AuthState;

/// Copyable handle on the session and the operations that change it.
///
/// Generic over the client so the provider can be driven by fakes; the
/// application only ever uses the default.
pub struct AuthContext<C = WebAuthClient> {
    /// Current session. Read-only for consumers by convention.
    pub state: RwSignal<AuthState>,
    client: StoredValue<C>,
}

impl<C> Clone for AuthContext<C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C> Copy for AuthContext<C> {}

impl AuthContext {
    /// Context backed by the backend, `localStorage` and `window.location`.
    #[must_use]
    pub fn new() -> Self {
        Self::with_client(WebAuthClient::web())
    }
}

impl Default for AuthContext {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> AuthContext<C> {
    pub fn user(&self) -> Option<User> {
        self.state.with(|s| s.user().cloned())
    }

    pub fn access_token(&self) -> Option<String> {
        self.state.with(|s| s.access_token().map(str::to_owned))
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.with(AuthState::is_authenticated)
    }

    pub fn loading(&self) -> bool {
        self.state.with(AuthState::is_loading)
    }
}

impl<A, K, N> AuthContext<AuthClient<A, K, N>>
where
    A: AuthApi + Clone + Send + Sync + 'static,
    K: KeyValueStore + Clone + Send + Sync + 'static,
    N: Navigator + Clone + Send + Sync + 'static,
{
    /// Booting context around `client`. Must be created under a reactive owner.
    pub fn with_client(client: AuthClient<A, K, N>) -> Self {
        Self { state: RwSignal::new(AuthState::booting()), client: StoredValue::new(client) }
    }

    /// Re-validate persisted tokens and settle the boot state.
    pub async fn check_auth_status(self) {
        let Some(client) = self.client() else { return };
        let next = client.check_auth_status().await;
        self.settle(next);
    }

    /// # Errors
    ///
    /// Propagates [`AuthError`] from the credential exchange for inline display.
    pub async fn login(self, username: String, password: String) -> Result<(), AuthError> {
        let client = self.client().ok_or(AuthError::ProviderMissing)?;
        let next = client.login(&username, &password).await?;
        self.settle(next);
        Ok(())
    }

    pub fn logout(self) {
        if let Some(client) = self.client() {
            let next = client.logout();
            self.settle(next);
        }
    }

    pub async fn refresh_token(self) -> Option<String> {
        let client = self.client()?;
        let Some(access) = client.refresh_token().await else {
            self.settle(AuthState::signed_out());
            return None;
        };
        self.adopt_token(&access);
        Some(access)
    }

    /// Run an authenticated call with the session token, refreshing once on 401.
    ///
    /// # Errors
    ///
    /// `SessionExpired` after the session has been torn down, or the mapped
    /// call error with the session left as it was.
    pub async fn authorized<T, F, Fut>(self, attempt: F) -> Result<T, AuthError>
    where
        F: Fn(String) -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        let client = self.client().ok_or(AuthError::ProviderMissing)?;
        let token = self
            .state
            .try_with_untracked(|s| s.access_token().map(str::to_owned))
            .flatten();
        match client.authorized(token.as_deref(), attempt).await {
            Ok(out) => {
                if let Some(access) = out.refreshed {
                    self.adopt_token(&access);
                }
                Ok(out.value)
            }
            Err(AuthError::SessionExpired) => {
                // The client has already cleared the store and navigated away.
                self.settle(AuthState::signed_out());
                Err(AuthError::SessionExpired)
            }
            Err(e) => Err(e),
        }
    }

    fn client(self) -> Option<AuthClient<A, K, N>> {
        let client = self.client.try_get_value();
        if client.is_none() {
            log::debug!("auth call skipped: auth provider disposed");
        }
        client
    }

    fn adopt_token(self, access: &str) {
        let applied = self.state.try_update(|s| *s = std::mem::take(s).with_access_token(access));
        if applied.is_none() {
            log::debug!("refreshed token discarded: auth provider disposed");
        }
    }

    fn settle(self, next: AuthState) {
        if self.state.try_set(next).is_some() {
            log::debug!("auth state update discarded: auth provider disposed");
        }
    }
}

/// Auth context of the enclosing `<AuthProvider>`.
///
/// # Errors
///
/// `ProviderMissing` when called outside the provider's subtree.
pub fn try_use_auth() -> Result<AuthContext, AuthError> {
    use_context::<AuthContext>().ok_or(AuthError::ProviderMissing)
}

/// Auth context of the enclosing `<AuthProvider>`.
///
/// # Panics
///
/// Panics outside the provider's subtree; that is a wiring bug, not a
/// runtime condition.
pub fn use_auth() -> AuthContext {
    match try_use_auth() {
        Ok(auth) => auth,
        Err(e) => panic!("{e}"),
    }
}

/// Provide session state to `children` and start the one-time status check.
#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let auth = AuthContext::new();
    provide_context(auth);

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(auth.check_auth_status());

    children()
}
