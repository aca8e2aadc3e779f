//! Authentication: token persistence, backend session calls, the provider
//! that owns session state, and the guards that consume it.
//!
//! SYSTEM CONTEXT
//! ==============
//! Data flow on page load: `AuthProvider` mounts -> `AuthClient` reads the
//! `SessionStore` and re-validates the token -> guards observe the settled
//! state and either render their children or redirect.

pub mod client;
pub mod context;
pub mod error;
pub mod guard;
pub mod navigate;
pub mod store;

pub use client::{AuthClient, Authorized, WebAuthClient};
pub use context::{AuthContext, AuthProvider, try_use_auth, use_auth};
pub use error::AuthError;
pub use guard::{AdminAuthGuard, AuthGuard, GuardCommand, GuardConfig, GuardMachine, GuardPhase};
pub use navigate::{BrowserNavigator, LOGIN_PATH, Navigator};
pub use store::{KeyValueStore, LocalStorage, MemoryStorage, SessionStore, StoredTokens};
