use std::sync::{Arc, Mutex};

use futures::channel::oneshot;
use futures::executor::block_on;

use super::*;
use crate::auth::navigate::LOGIN_PATH;
use crate::auth::store::{ACCESS_KEY, MemoryStorage, REFRESH_KEY, USER_TYPE_KEY};
use crate::net::types::TokenPair;

// =============================================================================
// Fakes
// =============================================================================

#[derive(Default)]
struct Script {
    token: Option<Result<TokenPair, ApiError>>,
    profile: Option<Result<User, ApiError>>,
    refresh: Option<Result<String, ApiError>>,
    /// Holds the next profile or refresh call until the sender fires.
    gate: Option<oneshot::Receiver<()>>,
}

#[derive(Clone, Default)]
struct ScriptedApi {
    script: Arc<Mutex<Script>>,
}

impl ScriptedApi {
    fn with_token(self, result: Result<TokenPair, ApiError>) -> Self {
        self.script.lock().unwrap().token = Some(result);
        self
    }

    fn with_profile(self, result: Result<User, ApiError>) -> Self {
        self.script.lock().unwrap().profile = Some(result);
        self
    }

    fn with_refresh(self, result: Result<String, ApiError>) -> Self {
        self.script.lock().unwrap().refresh = Some(result);
        self
    }

    fn held(self) -> (Self, oneshot::Sender<()>) {
        let (tx, rx) = oneshot::channel();
        self.script.lock().unwrap().gate = Some(rx);
        (self, tx)
    }

    async fn wait_for_gate(&self) {
        let gate = self.script.lock().unwrap().gate.take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
    }
}

fn unscripted<T>() -> Result<T, ApiError> {
    Err(ApiError::Network("unscripted".into()))
}

#[async_trait::async_trait(?Send)]
impl AuthApi for ScriptedApi {
    async fn obtain_token(&self, _username: &str, _password: &str) -> Result<TokenPair, ApiError> {
        self.script.lock().unwrap().token.clone().unwrap_or_else(unscripted)
    }

    async fn refresh_access(&self, _refresh: &str) -> Result<String, ApiError> {
        self.wait_for_gate().await;
        self.script.lock().unwrap().refresh.clone().unwrap_or_else(unscripted)
    }

    async fn fetch_profile(&self, _access: &str) -> Result<User, ApiError> {
        self.wait_for_gate().await;
        self.script.lock().unwrap().profile.clone().unwrap_or_else(unscripted)
    }
}

#[derive(Clone, Default)]
struct RecordingNavigator {
    visits: Arc<Mutex<Vec<String>>>,
}

impl RecordingNavigator {
    fn visits(&self) -> Vec<String> {
        self.visits.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn hard_navigate(&self, path: &str) {
        self.visits.lock().unwrap().push(path.to_owned());
    }
}

type TestClient = AuthClient<ScriptedApi, MemoryStorage, RecordingNavigator>;

fn test_client(api: ScriptedApi) -> (TestClient, MemoryStorage, RecordingNavigator) {
    let medium = MemoryStorage::new();
    let nav = RecordingNavigator::default();
    (AuthClient::new(api, medium.clone(), nav.clone()), medium, nav)
}

fn staff() -> User {
    User {
        id: 1,
        username: "admin".to_owned(),
        email: "admin@vanya.org".to_owned(),
        first_name: "Site".to_owned(),
        last_name: "Admin".to_owned(),
        is_admin: true,
    }
}

fn tokens(access: &str, refresh: &str) -> TokenPair {
    TokenPair { access: access.to_owned(), refresh: refresh.to_owned() }
}

// =============================================================================
// Provider lookup
// =============================================================================

#[test]
fn try_use_auth_outside_provider_is_provider_missing() {
    assert!(matches!(try_use_auth(), Err(AuthError::ProviderMissing)));
}

#[test]
#[should_panic(expected = "outside <AuthProvider>")]
fn use_auth_outside_provider_panics() {
    let _ = use_auth();
}

#[test]
fn provided_context_starts_booting() {
    let owner = Owner::new();
    owner.with(|| {
        provide_context(AuthContext::new());
        let auth = try_use_auth().unwrap();
        assert!(auth.loading());
        assert!(!auth.is_authenticated());
        assert!(auth.user().is_none());
    });
}

// =============================================================================
// Off-browser web client
// =============================================================================

#[test]
fn logout_settles_signed_out_and_is_idempotent() {
    let owner = Owner::new();
    owner.with(|| {
        let auth = AuthContext::new();
        auth.logout();
        let once = auth.state.get_untracked();
        auth.logout();
        assert_eq!(auth.state.get_untracked(), once);
        assert_eq!(once, AuthState::signed_out());
        assert!(auth.access_token().is_none());
    });
}

#[test]
fn check_auth_status_off_browser_settles_loading() {
    let owner = Owner::new();
    owner.with(|| {
        let auth = AuthContext::new();
        block_on(auth.check_auth_status());
        assert!(!auth.loading());
        assert!(!auth.is_authenticated());
    });
}

#[test]
fn refresh_without_tokens_tears_down_session() {
    let owner = Owner::new();
    owner.with(|| {
        let auth = AuthContext::new();
        assert_eq!(block_on(auth.refresh_token()), None);
        assert_eq!(auth.state.get_untracked(), AuthState::signed_out());
    });
}

// =============================================================================
// Injected client
// =============================================================================

#[test]
fn login_settles_signed_in_and_persists() {
    let api = ScriptedApi::default().with_token(Ok(tokens("a", "r"))).with_profile(Ok(staff()));
    let (client, medium, nav) = test_client(api);
    let owner = Owner::new();
    owner.with(|| {
        let auth = AuthContext::with_client(client);
        block_on(auth.login("admin".into(), "pw".into())).unwrap();

        assert!(auth.is_authenticated());
        assert!(!auth.loading());
        assert_eq!(auth.access_token().as_deref(), Some("a"));
        assert_eq!(auth.user().map(|u| u.username).as_deref(), Some("admin"));
    });
    assert_eq!(medium.get(ACCESS_KEY).as_deref(), Some("a"));
    assert_eq!(medium.get(USER_TYPE_KEY).as_deref(), Some("admin"));
    assert!(nav.visits().is_empty());
}

#[test]
fn failed_login_leaves_state_untouched() {
    let api = ScriptedApi::default().with_token(Err(ApiError::Rejected { status: 401 }));
    let (client, medium, _) = test_client(api);
    let owner = Owner::new();
    owner.with(|| {
        let auth = AuthContext::with_client(client);
        let before = auth.state.get_untracked();

        let err = block_on(auth.login("admin".into(), "wrong".into())).unwrap_err();
        assert_eq!(err, AuthError::InvalidCredentials);
        assert_eq!(auth.state.get_untracked(), before);
    });
    assert!(medium.is_empty());
}

#[test]
fn check_auth_status_with_stored_token_restores_session() {
    let (client, medium, _) = test_client(ScriptedApi::default().with_profile(Ok(staff())));
    medium.set(ACCESS_KEY, "a");
    medium.set(REFRESH_KEY, "r");
    let owner = Owner::new();
    owner.with(|| {
        let auth = AuthContext::with_client(client);
        block_on(auth.check_auth_status());

        assert!(!auth.loading());
        assert!(auth.is_authenticated());
        assert!(auth.state.with_untracked(AuthState::is_admin));
    });
}

#[test]
fn refresh_adopts_new_token_and_keeps_user() {
    let api = ScriptedApi::default()
        .with_token(Ok(tokens("a", "r")))
        .with_profile(Ok(staff()))
        .with_refresh(Ok("a2".into()));
    let (client, medium, _) = test_client(api);
    let owner = Owner::new();
    owner.with(|| {
        let auth = AuthContext::with_client(client);
        block_on(auth.login("admin".into(), "pw".into())).unwrap();

        assert_eq!(block_on(auth.refresh_token()).as_deref(), Some("a2"));
        assert_eq!(auth.access_token().as_deref(), Some("a2"));
        assert_eq!(auth.user(), Some(staff()));
    });
    assert_eq!(medium.get(ACCESS_KEY).as_deref(), Some("a2"));
}

#[test]
fn data_call_server_error_keeps_session() {
    let api = ScriptedApi::default().with_token(Ok(tokens("a", "r"))).with_profile(Ok(staff()));
    let (client, medium, nav) = test_client(api);
    let owner = Owner::new();
    owner.with(|| {
        let auth = AuthContext::with_client(client);
        block_on(auth.login("admin".into(), "pw".into())).unwrap();

        let err = block_on(auth.authorized(|_token| async { Err::<(), _>(ApiError::Rejected { status: 500 }) }))
            .unwrap_err();

        assert_eq!(err, AuthError::Backend { status: 500 });
        assert!(auth.is_authenticated());
        assert_eq!(auth.access_token().as_deref(), Some("a"));
    });
    assert_eq!(medium.get(ACCESS_KEY).as_deref(), Some("a"));
    assert!(nav.visits().is_empty());
}

#[test]
fn data_call_unauthorized_after_refresh_logs_out_everywhere() {
    let api = ScriptedApi::default()
        .with_token(Ok(tokens("a", "r")))
        .with_profile(Ok(staff()))
        .with_refresh(Ok("fresh".into()));
    let (client, medium, nav) = test_client(api);
    let owner = Owner::new();
    owner.with(|| {
        let auth = AuthContext::with_client(client);
        block_on(auth.login("admin".into(), "pw".into())).unwrap();

        let err = block_on(auth.authorized(|_token| async { Err::<(), _>(ApiError::Rejected { status: 401 }) }))
            .unwrap_err();

        assert_eq!(err, AuthError::SessionExpired);
        assert_eq!(auth.state.get_untracked(), AuthState::signed_out());
    });
    assert!(medium.is_empty());
    assert_eq!(nav.visits(), vec![LOGIN_PATH.to_owned()]);
}

// =============================================================================
// Provider disposal
// =============================================================================

#[test]
fn calls_after_disposal_are_ignored() {
    let (client, medium, nav) = test_client(ScriptedApi::default().with_profile(Ok(staff())));
    medium.set(ACCESS_KEY, "a");
    medium.set(REFRESH_KEY, "r");
    let owner = Owner::new();
    let auth = owner.with(|| AuthContext::with_client(client));
    drop(owner);

    block_on(auth.check_auth_status());
    assert_eq!(block_on(auth.refresh_token()), None);
    auth.logout();

    assert!(auth.state.try_get_untracked().is_none());
    assert_eq!(medium.get(ACCESS_KEY).as_deref(), Some("a"));
    assert_eq!(medium.get(REFRESH_KEY).as_deref(), Some("r"));
    assert!(nav.visits().is_empty());
}

#[test]
fn status_check_finishing_after_disposal_is_discarded() {
    let (api, release) = ScriptedApi::default().with_profile(Ok(staff())).held();
    let (client, medium, nav) = test_client(api);
    medium.set(ACCESS_KEY, "a");
    let owner = Owner::new();
    let auth = owner.with(|| AuthContext::with_client(client));

    block_on(async move {
        let unmount = async move {
            drop(owner);
            let _ = release.send(());
        };
        futures::join!(auth.check_auth_status(), unmount);
    });

    assert!(auth.state.try_get_untracked().is_none());
    assert_eq!(medium.get(ACCESS_KEY).as_deref(), Some("a"));
    assert!(nav.visits().is_empty());
}

#[test]
fn refresh_finishing_after_disposal_is_discarded() {
    let (api, release) = ScriptedApi::default().with_refresh(Ok("a2".into())).held();
    let (client, medium, _) = test_client(api);
    client.store().save(&tokens("a", "r"));
    let owner = Owner::new();
    let auth = owner.with(|| AuthContext::with_client(client));

    let refreshed = block_on(async move {
        let unmount = async move {
            drop(owner);
            let _ = release.send(());
        };
        futures::join!(auth.refresh_token(), unmount).0
    });

    assert_eq!(refreshed.as_deref(), Some("a2"));
    assert!(auth.state.try_get_untracked().is_none());
    assert_eq!(medium.get(ACCESS_KEY).as_deref(), Some("a2"));
}
