//! Login page for staff and registered supporters.
//!
//! Mounted at `/login` and at the bare admin entry `/admin`. Credential
//! errors are shown inline; network errors get a generic retry message.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::auth::use_auth;
use crate::state::auth::AuthState;

pub const ADMIN_LANDING_PATH: &str = "/admin/dashboard";
pub const USER_LANDING_PATH: &str = "/";

fn validate_login_input(username: &str, password: &str) -> Result<(String, String), &'static str> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err("Enter both username and password.");
    }
    Ok((username.to_owned(), password.to_owned()))
}

fn landing_path(is_admin: bool) -> &'static str {
    if is_admin { ADMIN_LANDING_PATH } else { USER_LANDING_PATH }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();
    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let (user, pass) = match validate_login_input(&username.get(), &password.get()) {
            Ok(input) => input,
            Err(msg) => {
                error.set(msg.to_owned());
                return;
            }
        };
        busy.set(true);
        error.set(String::new());

        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            match auth.login(user, pass).await {
                Ok(()) => {
                    let target = landing_path(auth.state.with_untracked(AuthState::is_admin));
                    navigate(target, NavigateOptions { replace: true, ..NavigateOptions::default() });
                }
                Err(e) => {
                    log::warn!("login failed: {e}");
                    let _ = error.try_set(e.user_message().to_owned());
                    let _ = busy.try_set(false);
                }
            }
        });
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Vanya Foundation"</h1>
                <p class="login-card__subtitle">"Sign in"</p>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="text"
                        autocomplete="username"
                        placeholder="Username or email"
                        prop:value=move || username.get()
                        on:input=move |ev| username.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        autocomplete="current-password"
                        placeholder="Password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Signing in..." } else { "Sign in" }}
                    </button>
                </form>
                <Show when=move || !error.get().is_empty()>
                    <p class="login-message login-message--error">{move || error.get()}</p>
                </Show>
            </div>
        </div>
    }
}
