//! Route guards gating protected views on session readiness and role.
//!
//! DESIGN
//! ======
//! The decision logic is a small state machine (`Loading` -> `Authorized` |
//! `Unauthorized`) kept free of any rendering concerns. Navigation is emitted
//! as a `GuardCommand` on entry into `Unauthorized` and executed by the
//! component through the router, at most once per mount.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use super::context::use_auth;
use super::navigate::LOGIN_PATH;
use crate::state::auth::AuthState;

/// Preconditions a guarded view requires.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GuardConfig {
    pub require_auth: bool,
    pub require_admin: bool,
    /// Target for a failed `require_auth` check.
    pub redirect_to: String,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self { require_auth: false, require_admin: false, redirect_to: LOGIN_PATH.to_owned() }
    }
}

impl GuardConfig {
    /// Both checks enabled, redirecting to the login entry point.
    #[must_use]
    pub fn admin() -> Self {
        Self { require_auth: true, require_admin: true, ..Self::default() }
    }

    /// Phase implied by the current session.
    #[must_use]
    pub fn evaluate(&self, state: &AuthState) -> GuardPhase {
        if state.is_loading() {
            return GuardPhase::Loading;
        }
        if self.require_auth && !state.is_authenticated() {
            return GuardPhase::Unauthorized { redirect_to: self.redirect_to.clone() };
        }
        if self.require_admin && !state.is_admin() {
            return GuardPhase::Unauthorized { redirect_to: LOGIN_PATH.to_owned() };
        }
        GuardPhase::Authorized
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardPhase {
    Loading,
    Authorized,
    Unauthorized { redirect_to: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardCommand {
    Redirect(String),
}

/// Tracks the phase across re-renders so the redirect fires only once.
#[derive(Clone, Debug)]
pub struct GuardMachine {
    config: GuardConfig,
    phase: GuardPhase,
    redirected: bool,
}

impl GuardMachine {
    #[must_use]
    pub fn new(config: GuardConfig) -> Self {
        Self { config, phase: GuardPhase::Loading, redirected: false }
    }

    #[must_use]
    pub fn phase(&self) -> &GuardPhase {
        &self.phase
    }

    /// Feed the latest session; returns a command on the first failing settle.
    pub fn observe(&mut self, state: &AuthState) -> Option<GuardCommand> {
        self.phase = self.config.evaluate(state);
        match &self.phase {
            GuardPhase::Unauthorized { redirect_to } if !self.redirected => {
                self.redirected = true;
                Some(GuardCommand::Redirect(redirect_to.clone()))
            }
            _ => None,
        }
    }
}

/// Gate `children` behind session preconditions.
///
/// Shows a loading placeholder until the session settles, then renders the
/// children or nothing while redirecting.
#[component]
pub fn AuthGuard(
    children: ChildrenFn,
    #[prop(optional)] require_auth: bool,
    #[prop(optional)] require_admin: bool,
    #[prop(optional, into)] redirect_to: Option<String>,
) -> impl IntoView {
    let config = GuardConfig {
        require_auth,
        require_admin,
        redirect_to: redirect_to.unwrap_or_else(|| LOGIN_PATH.to_owned()),
    };
    guarded_view(config, children)
}

/// `AuthGuard` preconfigured for staff-only views.
#[component]
pub fn AdminAuthGuard(children: ChildrenFn) -> impl IntoView {
    guarded_view(GuardConfig::admin(), children)
}

fn guarded_view(config: GuardConfig, children: ChildrenFn) -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();
    let mut machine = GuardMachine::new(config.clone());

    Effect::new(move || {
        let state = auth.state.get();
        if let Some(GuardCommand::Redirect(path)) = machine.observe(&state) {
            log::debug!("guard redirecting to {path}");
            navigate(&path, NavigateOptions::default());
        }
    });

    move || match config.evaluate(&auth.state.get()) {
        GuardPhase::Loading => view! {
            <div class="guard-loading">
                <div class="guard-loading__spinner"></div>
                <p>"Loading..."</p>
            </div>
        }
        .into_any(),
        GuardPhase::Authorized => children().into_any(),
        GuardPhase::Unauthorized { .. } => ().into_any(),
    }
}
