//! Edge gate run ahead of page rendering.
//!
//! SYSTEM CONTEXT
//! ==============
//! The client guards decide what to render once the session has settled in
//! the browser. This gate is a coarser, stateless check applied to every page
//! request before any markup is produced. It only looks at whether a token is
//! present; validating it is the backend's job.

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

use crate::state::AppState;

pub const LOGIN_PATH: &str = "/login";
pub const ADMIN_PATH: &str = "/admin";
pub const ACCESS_COOKIE: &str = "access";
pub const HAS_VISITED_COOKIE: &str = "hasVisited";
pub const HAS_VISITED_MAX_AGE_DAYS: i64 = 30;

/// Path prefixes (after the leading `/`) the gate never evaluates.
const EXCLUDED_PREFIXES: &[&str] = &["api", "pkg", "_next/static", "_next/image", "favicon.ico", "public"];

/// The parts of a request the gate decides on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestFacts {
    pub path: String,
    pub access_cookie: Option<String>,
    pub authorization: Option<String>,
    pub has_visited: Option<String>,
}

impl RequestFacts {
    /// Collect facts from request headers and cookies.
    #[must_use]
    pub fn from_request(path: &str, headers: &axum::http::HeaderMap) -> Self {
        let jar = CookieJar::from_headers(headers);
        let cookie = |name: &str| jar.get(name).map(|c| c.value().to_owned());
        Self {
            path: path.to_owned(),
            access_cookie: cookie(ACCESS_COOKIE),
            authorization: headers
                .get(AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .map(str::to_owned),
            has_visited: cookie(HAS_VISITED_COOKIE),
        }
    }

    /// Token from the `access` cookie, falling back to the `Authorization`
    /// header with or without the `Bearer ` prefix.
    #[must_use]
    pub fn bearer_token(&self) -> Option<&str> {
        non_empty(self.access_cookie.as_deref()).or_else(|| {
            let raw = self.authorization.as_deref()?;
            non_empty(Some(raw.strip_prefix("Bearer ").unwrap_or(raw)))
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Pass,
    RedirectToLogin,
    /// Redirect to login and mark the browser as visited.
    FirstVisitRedirect,
}

/// Whether `path` is outside the gate's reach.
#[must_use]
pub fn is_excluded(path: &str) -> bool {
    let rest = path.strip_prefix('/').unwrap_or(path);
    EXCLUDED_PREFIXES.iter().any(|prefix| rest.starts_with(prefix))
}

/// Decide what to do with a page request.
#[must_use]
pub fn evaluate(facts: &RequestFacts) -> GateDecision {
    let path = facts.path.as_str();
    if is_excluded(path) {
        return GateDecision::Pass;
    }

    if path.starts_with(ADMIN_PATH) && path != ADMIN_PATH && facts.bearer_token().is_none() {
        return GateDecision::RedirectToLogin;
    }

    // Root only counts the cookie; a header alone does not skip the login wall.
    if path == "/"
        && non_empty(facts.has_visited.as_deref()).is_none()
        && non_empty(facts.access_cookie.as_deref()).is_none()
    {
        return GateDecision::FirstVisitRedirect;
    }

    GateDecision::Pass
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Axum middleware applying [`evaluate`] to every request it wraps.
pub async fn edge_gate(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let facts = RequestFacts::from_request(request.uri().path(), request.headers());
    match evaluate(&facts) {
        GateDecision::Pass => next.run(request).await,
        GateDecision::RedirectToLogin => {
            tracing::debug!(path = %facts.path, "edge gate: no token for admin route");
            Redirect::temporary(LOGIN_PATH).into_response()
        }
        GateDecision::FirstVisitRedirect => {
            tracing::debug!("edge gate: first visit to site root");
            let marker = Cookie::build((HAS_VISITED_COOKIE, "true"))
                .path("/")
                .same_site(SameSite::Lax)
                .secure(state.config.cookie_secure)
                .max_age(Duration::days(HAS_VISITED_MAX_AGE_DAYS));
            (CookieJar::new().add(marker), Redirect::temporary(LOGIN_PATH)).into_response()
        }
    }
}

#[cfg(test)]
#[path = "gate_test.rs"]
mod tests;
