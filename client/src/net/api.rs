//! REST API access to the backend service.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR) and native tests: every call fails with a network error
//! since these endpoints are only meaningful from the browser.
//!
//! ERROR HANDLING
//! ==============
//! Callers get `ApiError` values instead of panics. The auth layer decides
//! which failures mean "bad credentials", "expired session" or "retry later".

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use async_trait::async_trait;

use super::types::{Donation, TokenPair, User, Volunteer};

/// Backend base URL used when `VANYA_API_URL` is not set at build time.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

pub const TOKEN_PATH: &str = "/api/token/";
pub const TOKEN_REFRESH_PATH: &str = "/api/token/refresh/";
pub const PROFILE_PATH: &str = "/api/auth/profile/";
pub const DONATIONS_PATH: &str = "/api/donations/";
pub const VOLUNTEERS_PATH: &str = "/api/volunteers/";

/// Backend base URL baked in at compile time, without a trailing slash.
#[must_use]
pub fn api_base_url() -> &'static str {
    option_env!("VANYA_API_URL")
        .unwrap_or(DEFAULT_API_URL)
        .trim_end_matches('/')
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The backend answered with a non-2xx status.
    #[error("request rejected: status {status}")]
    Rejected { status: u16 },
    /// The request never produced a response.
    #[error("network failure: {0}")]
    Network(String),
    /// The response body did not match the expected shape.
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Rejected { status: 401 })
    }
}

/// Credential exchange and profile lookup.
#[async_trait(?Send)]
pub trait AuthApi {
    /// `POST /api/token/` with `{username, password}`.
    async fn obtain_token(&self, username: &str, password: &str) -> Result<TokenPair, ApiError>;

    /// `POST /api/token/refresh/` with `{refresh}`; returns the new access token.
    async fn refresh_access(&self, refresh: &str) -> Result<String, ApiError>;

    /// `GET /api/auth/profile/` with a bearer token.
    async fn fetch_profile(&self, access: &str) -> Result<User, ApiError>;
}

/// Read-only admin listings.
#[async_trait(?Send)]
pub trait AdminApi {
    async fn list_donations(&self, access: &str) -> Result<Vec<Donation>, ApiError>;

    async fn list_volunteers(&self, access: &str) -> Result<Vec<Volunteer>, ApiError>;
}

/// HTTP implementation of [`AuthApi`] and [`AdminApi`].
#[derive(Clone, Debug)]
pub struct HttpApi {
    base_url: String,
}

impl HttpApi {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self { base_url }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[cfg(any(test, feature = "hydrate"))]
    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

impl Default for HttpApi {
    fn default() -> Self {
        Self::new(api_base_url())
    }
}

#[cfg(any(test, feature = "hydrate"))]
fn bearer(access: &str) -> String {
    format!("Bearer {access}")
}

#[cfg(feature = "hydrate")]
async fn decode<T: serde::de::DeserializeOwned>(resp: gloo_net::http::Response) -> Result<T, ApiError> {
    if !resp.ok() {
        return Err(ApiError::Rejected { status: resp.status() });
    }
    resp.json::<T>().await.map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(feature = "hydrate")]
impl HttpApi {
    async fn post_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        payload: &serde_json::Value,
    ) -> Result<T, ApiError> {
        let resp = gloo_net::http::Request::post(&self.endpoint(path))
            .json(payload)
            .map_err(|e| ApiError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        decode(resp).await
    }

    async fn get_authorized<T: serde::de::DeserializeOwned>(&self, path: &str, access: &str) -> Result<T, ApiError> {
        let resp = gloo_net::http::Request::get(&self.endpoint(path))
            .header("Authorization", &bearer(access))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        decode(resp).await
    }
}

#[cfg(not(feature = "hydrate"))]
fn unavailable<T>() -> Result<T, ApiError> {
    Err(ApiError::Network("not available on server".to_owned()))
}

#[async_trait(?Send)]
impl AuthApi for HttpApi {
    async fn obtain_token(&self, username: &str, password: &str) -> Result<TokenPair, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let payload = serde_json::json!({ "username": username, "password": password });
            self.post_json(TOKEN_PATH, &payload).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (username, password);
            unavailable()
        }
    }

    async fn refresh_access(&self, refresh: &str) -> Result<String, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let payload = serde_json::json!({ "refresh": refresh });
            let body: super::types::RefreshedToken = self.post_json(TOKEN_REFRESH_PATH, &payload).await?;
            Ok(body.access)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = refresh;
            unavailable()
        }
    }

    async fn fetch_profile(&self, access: &str) -> Result<User, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            self.get_authorized(PROFILE_PATH, access).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = access;
            unavailable()
        }
    }
}

#[async_trait(?Send)]
impl AdminApi for HttpApi {
    async fn list_donations(&self, access: &str) -> Result<Vec<Donation>, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            self.get_authorized(DONATIONS_PATH, access).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = access;
            unavailable()
        }
    }

    async fn list_volunteers(&self, access: &str) -> Result<Vec<Volunteer>, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            self.get_authorized(VOLUNTEERS_PATH, access).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = access;
            unavailable()
        }
    }
}
