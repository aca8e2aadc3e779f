//! Backend relay for the public site's forms.
//!
//! DESIGN
//! ======
//! Form posts from the site land on this server, get reshaped into the
//! backend's models, and are forwarded to the backend REST API. The relay
//! returns the backend's JSON body untouched; route handlers decide how to
//! wrap it.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const CONTACT_PATH: &str = "/api/contact/";
pub const VOLUNTEERS_PATH: &str = "/api/volunteers/";
pub const NEWSLETTER_PATH: &str = "/api/newsletter/";
pub const PAYMENTS_CREATE_PATH: &str = "/api/payments/create/";

/// Status given to every new volunteer application.
pub const PENDING_STATUS: &str = "Pending";

#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("backend request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("backend returned {status}: {body}")]
    Backend { status: u16, body: String },
    #[error("backend response was not JSON: {0}")]
    Decode(String),
}

// =============================================================================
// PAYLOADS
// =============================================================================

/// Contact form fields. Missing fields are forwarded as absent; the backend
/// owns validation.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct ContactForm {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Either a list of selected areas or a single free-text value.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Areas {
    List(Vec<String>),
    One(String),
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VolunteerForm {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub areas: Option<Areas>,
    #[serde(default)]
    pub area: Option<String>,
}

/// Volunteer record in the shape the backend stores.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct VolunteerRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub area: String,
    pub status: &'static str,
}

impl VolunteerForm {
    #[must_use]
    pub fn into_record(self) -> VolunteerRecord {
        let joined = format!(
            "{} {}",
            self.first_name.as_deref().unwrap_or_default(),
            self.last_name.as_deref().unwrap_or_default()
        );
        let joined = joined.trim();
        let name = if joined.is_empty() { self.name } else { Some(joined.to_owned()) };

        let area = match self.areas {
            Some(Areas::List(list)) => list.join(", "),
            Some(Areas::One(one)) if !one.is_empty() => one,
            _ => self.area.unwrap_or_default(),
        };

        VolunteerRecord { name, email: self.email, phone: self.phone, area, status: PENDING_STATUS }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub amount: Value,
    #[serde(default)]
    pub payment_method: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
struct BackendPayment<'a> {
    amount: &'a Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    payment_method: Option<&'a str>,
}

// =============================================================================
// RELAY
// =============================================================================

/// HTTP client bound to the backend base URL.
#[derive(Clone)]
pub struct BackendRelay {
    http: reqwest::Client,
    base_url: String,
}

impl BackendRelay {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, RelayError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http, base_url: base_url.trim_end_matches('/').to_owned() })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// # Errors
    ///
    /// See [`RelayError`].
    pub async fn contact(&self, form: &ContactForm) -> Result<Value, RelayError> {
        self.post(CONTACT_PATH, form).await
    }

    /// # Errors
    ///
    /// See [`RelayError`].
    pub async fn volunteer(&self, form: VolunteerForm) -> Result<Value, RelayError> {
        self.post(VOLUNTEERS_PATH, &form.into_record()).await
    }

    /// Newsletter signups are forwarded as-is.
    ///
    /// # Errors
    ///
    /// See [`RelayError`].
    pub async fn newsletter(&self, body: &Value) -> Result<Value, RelayError> {
        self.post(NEWSLETTER_PATH, body).await
    }

    /// # Errors
    ///
    /// See [`RelayError`].
    pub async fn create_payment(&self, request: &PaymentRequest) -> Result<Value, RelayError> {
        let body = BackendPayment { amount: &request.amount, payment_method: request.payment_method.as_deref() };
        self.post(PAYMENTS_CREATE_PATH, &body).await
    }

    async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value, RelayError> {
        let url = format!("{}{path}", self.base_url);
        let response = self.http.post(&url).json(body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RelayError::Backend { status: status.as_u16(), body });
        }

        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| RelayError::Decode(e.to_string()))
    }
}

#[cfg(test)]
#[path = "relay_test.rs"]
mod tests;
