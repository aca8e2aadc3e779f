//! Form relay routes: `/api/contact`, `/api/volunteer`, `/api/newsletter`,
//! `/api/payments/create`.
//!
//! Failures are logged with detail and answered with a fixed message so
//! backend internals never reach the browser.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};

use crate::services::relay::{ContactForm, PaymentRequest, RelayError, VolunteerForm};
use crate::state::AppState;

pub const CONTACT_FAILED: &str = "Failed to submit contact form";
pub const VOLUNTEER_FAILED: &str = "Failed to submit volunteer application";
pub const NEWSLETTER_FAILED: &str = "Failed to subscribe to newsletter";
pub const PAYMENT_FAILED: &str = "Payment initialization failed";

/// `POST /api/contact`
pub async fn contact(State(state): State<AppState>, form: Result<Json<ContactForm>, JsonRejection>) -> Response {
    let result = match form {
        Ok(Json(form)) => state.relay.contact(&form).await,
        Err(e) => return rejected("contact", &e, CONTACT_FAILED),
    };
    envelope("contact", result, CONTACT_FAILED)
}

/// `POST /api/volunteer`
pub async fn volunteer(State(state): State<AppState>, form: Result<Json<VolunteerForm>, JsonRejection>) -> Response {
    let result = match form {
        Ok(Json(form)) => state.relay.volunteer(form).await,
        Err(e) => return rejected("volunteer", &e, VOLUNTEER_FAILED),
    };
    envelope("volunteer", result, VOLUNTEER_FAILED)
}

/// `POST /api/newsletter`
pub async fn newsletter(State(state): State<AppState>, body: Result<Json<Value>, JsonRejection>) -> Response {
    let result = match body {
        Ok(Json(body)) => state.relay.newsletter(&body).await,
        Err(e) => return rejected("newsletter", &e, NEWSLETTER_FAILED),
    };
    envelope("newsletter", result, NEWSLETTER_FAILED)
}

/// `POST /api/payments/create`: returns the backend's body unwrapped.
pub async fn create_payment(
    State(state): State<AppState>,
    request: Result<Json<PaymentRequest>, JsonRejection>,
) -> Response {
    let Ok(Json(request)) = request else {
        return (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": PAYMENT_FAILED }))).into_response();
    };
    match state.relay.create_payment(&request).await {
        Ok(data) => Json(data).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "payment relay failed");
            (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": PAYMENT_FAILED }))).into_response()
        }
    }
}

fn envelope(form: &'static str, result: Result<Value, RelayError>, message: &'static str) -> Response {
    match result {
        Ok(data) => Json(json!({ "success": true, "data": data })).into_response(),
        Err(e) => {
            tracing::error!(form, error = %e, "form relay failed");
            failure(message)
        }
    }
}

fn rejected(form: &'static str, e: &JsonRejection, message: &'static str) -> Response {
    tracing::warn!(form, error = %e, "malformed form body");
    failure(message)
}

fn failure(message: &'static str) -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "success": false, "error": message }))).into_response()
}

#[cfg(test)]
#[path = "relay_test.rs"]
mod tests;
