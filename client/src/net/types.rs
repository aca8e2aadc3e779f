//! Wire DTOs for the backend REST API.
//!
//! DESIGN
//! ======
//! Field names follow the backend's JSON exactly; renames are applied only
//! where the Rust side wants a clearer name (`is_staff` -> `is_admin`).

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// Access + refresh credentials returned by `POST /api/token/`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// Short-lived bearer credential.
    pub access: String,
    /// Long-lived credential exchangeable for a new access token.
    pub refresh: String,
}

/// Body returned by `POST /api/token/refresh/`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct RefreshedToken {
    pub access: String,
}

/// Profile of the signed-in user from `GET /api/auth/profile/`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    /// Staff flag; the only input to admin authorization.
    #[serde(rename = "is_staff", default)]
    pub is_admin: bool,
}

impl User {
    /// Full name, falling back to the username when both parts are blank.
    #[must_use]
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name, self.last_name);
        let full = full.trim();
        if full.is_empty() { self.username.clone() } else { full.to_owned() }
    }
}

/// Informational account tag persisted next to the tokens.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UserType {
    Admin,
    User,
}

impl UserType {
    #[must_use]
    pub fn for_user(user: &User) -> Self {
        if user.is_admin { Self::Admin } else { Self::User }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "admin" => Some(Self::Admin),
            "user" => Some(Self::User),
            _ => None,
        }
    }
}

/// Donation record as listed on the admin dashboard.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Donation {
    pub id: i64,
    #[serde(default)]
    pub donor: String,
    /// Decimal amount; the backend serializes it as a string.
    #[serde(deserialize_with = "deserialize_amount")]
    pub amount: String,
    #[serde(default)]
    pub purpose: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub status: String,
}

/// Volunteer application as listed on the admin dashboard.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Volunteer {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub area: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub join_date: String,
}

fn deserialize_amount<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(D::Error::custom(format!("expected decimal amount, got {other}"))),
    }
}
