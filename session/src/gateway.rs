//! Contract with the remote auth authority.
//!
//! SYSTEM CONTEXT
//! ==============
//! The backend is an external collaborator. This module fixes the wire
//! shapes the client sends and accepts, and the trait the session manager
//! calls. The native build uses `http::HttpGateway`; the web client supplies
//! a `fetch`-based implementation; tests script responses directly.

#[cfg(test)]
#[path = "gateway_test.rs"]
mod gateway_test;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::GatewayError;
use crate::record::UserRecord;

/// Email + password login request body.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self { email: email.into(), password: password.into() }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Account registration request body.
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl Registration {
    #[must_use]
    pub fn passwords_match(&self) -> bool {
        self.password == self.confirm_password
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("name", &self.name)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Successful login response. Role claims may appear at the top level or
/// nested under `user`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub user: Option<LoginUser>,
    #[serde(default)]
    pub roles: Option<Vec<String>>,
    #[serde(default)]
    pub role: Option<String>,
}

/// The `user` object inside a [`LoginResponse`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct LoginUser {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub roles: Option<Vec<String>>,
    #[serde(default)]
    pub role: Option<String>,
}

impl LoginResponse {
    /// Build the record to persist for a login made with `email`.
    ///
    /// Top-level role claims win over nested ones; a missing name falls back
    /// to the email.
    #[must_use]
    pub fn into_user_record(self, email: &str) -> UserRecord {
        let user = self.user.unwrap_or_default();
        let name = non_empty(user.name).unwrap_or_else(|| email.to_owned());
        let roles = self.roles.or(user.roles).unwrap_or_default();
        let role = non_empty(self.role).or_else(|| non_empty(user.role));
        UserRecord { email: email.to_owned(), name, roles, role }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Meaning of an admin-verification status code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdminVerdict {
    /// 2xx.
    Granted,
    /// 401 or 403.
    Denied,
    /// Anything else; admin status cannot be confirmed.
    Unverifiable(u16),
}

impl AdminVerdict {
    #[must_use]
    pub fn from_status(status: u16) -> Self {
        match status {
            200..=299 => Self::Granted,
            401 | 403 => Self::Denied,
            other => Self::Unverifiable(other),
        }
    }

    #[must_use]
    pub fn is_admin(self) -> bool {
        matches!(self, Self::Granted)
    }
}

/// The remote auth authority.
///
/// Futures are not required to be `Send` so browser `fetch` bindings can
/// implement the trait.
#[async_trait::async_trait(?Send)]
pub trait AuthGateway {
    /// Exchange credentials for a token.
    ///
    /// # Errors
    ///
    /// Any non-2xx response is [`GatewayError::Status`]; transport failures
    /// are `Network`/`Timeout`; an unreadable body is `Decode`.
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, GatewayError>;

    /// Create an account. No token is issued.
    ///
    /// # Errors
    ///
    /// Same mapping as [`AuthGateway::login`].
    async fn register(&self, registration: &Registration) -> Result<(), GatewayError>;

    /// Call the admin-verification endpoint with `token` as bearer and
    /// return the response status. Status interpretation is left to the caller.
    ///
    /// # Errors
    ///
    /// Only transport failures (`Network`, `Timeout`) are errors.
    async fn verify_admin(&self, token: &str) -> Result<u16, GatewayError>;
}
