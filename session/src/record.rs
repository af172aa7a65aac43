//! The session value and its persisted user record.
//!
//! DESIGN
//! ======
//! `UserRecord` is the JSON stored under the `userData` key. Decoding is the
//! only validation step: anything that does not yield a typed record with an
//! identity is reported as `RecordError` and treated as corrupt by the store.

#[cfg(test)]
#[path = "record_test.rs"]
mod record_test;

use std::collections::BTreeSet;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::RecordError;

/// Role claim that grants access to admin views.
pub const ADMIN_ROLE: &str = "Admin";

/// Cached identity of the logged-in user.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Login email.
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    /// Display name. Older records used `displayName`.
    #[serde(default, alias = "displayName", deserialize_with = "null_as_default")]
    pub name: String,
    /// Role claims returned at login.
    #[serde(default, deserialize_with = "null_as_default")]
    pub roles: Vec<String>,
    /// Singular role claim some backend responses use instead of `roles`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl UserRecord {
    /// Decode and validate a persisted record.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::Malformed`] for JSON that does not match the
    /// schema and [`RecordError::MissingIdentity`] when both email and name
    /// are blank.
    pub fn decode(raw: &str) -> Result<Self, RecordError> {
        let record: Self = serde_json::from_str(raw)?;
        if record.email.trim().is_empty() && record.name.trim().is_empty() {
            return Err(RecordError::MissingIdentity);
        }
        Ok(record)
    }

    /// Encode for persistence.
    ///
    /// # Errors
    ///
    /// Propagates `serde_json` serialization failures.
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Whether the record itself already carries the admin role.
    #[must_use]
    pub fn has_admin_claim(&self) -> bool {
        self.roles.iter().any(|r| r == ADMIN_ROLE) || self.role.as_deref() == Some(ADMIN_ROLE)
    }

    /// Name to show in navigation, falling back to the email.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() { &self.email } else { &self.name }
    }
}

/// An authenticated identity plus its bearer token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    token: String,
    user: UserRecord,
}

impl Session {
    #[must_use]
    pub fn new(user: UserRecord, token: impl Into<String>) -> Self {
        Self { token: token.into(), user }
    }

    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    #[must_use]
    pub fn user(&self) -> &UserRecord {
        &self.user
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.user.email
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        self.user.display_name()
    }

    /// All role claims, merging `roles` and the singular `role`.
    #[must_use]
    pub fn roles(&self) -> BTreeSet<&str> {
        self.user
            .roles
            .iter()
            .map(String::as_str)
            .chain(self.user.role.as_deref())
            .filter(|r| !r.is_empty())
            .collect()
    }

    #[must_use]
    pub fn has_admin_claim(&self) -> bool {
        self.user.has_admin_claim()
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
