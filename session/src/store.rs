//! Two-key persistence of the current session.
//!
//! DESIGN
//! ======
//! The token and the user record live under independent keys so a browser
//! tab can read the token without decoding JSON. Both keys are written and
//! cleared together; any state where only one is usable is corrupt and is
//! wiped on the next `load`.
//!
//! ERROR HANDLING
//! ==============
//! `load` never returns errors. Backend failures and corrupt records are
//! logged and reported as "no session". Only corrupt or partial state is
//! cleared; a read that failed outright leaves storage untouched.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use tracing::warn;

use crate::error::StorageError;
use crate::record::{Session, UserRecord};
use crate::storage::KeyValueStorage;

/// Key holding the raw bearer token.
pub const TOKEN_KEY: &str = "authToken";
/// Key holding the JSON-encoded [`UserRecord`].
pub const USER_KEY: &str = "userData";

/// Persistence adapter for the session record.
#[derive(Debug)]
pub struct SessionStore<S> {
    storage: S,
}

impl<S: KeyValueStorage> SessionStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// The underlying backend.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Write both keys for `session`.
    pub fn save(&self, session: &Session) {
        let encoded = match session.user().encode() {
            Ok(encoded) => encoded,
            Err(e) => {
                warn!(error = %e, "failed to encode user record; session not persisted");
                return;
            }
        };
        if let Err(e) = self.storage.set(TOKEN_KEY, session.token()) {
            warn!(error = %e, key = TOKEN_KEY, "failed to persist session");
        }
        if let Err(e) = self.storage.set(USER_KEY, &encoded) {
            warn!(error = %e, key = USER_KEY, "failed to persist session");
        }
    }

    /// Read the persisted session, normalizing partial or corrupt state to `None`.
    pub fn load(&self) -> Option<Session> {
        self.try_load().unwrap_or_else(|e| {
            warn!(error = %e, "failed to read persisted session");
            None
        })
    }

    /// Like [`Self::load`], but a backend that cannot be read is reported
    /// instead of looking like "no session". Nothing is cleared in that case.
    ///
    /// # Errors
    ///
    /// Returns the [`StorageError`] of a failed read, except
    /// [`StorageError::Encoding`]: an undecodable backing document is corrupt
    /// state and is cleared like any other.
    pub fn try_load(&self) -> Result<Option<Session>, StorageError> {
        let (raw_token, raw_user) = match (self.storage.get(TOKEN_KEY), self.storage.get(USER_KEY)) {
            (Ok(token), Ok(user)) => (token, user),
            (Err(StorageError::Encoding(e)), _) | (_, Err(StorageError::Encoding(e))) => {
                warn!(error = %e, "discarding unreadable persisted session");
                self.clear();
                return Ok(None);
            }
            (Err(e), _) | (_, Err(e)) => return Err(e),
        };
        if raw_token.is_none() && raw_user.is_none() {
            return Ok(None);
        }

        let token = raw_token.filter(|t| !t.is_empty());
        let (Some(token), Some(raw_user)) = (token, raw_user) else {
            warn!("discarding partial persisted session");
            self.clear();
            return Ok(None);
        };

        match UserRecord::decode(&raw_user) {
            Ok(user) => Ok(Some(Session::new(user, token))),
            Err(e) => {
                warn!(error = %e, "discarding corrupt persisted session");
                self.clear();
                Ok(None)
            }
        }
    }

    /// The persisted token alone, if any.
    pub fn token(&self) -> Option<String> {
        self.read(TOKEN_KEY).filter(|t| !t.is_empty())
    }

    /// Remove both keys. Safe to call repeatedly.
    pub fn clear(&self) {
        for key in [TOKEN_KEY, USER_KEY] {
            if let Err(e) = self.storage.remove(key) {
                warn!(error = %e, key, "failed to clear persisted session");
            }
        }
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.storage.get(key) {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, key, "failed to read persisted session");
                None
            }
        }
    }
}
