//! Shared fixtures for unit tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::Notify;

use crate::error::{GatewayError, StorageError};
use crate::gateway::{AuthGateway, Credentials, LoginResponse, Registration};
use crate::record::UserRecord;
use crate::storage::{KeyValueStorage, MemoryStorage};

pub(crate) fn admin_user() -> UserRecord {
    UserRecord {
        email: "a@x.com".to_owned(),
        name: "A".to_owned(),
        roles: vec!["Admin".to_owned()],
        role: None,
    }
}

pub(crate) fn customer_user() -> UserRecord {
    UserRecord {
        email: "c@x.com".to_owned(),
        name: "C".to_owned(),
        roles: vec!["Customer".to_owned()],
        role: None,
    }
}

// =========================================================================
// ScriptedGateway
// =========================================================================

/// Gateway returning queued results. Empty queues fall back to a rejected
/// login, a successful registration, and a 403 admin check.
#[derive(Default)]
pub(crate) struct ScriptedGateway {
    logins: Mutex<VecDeque<Result<LoginResponse, GatewayError>>>,
    registrations: Mutex<VecDeque<Result<(), GatewayError>>>,
    verifications: Mutex<VecDeque<Result<u16, GatewayError>>>,
    verify_tokens: Mutex<Vec<String>>,
    login_calls: AtomicUsize,
    register_calls: AtomicUsize,
    gate: Mutex<Option<Arc<Notify>>>,
}

impl ScriptedGateway {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_logins(self, results: Vec<Result<LoginResponse, GatewayError>>) -> Self {
        *self.logins.lock().unwrap() = results.into();
        self
    }

    pub(crate) fn with_registrations(self, results: Vec<Result<(), GatewayError>>) -> Self {
        *self.registrations.lock().unwrap() = results.into();
        self
    }

    pub(crate) fn with_verifications(self, results: Vec<Result<u16, GatewayError>>) -> Self {
        *self.verifications.lock().unwrap() = results.into();
        self
    }

    /// Hold the next admin check until `gate` is notified.
    pub(crate) fn gated(self, gate: Arc<Notify>) -> Self {
        *self.gate.lock().unwrap() = Some(gate);
        self
    }

    pub(crate) fn verify_calls(&self) -> usize {
        self.verify_tokens.lock().unwrap().len()
    }

    pub(crate) fn verify_tokens(&self) -> Vec<String> {
        self.verify_tokens.lock().unwrap().clone()
    }

    pub(crate) fn login_calls(&self) -> usize {
        self.login_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn register_calls(&self) -> usize {
        self.register_calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait(?Send)]
impl AuthGateway for ScriptedGateway {
    async fn login(&self, _credentials: &Credentials) -> Result<LoginResponse, GatewayError> {
        self.login_calls.fetch_add(1, Ordering::SeqCst);
        self.logins.lock().unwrap().pop_front().unwrap_or_else(|| {
            Err(GatewayError::Status { status: 401, body: "Invalid email or password".to_owned() })
        })
    }

    async fn register(&self, _registration: &Registration) -> Result<(), GatewayError> {
        self.register_calls.fetch_add(1, Ordering::SeqCst);
        self.registrations.lock().unwrap().pop_front().unwrap_or(Ok(()))
    }

    async fn verify_admin(&self, token: &str) -> Result<u16, GatewayError> {
        self.verify_tokens.lock().unwrap().push(token.to_owned());
        let gate = self.gate.lock().unwrap().take();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        self.verifications.lock().unwrap().pop_front().unwrap_or(Ok(403))
    }
}

// =========================================================================
// FlakyStorage
// =========================================================================

/// Memory storage whose reads of one key fail while `failing` is set.
pub(crate) struct FlakyStorage {
    pub(crate) inner: MemoryStorage,
    key: &'static str,
    failing: AtomicBool,
}

impl FlakyStorage {
    pub(crate) fn failing_on(key: &'static str) -> Self {
        Self { inner: MemoryStorage::new(), key, failing: AtomicBool::new(false) }
    }

    pub(crate) fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

impl KeyValueStorage for FlakyStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        if key == self.key && self.failing.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("read failed".to_owned()));
        }
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.inner.remove(key)
    }
}
