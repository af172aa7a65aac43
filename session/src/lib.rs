//! # session
//!
//! Client-side session and authorization core for the storefront.
//!
//! SYSTEM CONTEXT
//! ==============
//! The storefront backend issues bearer tokens and answers a single
//! admin-verification call. Everything else about "who is logged in" lives
//! here: durable `{token, user}` persistence, the login/logout state machine,
//! lazy admin resolution, and the guard applied before protected views.
//!
//! ARCHITECTURE
//! ============
//! - `storage` / `store`: string key/value backends and the two-key session record.
//! - `gateway` / `http`: the remote auth authority as an async trait, plus a
//!   native `reqwest` implementation.
//! - `manager`: the owned session state, published through a `watch` channel.
//! - `guard`: the protected-route algorithm, driven through a `GuardHost`.
//!
//! Platform specifics (browser storage, `fetch`) are supplied by the caller,
//! so the web client and the CLI run the same state machine.

pub mod config;
pub mod error;
pub mod gateway;
pub mod guard;
#[cfg(feature = "http")]
pub mod http;
pub mod manager;
pub mod record;
pub mod storage;
pub mod store;

#[cfg(test)]
mod test_helpers;

pub use config::GatewayConfig;
pub use error::{AuthError, GatewayError, RecordError, StorageError};
pub use gateway::{AdminVerdict, AuthGateway, Credentials, LoginResponse, Registration};
pub use guard::{GuardHost, GuardView, RouteGuard};
#[cfg(feature = "http")]
pub use http::HttpGateway;
pub use manager::{AdminResolution, SessionManager, SessionSnapshot, SessionState};
pub use record::{Session, UserRecord};
pub use storage::{KeyValueStorage, MemoryStorage};
pub use store::SessionStore;
