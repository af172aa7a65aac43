//! Gateway configuration parsed from environment variables.

use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:5294";
pub const DEFAULT_LOGIN_PATH: &str = "/login";
pub const DEFAULT_REGISTER_PATH: &str = "/register";
pub const DEFAULT_ADMIN_VERIFY_PATH: &str = "/admin/verify";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 8;

/// Where the remote auth authority lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    pub base_url: String,
    pub login_path: String,
    pub register_path: String,
    pub admin_verify_path: String,
    pub request_timeout_secs: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_owned(),
            login_path: DEFAULT_LOGIN_PATH.to_owned(),
            register_path: DEFAULT_REGISTER_PATH.to_owned(),
            admin_verify_path: DEFAULT_ADMIN_VERIFY_PATH.to_owned(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl GatewayConfig {
    /// Build config from environment variables, defaulting anything unset.
    ///
    /// - `STOREFRONT_API_URL`: backend origin (default `http://localhost:5294`)
    /// - `STOREFRONT_LOGIN_PATH`: default `/login`
    /// - `STOREFRONT_REGISTER_PATH`: default `/register`
    /// - `STOREFRONT_ADMIN_VERIFY_PATH`: default `/admin/verify`
    /// - `STOREFRONT_TIMEOUT_SECS`: default 8; zero or unparsable values fall back
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self::new(std::env::var("STOREFRONT_API_URL").unwrap_or(defaults.base_url))
            .with_paths(
                std::env::var("STOREFRONT_LOGIN_PATH").unwrap_or(defaults.login_path),
                std::env::var("STOREFRONT_REGISTER_PATH").unwrap_or(defaults.register_path),
                std::env::var("STOREFRONT_ADMIN_VERIFY_PATH").unwrap_or(defaults.admin_verify_path),
            )
            .with_timeout_secs(env_parse_u64("STOREFRONT_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS))
    }

    /// Default paths against `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self { base_url, ..Self::default() }
    }

    #[must_use]
    pub fn with_paths(mut self, login: String, register: String, admin_verify: String) -> Self {
        self.login_path = normalize_path(login);
        self.register_path = normalize_path(register);
        self.admin_verify_path = normalize_path(admin_verify);
        self
    }

    #[must_use]
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = if secs == 0 { DEFAULT_REQUEST_TIMEOUT_SECS } else { secs };
        self
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    #[must_use]
    pub fn login_url(&self) -> String {
        format!("{}{}", self.base_url, self.login_path)
    }

    #[must_use]
    pub fn register_url(&self) -> String {
        format!("{}{}", self.base_url, self.register_path)
    }

    #[must_use]
    pub fn admin_verify_url(&self) -> String {
        format!("{}{}", self.base_url, self.admin_verify_path)
    }
}

fn normalize_path(path: String) -> String {
    if path.starts_with('/') { path } else { format!("/{path}") }
}

fn env_parse_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
