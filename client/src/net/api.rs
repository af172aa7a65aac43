//! Auth gateway and product listing over the browser `fetch` API.
//!
//! Client-side (csr): real HTTP calls via `gloo-net`.
//! Native builds: stubs returning `GatewayError::Network` since these
//! endpoints are only reachable from the browser.
//!
//! ERROR HANDLING
//! ==============
//! Each request races a `gloo-timers` timeout. `fetch` has no deadline of its
//! own, so a stalled backend surfaces as `GatewayError::Timeout` and the
//! session manager resolves the admin check to "not admin" instead of
//! leaving the UI pending.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

#[cfg(any(test, feature = "csr"))]
use std::time::Duration;

use session::config::{DEFAULT_ADMIN_VERIFY_PATH, DEFAULT_API_URL, DEFAULT_LOGIN_PATH, DEFAULT_REGISTER_PATH};
use session::{AuthGateway, Credentials, GatewayConfig, GatewayError, LoginResponse, Registration};

use crate::net::types::Product;

/// Public product listing, relative to the backend origin.
pub const PRODUCTS_PATH: &str = "/api/Snowball";

/// Gateway config baked in at build time from `STOREFRONT_*` variables.
pub fn gateway_config() -> GatewayConfig {
    build_config(
        option_env!("STOREFRONT_API_URL"),
        [
            option_env!("STOREFRONT_LOGIN_PATH"),
            option_env!("STOREFRONT_REGISTER_PATH"),
            option_env!("STOREFRONT_ADMIN_VERIFY_PATH"),
        ],
        option_env!("STOREFRONT_TIMEOUT_SECS"),
    )
}

fn build_config(base_url: Option<&str>, paths: [Option<&str>; 3], timeout_secs: Option<&str>) -> GatewayConfig {
    let [login, register, admin_verify] = paths;
    GatewayConfig::new(base_url.unwrap_or(DEFAULT_API_URL))
        .with_paths(
            login.unwrap_or(DEFAULT_LOGIN_PATH).to_owned(),
            register.unwrap_or(DEFAULT_REGISTER_PATH).to_owned(),
            admin_verify.unwrap_or(DEFAULT_ADMIN_VERIFY_PATH).to_owned(),
        )
        .with_timeout_secs(timeout_secs.and_then(|v| v.trim().parse().ok()).unwrap_or(0))
}

#[cfg(any(test, feature = "csr"))]
fn bearer_header(token: &str) -> String {
    format!("Bearer {token}")
}

#[cfg(any(test, feature = "csr"))]
fn timeout_millis(timeout: Duration) -> u32 {
    u32::try_from(timeout.as_millis()).unwrap_or(u32::MAX)
}

#[cfg(any(test, feature = "csr"))]
fn decode_login(body: &str) -> Result<LoginResponse, GatewayError> {
    serde_json::from_str(body).map_err(|e| GatewayError::Decode(e.to_string()))
}

#[cfg(any(test, feature = "csr"))]
fn decode_products(body: &str) -> Result<Vec<Product>, GatewayError> {
    serde_json::from_str(body).map_err(|e| GatewayError::Decode(e.to_string()))
}

#[cfg(not(feature = "csr"))]
fn not_in_browser() -> GatewayError {
    GatewayError::Network("not available outside the browser".to_owned())
}

/// [`AuthGateway`] for the browser.
#[derive(Debug, Clone)]
pub struct FetchGateway {
    config: GatewayConfig,
}

impl FetchGateway {
    pub fn new(config: GatewayConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    pub fn products_url(&self) -> String {
        format!("{}{PRODUCTS_PATH}", self.config.base_url)
    }

    /// Fetch the public product catalog. No token is sent.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError`] when the request fails, times out, answers
    /// with a non-2xx status, or returns a body that is not a product list.
    pub async fn list_products(&self) -> Result<Vec<Product>, GatewayError> {
        #[cfg(feature = "csr")]
        {
            let request = gloo_net::http::Request::get(&self.products_url())
                .header("Accept", "application/json")
                .build();
            let resp = self.send(request).await?;
            let status = resp.status();
            let body = resp.text().await.map_err(|e| GatewayError::Decode(e.to_string()))?;
            if !resp.ok() {
                return Err(GatewayError::Status { status, body });
            }
            decode_products(&body)
        }
        #[cfg(not(feature = "csr"))]
        {
            Err(not_in_browser())
        }
    }
}

#[cfg(feature = "csr")]
impl FetchGateway {
    async fn send(
        &self,
        request: Result<gloo_net::http::Request, gloo_net::Error>,
    ) -> Result<gloo_net::http::Response, GatewayError> {
        use futures::future::{Either, select};

        let request = request.map_err(|e| GatewayError::Network(e.to_string()))?;
        let response = request.send();
        let deadline = gloo_timers::future::TimeoutFuture::new(timeout_millis(self.config.request_timeout()));
        futures::pin_mut!(response, deadline);
        match select(response, deadline).await {
            Either::Left((result, _)) => result.map_err(|e| GatewayError::Network(e.to_string())),
            Either::Right(((), _)) => Err(GatewayError::Timeout),
        }
    }

    async fn post_json<T: serde::Serialize + ?Sized>(
        &self,
        url: &str,
        body: &T,
    ) -> Result<gloo_net::http::Response, GatewayError> {
        let request = gloo_net::http::Request::post(url).header("Accept", "application/json").json(body);
        let resp = self.send(request).await?;
        if !resp.ok() {
            let body = resp.text().await.unwrap_or_default();
            return Err(GatewayError::Status { status: resp.status(), body });
        }
        Ok(resp)
    }
}

#[async_trait::async_trait(?Send)]
impl AuthGateway for FetchGateway {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, GatewayError> {
        #[cfg(feature = "csr")]
        {
            let resp = self.post_json(&self.config.login_url(), credentials).await?;
            let body = resp.text().await.map_err(|e| GatewayError::Decode(e.to_string()))?;
            decode_login(&body)
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = credentials;
            Err(not_in_browser())
        }
    }

    async fn register(&self, registration: &Registration) -> Result<(), GatewayError> {
        #[cfg(feature = "csr")]
        {
            self.post_json(&self.config.register_url(), registration).await?;
            Ok(())
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = registration;
            Err(not_in_browser())
        }
    }

    async fn verify_admin(&self, token: &str) -> Result<u16, GatewayError> {
        #[cfg(feature = "csr")]
        {
            let request = gloo_net::http::Request::post(&self.config.admin_verify_url())
                .header("Authorization", &bearer_header(token))
                .header("Content-Type", "application/json")
                .build();
            let resp = self.send(request).await?;
            Ok(resp.status())
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = token;
            Err(not_in_browser())
        }
    }
}
