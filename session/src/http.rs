//! Native HTTP gateway backed by `reqwest`.
//!
//! ERROR HANDLING
//! ==============
//! Every request carries the configured timeout. A timed-out request is
//! reported as `GatewayError::Timeout` so the manager can treat it like any
//! other failed admin check.

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::Serialize;

use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::gateway::{AuthGateway, Credentials, LoginResponse, Registration};

/// [`AuthGateway`] over HTTPS/JSON.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: reqwest::Client,
    config: GatewayConfig,
}

impl HttpGateway {
    /// Build a gateway with a client that enforces `config`'s timeout.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Network`] if the TLS backend cannot initialize.
    pub fn new(config: GatewayConfig) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .connect_timeout(config.request_timeout())
            .build()
            .map_err(|e| GatewayError::Network(e.to_string()))?;
        Ok(Self { client, config })
    }

    #[must_use]
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    async fn post_json<T: Serialize + ?Sized>(&self, url: &str, body: &T) -> Result<reqwest::Response, GatewayError> {
        let resp = self
            .client
            .post(url)
            .header(ACCEPT, "application/json")
            .json(body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(GatewayError::Status { status: status.as_u16(), body });
        }
        Ok(resp)
    }
}

#[async_trait::async_trait(?Send)]
impl AuthGateway for HttpGateway {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, GatewayError> {
        let resp = self.post_json(&self.config.login_url(), credentials).await?;
        let body = resp.text().await.map_err(transport_error)?;
        serde_json::from_str(&body).map_err(|e| GatewayError::Decode(e.to_string()))
    }

    async fn register(&self, registration: &Registration) -> Result<(), GatewayError> {
        self.post_json(&self.config.register_url(), registration).await?;
        Ok(())
    }

    async fn verify_admin(&self, token: &str) -> Result<u16, GatewayError> {
        let resp = self
            .client
            .post(self.config.admin_verify_url())
            .header(CONTENT_TYPE, "application/json")
            .bearer_auth(token)
            .send()
            .await
            .map_err(transport_error)?;
        Ok(resp.status().as_u16())
    }
}

fn transport_error(err: reqwest::Error) -> GatewayError {
    if err.is_timeout() {
        GatewayError::Timeout
    } else {
        GatewayError::Network(err.to_string())
    }
}
