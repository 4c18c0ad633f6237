//! Vendor authentication
//!
//! The probe authenticates exactly once, before any request is driven.
//! A `TokenSource` hands back an opaque bearer token that every probe
//! request reuses unmodified; it is never refreshed.

use crate::error::{AuthError, ConfigError};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Path of the vendor token exchange, relative to the base URL
pub const VENDOR_AUTH_PATH: &str = "/auth/vendor/";

/// Client id + secret pair used for the vendor exchange
#[derive(Clone)]
pub struct Credentials {
    client_id: String,
    secret: String,
}

impl Credentials {
    /// Build credentials, rejecting empty values before any request is made
    pub fn new(client_id: impl Into<String>, secret: impl Into<String>) -> Result<Self, ConfigError> {
        let client_id = client_id.into();
        let secret = secret.into();

        if client_id.trim().is_empty() {
            return Err(ConfigError::MissingCredential("CLIENT_ID"));
        }
        if secret.trim().is_empty() {
            return Err(ConfigError::MissingCredential("SECRET"));
        }

        Ok(Self { client_id, secret })
    }

    /// The client identifier
    pub fn client_id(&self) -> &str {
        &self.client_id
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Opaque bearer token valid for the rest of the run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    /// Wrap a raw token string
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value for the `Authorization` header
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Anything that can produce a session token once per run
#[async_trait]
pub trait TokenSource: Send + Sync {
    /// Perform the exchange and return the token
    async fn fetch_token(&self) -> Result<SessionToken, AuthError>;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VendorAuthRequest<'a> {
    client_id: &'a str,
    secret: &'a str,
}

#[derive(Deserialize)]
struct VendorAuthResponse {
    #[serde(default)]
    token: Option<String>,
}

/// Exchanges vendor credentials for a bearer token over HTTP
#[derive(Debug, Clone)]
pub struct VendorAuthenticator {
    client: Client,
    base_url: String,
    credentials: Credentials,
}

impl VendorAuthenticator {
    /// Create a new authenticator against `base_url`
    pub fn new(client: Client, base_url: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            credentials,
        }
    }

    /// Full URL of the token exchange
    fn auth_url(&self) -> String {
        format!("{}{}", self.base_url, VENDOR_AUTH_PATH)
    }
}

#[async_trait]
impl TokenSource for VendorAuthenticator {
    async fn fetch_token(&self) -> Result<SessionToken, AuthError> {
        let body = VendorAuthRequest {
            client_id: &self.credentials.client_id,
            secret: &self.credentials.secret,
        };

        tracing::debug!(url = %self.auth_url(), client_id = %self.credentials.client_id, "Requesting vendor token");

        let response = self
            .client
            .post(self.auth_url())
            .header("accept", "application/json")
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: VendorAuthResponse = response.json().await?;
        match parsed.token {
            Some(token) if !token.is_empty() => Ok(SessionToken::new(token)),
            _ => Err(AuthError::MissingToken),
        }
    }
}
