//! HTTP probe target

use super::ProbeTarget;
use crate::auth::SessionToken;
use crate::error::TransportError;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// GET target authorised with the session bearer token
#[derive(Debug, Clone)]
pub struct HttpTarget {
    client: Client,
    url: String,
    authorization: String,
    timeout: Option<Duration>,
}

impl HttpTarget {
    /// Create a target for `{base_url}{endpoint}`
    pub fn new(client: Client, base_url: &str, endpoint: &str, token: &SessionToken) -> Self {
        Self {
            client,
            url: format!("{}{}", base_url.trim_end_matches('/'), endpoint),
            authorization: token.bearer(),
            timeout: None,
        }
    }

    /// Apply a per-request timeout
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl ProbeTarget for HttpTarget {
    async fn send(&self) -> Result<u16, TransportError> {
        let mut request = self
            .client
            .get(&self.url)
            .header("Authorization", &self.authorization);

        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        Ok(response.status().as_u16())
    }

    fn url(&self) -> &str {
        &self.url
    }
}
