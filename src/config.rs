//! Run configuration types

use crate::error::ConfigError;
use std::time::Duration;

/// Default number of probe requests
pub const DEFAULT_TOTAL_REQUESTS: usize = 1010;

/// Default assumed response payload size used for the transfer-rate figure
pub const DEFAULT_RESPONSE_BYTES: u64 = 799;

/// What the driver does when the endpoint answers 429
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RateLimitPolicy {
    /// Halt the run on the first 429; no further slot is attempted
    #[default]
    StopOnFirst,
    /// Count the 429 as a non-2xx response and keep going
    Continue,
}

/// Run configuration
///
/// Defines how a probe run is executed: how many slots, how many workers,
/// which endpoint, and what to do once the endpoint starts rate limiting.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Total number of request slots
    pub total_requests: usize,

    /// Number of concurrent workers (1 = strictly sequential)
    pub concurrency: usize,

    /// Endpoint path appended to the base URL, e.g. `/identity/resources/roles/v2`
    pub endpoint: String,

    /// Print one status line per request
    pub print_status: bool,

    /// Behaviour on HTTP 429
    pub rate_limit_policy: RateLimitPolicy,

    /// Assumed size of every response body, in bytes
    pub assumed_response_bytes: u64,

    /// Per-request timeout; `None` leaves the HTTP client default in place
    pub request_timeout: Option<Duration>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            total_requests: DEFAULT_TOTAL_REQUESTS,
            concurrency: 1,
            endpoint: "/identity/resources/roles/v2".to_string(),
            print_status: true,
            rate_limit_policy: RateLimitPolicy::default(),
            assumed_response_bytes: DEFAULT_RESPONSE_BYTES,
            request_timeout: None,
        }
    }
}

impl RunConfig {
    /// Create a new config with the given request count
    pub fn new(total_requests: usize) -> Self {
        Self {
            total_requests,
            ..Default::default()
        }
    }

    /// Set the worker count
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Set the endpoint path
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Toggle per-request status lines
    pub fn with_print_status(mut self, print_status: bool) -> Self {
        self.print_status = print_status;
        self
    }

    /// Set the 429 policy
    pub fn with_rate_limit_policy(mut self, policy: RateLimitPolicy) -> Self {
        self.rate_limit_policy = policy;
        self
    }

    /// Set the assumed response size
    pub fn with_assumed_response_bytes(mut self, bytes: u64) -> Self {
        self.assumed_response_bytes = bytes;
        self
    }

    /// Set a per-request timeout
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Width used to zero-pad request ids: the digit count of the total
    pub fn id_width(&self) -> usize {
        self.total_requests.to_string().len()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.total_requests == 0 {
            return Err(ConfigError::InvalidRequestCount(
                "request count must be at least 1".into(),
            ));
        }

        if self.concurrency == 0 {
            return Err(ConfigError::InvalidConcurrency(
                "concurrency must be at least 1".into(),
            ));
        }

        if !self.endpoint.starts_with('/') {
            return Err(ConfigError::InvalidEndpoint(format!(
                "endpoint must start with '/': {}",
                self.endpoint
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RunConfig::default();
        assert_eq!(config.total_requests, 1010);
        assert_eq!(config.concurrency, 1);
        assert_eq!(config.rate_limit_policy, RateLimitPolicy::StopOnFirst);
        assert_eq!(config.assumed_response_bytes, 799);
        assert!(config.print_status);
        assert!(config.request_timeout.is_none());
    }

    #[test]
    fn test_config_builder_pattern() {
        let config = RunConfig::new(50)
            .with_concurrency(4)
            .with_endpoint("/identity/resources/users/v3")
            .with_print_status(false)
            .with_rate_limit_policy(RateLimitPolicy::Continue)
            .with_request_timeout(Duration::from_secs(5));

        assert_eq!(config.total_requests, 50);
        assert_eq!(config.concurrency, 4);
        assert_eq!(config.endpoint, "/identity/resources/users/v3");
        assert!(!config.print_status);
        assert_eq!(config.rate_limit_policy, RateLimitPolicy::Continue);
        assert_eq!(config.request_timeout, Some(Duration::from_secs(5)));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_zero_requests() {
        assert!(matches!(
            RunConfig::new(0).validate(),
            Err(ConfigError::InvalidRequestCount(_))
        ));
    }

    #[test]
    fn test_config_validation_zero_concurrency() {
        let config = RunConfig::new(10).with_concurrency(0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidConcurrency(_))
        ));
    }

    #[test]
    fn test_config_validation_relative_endpoint() {
        let config = RunConfig::new(10).with_endpoint("roles");
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidEndpoint(_))
        ));
    }

    #[test]
    fn test_id_width() {
        assert_eq!(RunConfig::new(5).id_width(), 1);
        assert_eq!(RunConfig::new(100).id_width(), 3);
        assert_eq!(RunConfig::new(1010).id_width(), 4);
        assert_eq!(RunConfig::new(25000).id_width(), 5);
    }
}
