//! Probe targets and per-request classification
//!
//! Each probe request ends in exactly one `ProbeOutcome`. Classification
//! knows nothing about termination: the driver turns an outcome into a
//! `Control` signal using the configured `RateLimitPolicy`.

pub mod http;

use crate::config::RateLimitPolicy;
use crate::error::TransportError;
use async_trait::async_trait;

pub use http::HttpTarget;

/// HTTP 429 Too Many Requests
pub const RATE_LIMITED_STATUS: u16 = 429;

/// The single status counted as a success
pub const SUCCESS_STATUS: u16 = 200;

/// A fixed endpoint the driver fires requests at
#[async_trait]
pub trait ProbeTarget: Send + Sync {
    /// Issue one request and return the HTTP status.
    ///
    /// Targets without a reqwest client report dropped connections as
    /// `TransportError::Connection`.
    async fn send(&self) -> Result<u16, TransportError>;

    /// URL shown in status lines
    fn url(&self) -> &str;
}

/// Result of a single probe request
#[derive(Debug)]
pub enum ProbeOutcome {
    /// HTTP 200
    Success,
    /// Any other HTTP status, including 429
    Rejected {
        /// HTTP status code
        status: u16,
    },
    /// No status was obtained
    TransportFailure(TransportError),
}

impl ProbeOutcome {
    /// Classify a received status code
    pub fn from_status(status: u16) -> Self {
        if status == SUCCESS_STATUS {
            ProbeOutcome::Success
        } else {
            ProbeOutcome::Rejected { status }
        }
    }

    /// Classify the raw result of `ProbeTarget::send`
    pub fn from_result(result: Result<u16, TransportError>) -> Self {
        match result {
            Ok(status) => Self::from_status(status),
            Err(e) => ProbeOutcome::TransportFailure(e),
        }
    }

    /// Whether this is a 429
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, ProbeOutcome::Rejected { status } if *status == RATE_LIMITED_STATUS)
    }

    /// Decide whether the run goes on after this outcome
    pub fn control(&self, policy: RateLimitPolicy) -> Control {
        if self.is_rate_limited() && policy == RateLimitPolicy::StopOnFirst {
            Control::Stop
        } else {
            Control::Continue
        }
    }
}

/// Loop signal returned by a single probe step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Move on to the next slot
    Continue,
    /// Halt the run; no further slot is attempted
    Stop,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_200_is_success() {
        assert!(matches!(ProbeOutcome::from_status(200), ProbeOutcome::Success));
        assert!(matches!(
            ProbeOutcome::from_status(204),
            ProbeOutcome::Rejected { status: 204 }
        ));
        assert!(matches!(
            ProbeOutcome::from_status(500),
            ProbeOutcome::Rejected { status: 500 }
        ));
    }

    #[test]
    fn test_transport_error_classification() {
        let outcome =
            ProbeOutcome::from_result(Err(TransportError::Connection("reset".into())));
        assert!(matches!(outcome, ProbeOutcome::TransportFailure(_)));
        assert!(!outcome.is_rate_limited());
    }

    #[test]
    fn test_429_stops_under_default_policy() {
        let outcome = ProbeOutcome::from_status(429);
        assert!(outcome.is_rate_limited());
        assert_eq!(outcome.control(RateLimitPolicy::StopOnFirst), Control::Stop);
        assert_eq!(outcome.control(RateLimitPolicy::Continue), Control::Continue);
    }

    #[test]
    fn test_other_rejections_continue() {
        let outcome = ProbeOutcome::from_status(503);
        assert_eq!(outcome.control(RateLimitPolicy::StopOnFirst), Control::Continue);
    }
}
