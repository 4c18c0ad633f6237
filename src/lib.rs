//! Rate Limit Probe - find where a vendor API starts rate limiting
//!
//! The probe authenticates once against a vendor API, then issues up to N
//! GET requests against a single endpoint and reports how many succeeded,
//! failed, or were rejected before the service answered 429.
//!
//! # Architecture
//!
//! - **Auth**: vendor token exchange behind the `TokenSource` trait
//! - **Probe**: the endpoint under test and per-request classification
//! - **Runner**: sequential or pooled request driver
//! - **Metrics**: run counters and derived throughput figures
//! - **Report**: the summary block printed at the end
//! - **Session**: ties authentication and the driver together
//!
//! # Example
//!
//! ```rust,no_run
//! use rate_limit_probe::auth::{Credentials, VendorAuthenticator};
//! use rate_limit_probe::config::RunConfig;
//! use rate_limit_probe::probe::HttpTarget;
//! use rate_limit_probe::session::run_session;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = reqwest::Client::new();
//!     let base_url = "https://api.frontegg.com";
//!     let auth = VendorAuthenticator::new(
//!         client.clone(),
//!         base_url,
//!         Credentials::new("client-id", "secret")?,
//!     );
//!     let config = RunConfig::new(100);
//!
//!     let result = run_session(&auth, &config, |token| {
//!         HttpTarget::new(client, base_url, "/identity/resources/roles/v2", token)
//!     })
//!     .await?;
//!
//!     println!("completed: {}", result.tally.completed);
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod metrics;
pub mod probe;
pub mod report;
pub mod runner;
pub mod session;

// Re-export commonly used types
pub use auth::{Credentials, SessionToken, TokenSource, VendorAuthenticator};
pub use config::{RateLimitPolicy, RunConfig};
pub use error::{AuthError, ConfigError, TransportError};
pub use metrics::{RunResult, RunSummary, RunTally};
pub use probe::{Control, HttpTarget, ProbeOutcome, ProbeTarget};
pub use runner::ProbeRunner;
pub use session::run_session;
