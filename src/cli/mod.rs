//! CLI argument parsing and command handling

use crate::auth::{Credentials, VendorAuthenticator};
use crate::config::{RateLimitPolicy, RunConfig, DEFAULT_RESPONSE_BYTES, DEFAULT_TOTAL_REQUESTS};
use crate::metrics::RunSummary;
use crate::probe::HttpTarget;
use crate::report;
use crate::session::run_session;
use anyhow::{Context, Result};
use clap::Parser;
use reqwest::Client;
use std::time::Duration;

/// Rate Limit Probe - find the point where a vendor API starts answering 429
#[derive(Parser, Debug)]
#[command(name = "rate-limit-probe")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Client ID used for the vendor token exchange
    #[arg(long, env = "CLIENT_ID", hide_env_values = true)]
    pub client_id: String,

    /// Secret used for the vendor token exchange
    #[arg(long, env = "SECRET", hide_env_values = true)]
    pub secret: String,

    /// Base URL for the API
    #[arg(short, long, env = "PROBE_BASE_URL", default_value = "https://api.frontegg.com")]
    pub base_url: String,

    /// Endpoint path to probe
    #[arg(short, long, env = "PROBE_ENDPOINT", default_value = "/identity/resources/roles/v2")]
    pub endpoint: String,

    /// Number of requests to send
    #[arg(short, long, default_value_t = DEFAULT_TOTAL_REQUESTS)]
    pub num_requests: usize,

    /// Concurrency level (1 = strictly sequential)
    #[arg(short, long, default_value = "1")]
    pub concurrency: usize,

    /// Hide per-request status lines and show a progress bar instead
    #[arg(short, long)]
    pub quiet: bool,

    /// Keep going after a 429 instead of stopping the run
    #[arg(long)]
    pub continue_on_rate_limit: bool,

    /// Assumed response size in bytes, used for the transfer-rate estimate
    #[arg(long, default_value_t = DEFAULT_RESPONSE_BYTES)]
    pub assumed_response_bytes: u64,

    /// Per-request timeout in seconds (client default when unset)
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}

impl Cli {
    /// Build the run configuration from CLI arguments
    pub fn run_config(&self) -> RunConfig {
        let policy = if self.continue_on_rate_limit {
            RateLimitPolicy::Continue
        } else {
            RateLimitPolicy::StopOnFirst
        };

        let mut config = RunConfig::new(self.num_requests)
            .with_concurrency(self.concurrency)
            .with_endpoint(self.endpoint.clone())
            .with_print_status(!self.quiet)
            .with_rate_limit_policy(policy)
            .with_assumed_response_bytes(self.assumed_response_bytes);

        if let Some(secs) = self.timeout_secs {
            config = config.with_request_timeout(Duration::from_secs(secs));
        }

        config
    }

    /// Run the probe based on CLI arguments
    pub async fn run(&self) -> Result<()> {
        let config = self.run_config();
        config.validate().context("Invalid run configuration")?;

        let credentials = Credentials::new(self.client_id.clone(), self.secret.clone())
            .context("Credentials are required (set CLIENT_ID and SECRET)")?;

        tracing::info!(
            base_url = %self.base_url,
            endpoint = %config.endpoint,
            client_id = credentials.client_id(),
            "Authenticating"
        );

        let client = Client::builder()
            .build()
            .context("Failed to build HTTP client")?;

        let authenticator =
            VendorAuthenticator::new(client.clone(), self.base_url.clone(), credentials);

        let timeout = config.request_timeout;
        let base_url = self.base_url.clone();
        let endpoint = config.endpoint.clone();

        let result = run_session(&authenticator, &config, move |token| {
            HttpTarget::new(client, &base_url, &endpoint, token).with_timeout(timeout)
        })
        .await
        .with_context(|| format!("Failed to authenticate against {}", self.base_url))?;

        let summary = RunSummary::from_result(&result, config.assumed_response_bytes);
        report::print(&summary);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["rate-limit-probe", "--client-id", "id", "--secret", "s"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&[]);
        assert_eq!(cli.base_url, "https://api.frontegg.com");
        assert_eq!(cli.endpoint, "/identity/resources/roles/v2");
        assert_eq!(cli.num_requests, 1010);
        assert_eq!(cli.concurrency, 1);
        assert!(!cli.quiet);
        assert!(!cli.continue_on_rate_limit);

        let config = cli.run_config();
        assert_eq!(config.rate_limit_policy, RateLimitPolicy::StopOnFirst);
        assert!(config.print_status);
        assert_eq!(config.assumed_response_bytes, 799);
        assert!(config.request_timeout.is_none());
    }

    #[test]
    fn test_flags_map_to_config() {
        let cli = parse(&[
            "-n",
            "25",
            "-c",
            "3",
            "--quiet",
            "--continue-on-rate-limit",
            "--endpoint",
            "/identity/resources/users/v3",
            "--timeout-secs",
            "7",
        ]);
        let config = cli.run_config();

        assert_eq!(config.total_requests, 25);
        assert_eq!(config.concurrency, 3);
        assert!(!config.print_status);
        assert_eq!(config.rate_limit_policy, RateLimitPolicy::Continue);
        assert_eq!(config.endpoint, "/identity/resources/users/v3");
        assert_eq!(config.request_timeout, Some(Duration::from_secs(7)));
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
