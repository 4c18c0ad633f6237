//! One probe session: authenticate once, then drive the run
//!
//! The token is fetched before the target is built, so an authentication
//! failure aborts the session without a single probe request.

use crate::auth::{SessionToken, TokenSource};
use crate::config::RunConfig;
use crate::error::AuthError;
use crate::metrics::RunResult;
use crate::probe::ProbeTarget;
use crate::runner::ProbeRunner;

/// Authenticate with `source`, build the target from the token, run it
pub async fn run_session<A, T, F>(
    source: &A,
    config: &RunConfig,
    make_target: F,
) -> Result<RunResult, AuthError>
where
    A: TokenSource + ?Sized,
    T: ProbeTarget + 'static,
    F: FnOnce(&SessionToken) -> T,
{
    let token = source.fetch_token().await?;
    println!("Retrieved Token: {}", token);

    let target = make_target(&token);

    tracing::info!(
        url = target.url(),
        total_requests = config.total_requests,
        concurrency = config.concurrency,
        policy = ?config.rate_limit_policy,
        "Starting rate limit check"
    );
    println!(
        "Starting rate limit check at {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );

    let runner = ProbeRunner::new(target, config.clone());
    let result = runner.run().await;

    tracing::info!(
        attempted = result.tally.attempted,
        completed = result.tally.completed,
        failed = result.tally.failed,
        non_2xx = result.tally.non_2xx,
        elapsed_ms = result.elapsed.as_millis() as u64,
        "Run finished"
    );

    Ok(result)
}
