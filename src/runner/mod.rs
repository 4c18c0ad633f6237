//! Request driver
//!
//! The runner fires up to `total_requests` GETs at one target and records
//! every slot exactly once. It has two modes:
//! - **Sequential** (`concurrency == 1`): one request in flight at a time;
//!   a 429 under `RateLimitPolicy::StopOnFirst` halts the loop immediately.
//! - **Pool** (`concurrency > 1`): a fixed set of tokio workers claim slots
//!   from a shared atomic counter and keep local tallies that are merged
//!   once every worker has joined. A 429 raises a stop flag so no new slot
//!   is claimed, but requests already in flight still complete.

mod progress;

pub use progress::{milestone_line, status_line, ProgressReporter, MILESTONE_INTERVAL};

use crate::config::{RateLimitPolicy, RunConfig};
use crate::metrics::{RunResult, RunTally};
use crate::probe::{Control, ProbeOutcome, ProbeTarget};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Runner for executing a probe run
pub struct ProbeRunner<T: ProbeTarget> {
    target: Arc<T>,
    config: RunConfig,
}

impl<T: ProbeTarget + 'static> ProbeRunner<T> {
    /// Create a new probe runner
    pub fn new(target: T, config: RunConfig) -> Self {
        Self {
            target: Arc::new(target),
            config,
        }
    }

    /// Run in the mode selected by `config.concurrency`
    pub async fn run(&self) -> RunResult {
        if self.config.concurrency > 1 {
            self.run_concurrent(self.config.concurrency).await
        } else {
            self.run_sequential().await
        }
    }

    /// Run strictly one request at a time
    pub async fn run_sequential(&self) -> RunResult {
        let progress = self.progress();
        let mut tally = RunTally::new();
        let mut halted_at = None;
        let start = Instant::now();

        for slot in 1..=self.config.total_requests {
            let (outcome, control) = probe_once(
                self.target.as_ref(),
                slot,
                self.config.rate_limit_policy,
                &progress,
            )
            .await;
            tally.record(&outcome, control);

            if control == Control::Stop {
                tracing::warn!(slot, "Rate limit hit, stopping run");
                halted_at = Some(slot);
                break;
            }
        }

        let elapsed = start.elapsed();
        progress.finish();

        RunResult {
            tally,
            elapsed,
            total_requests: self.config.total_requests,
            halted_at,
        }
    }

    /// Run with a fixed pool of `concurrency` workers
    pub async fn run_concurrent(&self, concurrency: usize) -> RunResult {
        let progress = self.progress();
        let total = self.config.total_requests;
        let policy = self.config.rate_limit_policy;
        let next_slot = Arc::new(AtomicUsize::new(0));
        let stop = Arc::new(AtomicBool::new(false));
        // usize::MAX means no halt; the lowest halting slot wins
        let halted_at = Arc::new(AtomicUsize::new(usize::MAX));
        let start = Instant::now();

        let mut tasks = Vec::with_capacity(concurrency);
        for worker_id in 0..concurrency.max(1) {
            let target = self.target.clone();
            let progress = progress.clone();
            let next_slot = next_slot.clone();
            let stop = stop.clone();
            let halted_at = halted_at.clone();

            tasks.push(tokio::spawn(async move {
                let mut tally = RunTally::new();
                tracing::debug!(worker_id, "Worker started");

                while !stop.load(Ordering::SeqCst) {
                    let slot = next_slot.fetch_add(1, Ordering::SeqCst) + 1;
                    if slot > total {
                        break;
                    }

                    let (outcome, control) =
                        probe_once(target.as_ref(), slot, policy, &progress).await;
                    tally.record(&outcome, control);

                    if control == Control::Stop {
                        stop.store(true, Ordering::SeqCst);
                        halted_at.fetch_min(slot, Ordering::SeqCst);
                        tracing::warn!(worker_id, slot, "Rate limit hit, stopping workers");
                        break;
                    }
                }

                tracing::debug!(
                    worker_id,
                    attempted = tally.attempted,
                    completed = tally.completed,
                    "Worker finished"
                );
                tally
            }));
        }

        let mut tally = RunTally::new();
        for joined in futures::future::join_all(tasks).await {
            match joined {
                Ok(worker_tally) => tally.merge(&worker_tally),
                Err(e) => tracing::error!(error = %e, "Worker task failed"),
            }
        }

        let elapsed = start.elapsed();
        progress.finish();

        let halted_at = match halted_at.load(Ordering::SeqCst) {
            usize::MAX => None,
            slot => Some(slot),
        };

        RunResult {
            tally,
            elapsed,
            total_requests: total,
            halted_at,
        }
    }

    fn progress(&self) -> ProgressReporter {
        ProgressReporter::new(
            self.target.url(),
            self.config.total_requests,
            self.config.id_width(),
            self.config.print_status,
        )
    }
}

/// Attempt one slot: send, classify, report. Never retries.
async fn probe_once<T: ProbeTarget + ?Sized>(
    target: &T,
    slot: usize,
    policy: RateLimitPolicy,
    progress: &ProgressReporter,
) -> (ProbeOutcome, Control) {
    let outcome = ProbeOutcome::from_result(target.send().await);
    if let ProbeOutcome::TransportFailure(e) = &outcome {
        tracing::warn!(slot, error = %e, "Request failed");
    }
    let control = outcome.control(policy);
    progress.request(slot, &outcome, control);
    (outcome, control)
}
