//! Run counters and summary statistics

use crate::probe::{Control, ProbeOutcome};
use std::time::Duration;

/// Counters for one run (or one worker's share of it)
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunTally {
    /// Slots attempted
    pub attempted: usize,

    /// Requests answered with any status, except a 429 that halted the run
    pub completed: usize,

    /// Requests that produced no status (connection error, timeout)
    pub failed: usize,

    /// Requests answered with any status other than 200, 429 included
    pub non_2xx: usize,

    /// Requests answered with 429
    pub rate_limited: usize,
}

impl RunTally {
    /// Create new empty counters
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one outcome together with the loop signal it produced.
    ///
    /// Every received status counts as completed; a rejection also counts as
    /// non-2xx. The one exception is the response that halts the run, which
    /// is counted as non-2xx only.
    pub fn record(&mut self, outcome: &ProbeOutcome, control: Control) {
        self.attempted += 1;
        match outcome {
            ProbeOutcome::Success => self.completed += 1,
            ProbeOutcome::Rejected { .. } => {
                self.non_2xx += 1;
                if outcome.is_rate_limited() {
                    self.rate_limited += 1;
                }
                if control == Control::Continue {
                    self.completed += 1;
                }
            }
            ProbeOutcome::TransportFailure(_) => self.failed += 1,
        }
    }

    /// Merge counters from another worker
    pub fn merge(&mut self, other: &RunTally) {
        self.attempted += other.attempted;
        self.completed += other.completed;
        self.failed += other.failed;
        self.non_2xx += other.non_2xx;
        self.rate_limited += other.rate_limited;
    }
}

/// Everything the driver knows once the loop has exited
#[derive(Debug, Clone)]
pub struct RunResult {
    /// Final counters
    pub tally: RunTally,

    /// Wall-clock time spent in the request loop
    pub elapsed: Duration,

    /// Configured number of slots
    pub total_requests: usize,

    /// Slot id of the 429 that halted the run, if one did
    pub halted_at: Option<usize>,
}

/// Derived throughput figures, ab-style
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// Elapsed seconds
    pub elapsed_secs: f64,
    /// Requests that received a status
    pub completed: usize,
    /// Transport failures
    pub failed: usize,
    /// Non-200 responses
    pub non_2xx: usize,
    /// 429 responses
    pub rate_limited: usize,
    /// Slots attempted
    pub attempted: usize,
    /// Configured slot count
    pub total_requests: usize,
    /// Slot that triggered a halt
    pub halted_at: Option<usize>,
    /// completed / elapsed
    pub requests_per_second: f64,
    /// elapsed / completed, in ms
    pub time_per_request_ms: f64,
    /// elapsed / configured total, in ms
    pub time_per_request_all_ms: f64,
    /// completed × assumed bytes / 1024 / elapsed
    pub transfer_rate_kbps: f64,
}

impl RunSummary {
    /// Compute the summary; every ratio falls back to 0 on a zero divisor
    pub fn from_result(result: &RunResult, assumed_response_bytes: u64) -> Self {
        let secs = result.elapsed.as_secs_f64();
        let completed = result.tally.completed;

        let requests_per_second = ratio(completed as f64, secs);
        let time_per_request_ms = ratio(secs * 1000.0, completed as f64);
        let time_per_request_all_ms = ratio(secs * 1000.0, result.total_requests as f64);
        let transfer_rate_kbps = ratio(
            completed as f64 * assumed_response_bytes as f64 / 1024.0,
            secs,
        );

        Self {
            elapsed_secs: secs,
            completed,
            failed: result.tally.failed,
            non_2xx: result.tally.non_2xx,
            rate_limited: result.tally.rate_limited,
            attempted: result.tally.attempted,
            total_requests: result.total_requests,
            halted_at: result.halted_at,
            requests_per_second,
            time_per_request_ms,
            time_per_request_all_ms,
            transfer_rate_kbps,
        }
    }
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}
