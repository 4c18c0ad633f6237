//! Operator-facing progress output

use crate::probe::{Control, ProbeOutcome, SUCCESS_STATUS};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Completed-request interval between milestone lines
pub const MILESTONE_INTERVAL: usize = 100;

/// Prints per-request status lines and milestones, or drives a progress bar
/// when status lines are switched off.
///
/// Cheap to clone; workers share the completed counter used for milestones.
#[derive(Clone)]
pub struct ProgressReporter {
    url: String,
    id_width: usize,
    print_status: bool,
    bar: Option<ProgressBar>,
    completed: Arc<AtomicUsize>,
}

impl ProgressReporter {
    /// Create a reporter for a run of `total` slots
    pub fn new(url: &str, total: usize, id_width: usize, print_status: bool) -> Self {
        let bar = if print_status {
            None
        } else {
            let pb = ProgressBar::new(total as u64);
            let style = ProgressStyle::with_template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");
            pb.set_style(style);
            Some(pb)
        };

        Self {
            url: url.to_string(),
            id_width,
            print_status,
            bar,
            completed: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Report the outcome of slot `slot`
    ///
    /// Any received status counts towards milestones, except the one that
    /// halts the run.
    pub fn request(&self, slot: usize, outcome: &ProbeOutcome, control: Control) {
        if self.print_status {
            println!("{}", status_line(slot, self.id_width, &self.url, outcome));
        }
        if let Some(pb) = &self.bar {
            pb.inc(1);
        }

        let completed = !matches!(outcome, ProbeOutcome::TransportFailure(_))
            && control == Control::Continue;
        if completed {
            let done = self.completed.fetch_add(1, Ordering::SeqCst) + 1;
            if done % MILESTONE_INTERVAL == 0 {
                self.emit(&milestone_line(done));
            }
        }
    }

    /// Print a line without tearing the progress bar
    pub fn emit(&self, line: &str) {
        match &self.bar {
            Some(pb) => pb.println(line),
            None => println!("{}", line),
        }
    }

    /// Finish the progress bar, if any
    pub fn finish(&self) {
        if let Some(pb) = &self.bar {
            pb.finish_with_message("done");
        }
    }
}

/// `Request #0007: {url} - Status Code: 200`
pub fn status_line(slot: usize, width: usize, url: &str, outcome: &ProbeOutcome) -> String {
    match outcome {
        ProbeOutcome::Success => format!(
            "Request #{:0width$}: {} - Status Code: {}",
            slot,
            url,
            SUCCESS_STATUS,
            width = width
        ),
        ProbeOutcome::Rejected { status } => format!(
            "Request #{:0width$}: {} - Status Code: {}",
            slot,
            url,
            status,
            width = width
        ),
        ProbeOutcome::TransportFailure(e) => format!(
            "Request #{:0width$}: {} - Failed with exception: {}",
            slot,
            url,
            e,
            width = width
        ),
    }
}

/// `Completed 100 requests`
pub fn milestone_line(completed: usize) -> String {
    format!("Completed {} requests", completed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;

    #[test]
    fn test_status_line_padding() {
        let line = status_line(7, 4, "https://x/roles", &ProbeOutcome::Success);
        assert_eq!(line, "Request #0007: https://x/roles - Status Code: 200");
    }

    #[test]
    fn test_status_line_rejected() {
        let line = status_line(12, 2, "https://x/roles", &ProbeOutcome::from_status(429));
        assert_eq!(line, "Request #12: https://x/roles - Status Code: 429");
    }

    #[test]
    fn test_status_line_transport_failure() {
        let outcome = ProbeOutcome::TransportFailure(TransportError::Connection("reset".into()));
        let line = status_line(3, 3, "https://x/roles", &outcome);
        assert_eq!(
            line,
            "Request #003: https://x/roles - Failed with exception: connection error: reset"
        );
    }

    #[test]
    fn test_milestone_counts_received_responses() {
        let reporter = ProgressReporter::new("https://x/roles", 300, 3, false);
        for slot in 1..=150 {
            reporter.request(slot, &ProbeOutcome::Success, Control::Continue);
        }
        reporter.request(151, &ProbeOutcome::from_status(401), Control::Continue);
        reporter.request(
            152,
            &ProbeOutcome::TransportFailure(TransportError::Connection("reset".into())),
            Control::Continue,
        );
        reporter.request(153, &ProbeOutcome::from_status(429), Control::Stop);
        assert_eq!(reporter.completed.load(Ordering::SeqCst), 151);
        reporter.finish();
    }

    #[test]
    fn test_milestone_line() {
        assert_eq!(milestone_line(200), "Completed 200 requests");
    }
}
