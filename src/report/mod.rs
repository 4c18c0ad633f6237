//! Summary block printed at the end of a run

use crate::metrics::RunSummary;

/// Render the summary block
pub fn render(summary: &RunSummary) -> String {
    let banner = "=".repeat(70);
    let halt_line = match summary.halted_at {
        Some(slot) => format!("Stopped at request #{}: rate limit (429) reached\n", slot),
        None => String::new(),
    };

    format!(
        "\n{banner}\n   Rate Limit Check Results\n{banner}\n\n\
         Finished {attempted} of {total} requests\n\
         {halt_line}\
         Time taken for tests:   {elapsed:.3} seconds\n\
         Complete requests:      {completed}\n\
         Failed requests:        {failed}\n\
         Non-2xx responses:      {non_2xx}\n\
         Rate limited (429):     {rate_limited}\n\
         Requests per second:    {rps:.2} [#/sec]\n\
         Time per request:       {tpr:.3} [ms] (mean)\n\
         Time per request:       {tpr_all:.3} [ms] (mean, across all concurrent requests)\n\
         Transfer rate:          {kbps:.2} [Kbytes/sec] received\n\
         \n{banner}",
        banner = banner,
        attempted = summary.attempted,
        total = summary.total_requests,
        halt_line = halt_line,
        elapsed = summary.elapsed_secs,
        completed = summary.completed,
        failed = summary.failed,
        non_2xx = summary.non_2xx,
        rate_limited = summary.rate_limited,
        rps = summary.requests_per_second,
        tpr = summary.time_per_request_ms,
        tpr_all = summary.time_per_request_all_ms,
        kbps = summary.transfer_rate_kbps,
    )
}

/// Print the summary block followed by the closing line
pub fn print(summary: &RunSummary) {
    println!("{}", render(summary));
    println!();
    println!("Rate limit check completed.");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{RunResult, RunTally};
    use std::time::Duration;

    fn summary(tally: RunTally, elapsed: Duration, halted_at: Option<usize>) -> RunSummary {
        RunSummary::from_result(
            &RunResult {
                tally,
                elapsed,
                total_requests: 10,
                halted_at,
            },
            799,
        )
    }

    #[test]
    fn test_render_counts() {
        let tally = RunTally {
            attempted: 10,
            completed: 8,
            failed: 2,
            non_2xx: 1,
            rate_limited: 0,
        };
        let text = render(&summary(tally, Duration::from_secs(2), None));

        assert!(text.contains("Finished 10 of 10 requests"));
        assert!(text.contains("Time taken for tests:   2.000 seconds"));
        assert!(text.contains("Complete requests:      8"));
        assert!(text.contains("Failed requests:        2"));
        assert!(text.contains("Non-2xx responses:      1"));
        assert!(text.contains("Requests per second:    4.00 [#/sec]"));
        assert!(text.contains("Time per request:       250.000 [ms] (mean)"));
        assert!(text.contains("200.000 [ms] (mean, across all concurrent requests)"));
        assert!(!text.contains("Stopped at"));
    }

    #[test]
    fn test_render_halt_line() {
        let tally = RunTally {
            attempted: 4,
            completed: 3,
            non_2xx: 1,
            rate_limited: 1,
            ..Default::default()
        };
        let text = render(&summary(tally, Duration::from_millis(400), Some(4)));

        assert!(text.contains("Finished 4 of 10 requests"));
        assert!(text.contains("Stopped at request #4: rate limit (429) reached"));
        assert!(text.contains("Rate limited (429):     1"));
    }

    #[test]
    fn test_render_layout() {
        let text = render(&summary(RunTally::default(), Duration::ZERO, None));
        let lines: Vec<&str> = text.lines().collect();
        let banner = "=".repeat(70);

        assert_eq!(lines[0], "");
        assert_eq!(lines[1], banner);
        assert_eq!(lines[2], "   Rate Limit Check Results");
        assert_eq!(lines[3], banner);
        assert_eq!(lines[4], "");
        assert_eq!(lines[5], "Finished 0 of 10 requests");
        assert_eq!(lines[6], "Time taken for tests:   0.000 seconds");
        assert_eq!(lines[lines.len() - 2], "");
        assert_eq!(lines[lines.len() - 1], banner);
        assert_eq!(lines.len(), 17);
    }

    #[test]
    fn test_render_empty_run() {
        let text = render(&summary(RunTally::default(), Duration::ZERO, None));

        assert!(text.contains("Requests per second:    0.00 [#/sec]"));
        assert!(text.contains("Transfer rate:          0.00 [Kbytes/sec] received"));
        assert!(!text.contains("NaN"));
        assert!(!text.contains("inf"));
    }
}
