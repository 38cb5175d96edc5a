//! Run summary

use crate::state::FrontierStatus;

/// What a scrape run discovered, wrote and skipped
#[derive(Debug, Clone, Default)]
pub struct ScrapeReport {
    /// Number of article URLs the frontier produced
    pub discovered: usize,
    /// Articles handed to the store
    pub written: usize,
    /// `(url, reason)` for every article that was skipped
    pub failures: Vec<(String, String)>,
    /// Final frontier status, for recursive runs
    pub frontier_status: Option<FrontierStatus>,
    /// Expansion steps run, for recursive runs
    pub expansion_steps: usize,
}

impl ScrapeReport {
    pub fn new(discovered: usize) -> Self {
        Self {
            discovered,
            ..Self::default()
        }
    }

    pub fn record_written(&mut self) {
        self.written += 1;
    }

    pub fn record_failure(&mut self, url: &str, reason: impl ToString) {
        self.failures.push((url.to_string(), reason.to_string()));
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    /// Share of discovered articles that were written, as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.discovered == 0 {
            return 0.0;
        }
        (self.written as f64 / self.discovered as f64) * 100.0
    }

    /// Describes how recursive discovery ended, or `None` for seed-page runs
    pub fn frontier_summary(&self) -> Option<String> {
        let status = self.frontier_status?;
        let outcome = if status.is_success() {
            "target reached"
        } else {
            "target not reached"
        };
        Some(format!(
            "Frontier: {} ({}) after {} expansion steps",
            status, outcome, self.expansion_steps
        ))
    }
}

/// Prints a human-readable summary of the run to stdout
pub fn print_report(report: &ScrapeReport) {
    println!("=== Scrape Summary ===\n");
    if let Some(line) = report.frontier_summary() {
        println!("{}", line);
    }
    println!("Discovered: {}", report.discovered);
    println!("Written:    {}", report.written);
    println!("Failed:     {}", report.failed());
    println!("Success:    {:.2}%", report.success_rate());

    if !report.failures.is_empty() {
        println!("\nSkipped articles:");
        for (url, reason) in &report.failures {
            println!("  - {}: {}", url, reason);
        }
    }
}
