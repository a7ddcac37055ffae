//! Crawl statistics display
//!
//! This module renders a [`CrawlReport`] as a short human-readable summary.

use crate::crawler::CrawlReport;
use std::fmt::Write;

/// Formats the report summary
pub fn format_report(report: &CrawlReport) -> String {
    let mut out = String::new();

    // Writing to a String cannot fail
    let _ = writeln!(out, "=== Quote-Scout Crawl Summary ===");
    let _ = writeln!(
        out,
        "Started:  {}",
        report.started_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    let _ = writeln!(out, "Duration: {}s", report.duration_seconds());
    let _ = writeln!(
        out,
        "Pages:    {}/{} completed",
        report.pages_completed, report.pages_requested
    );

    if !report.pages_failed.is_empty() {
        let failed: Vec<String> = report.pages_failed.iter().map(|p| p.to_string()).collect();
        let _ = writeln!(out, "Skipped:  page(s) {}", failed.join(", "));
    }

    let _ = writeln!(out, "Quotes:   {}", report.records.len());
    let _ = writeln!(out, "Without author details: {}", report.details_failed);

    if report.partial {
        let _ = writeln!(out, "Status:   PARTIAL (cancelled)");
    } else {
        let _ = writeln!(out, "Status:   complete");
    }

    out
}

/// Prints the report summary to stdout
pub fn print_report(report: &CrawlReport) {
    print!("{}", format_report(report));
}
