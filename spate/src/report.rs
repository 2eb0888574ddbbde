//! Rendering of run configuration and results for the console.

use crate::run::RunReport;
use serde::Serialize;
use spate_core::{RunConfig, RunPlan};
use std::fmt;
use std::time::Duration;

const BAR_WIDTH: f64 = 40.0;
const RULE_WIDTH: usize = 64;

/// Pre-run summary of what is about to happen.
pub struct Banner<'a> {
    pub config: &'a RunConfig,
    pub plan: &'a RunPlan,
}

impl fmt::Display for Banner<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let duration = Duration::from_secs(self.config.duration_secs.max(0) as u64);
        writeln!(f, "target:      {}", self.config.url)?;
        writeln!(f, "rate:        {} rpm", self.config.rpm)?;
        writeln!(f, "duration:    {}", humantime::format_duration(duration))?;
        writeln!(f, "concurrency: {}", self.config.max_concurrent)?;
        writeln!(f, "tenants:     {}", self.config.tenants.join(", "))?;
        write!(
            f,
            "planning {} requests, one every {}",
            self.plan.total_requests,
            humantime::format_duration(self.plan.interval)
        )
    }
}

/// Full human-readable results block.
pub struct TextReport<'a>(pub &'a RunReport);

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let report = self.0;
        let stats = &report.stats;
        let total = stats.total;

        writeln!(f, "Results")?;
        writeln!(f, "-------")?;
        writeln!(f, "  total:        {total}")?;
        writeln!(
            f,
            "  successful:   {} ({:.1}%)",
            stats.successful,
            share(stats.successful, total)
        )?;
        writeln!(
            f,
            "  failed:       {} ({:.1}%)",
            stats.failed,
            share(stats.failed, total)
        )?;
        writeln!(f, "  wall time:    {:.1}s", report.elapsed.as_secs_f64())?;
        writeln!(f, "  achieved rpm: {:.0}", achieved_rpm(report))?;

        writeln!(f)?;
        writeln!(f, "Latency (successful requests)")?;
        writeln!(f, "-----------------------------")?;
        writeln!(f, "  avg: {}", millis(stats.latency.avg))?;
        writeln!(f, "  min: {}", millis(stats.latency.min))?;
        writeln!(f, "  max: {}", millis(stats.latency.max))?;
        writeln!(f, "  p50: {}", millis(stats.latency.p50))?;
        writeln!(f, "  p95: {}", millis(stats.latency.p95))?;
        writeln!(f, "  p99: {}", millis(stats.latency.p99))?;

        writeln!(f)?;
        writeln!(f, "Payload mix")?;
        writeln!(f, "-----------")?;
        writeln!(
            f,
            "  structured: {} ({:.1}%)",
            stats.structured,
            share(stats.structured, total)
        )?;
        writeln!(
            f,
            "  raw:        {} ({:.1}%)",
            stats.raw,
            share(stats.raw, total)
        )?;

        writeln!(f)?;
        writeln!(f, "Status codes")?;
        writeln!(f, "------------")?;
        for (key, count) in &stats.status_counts {
            // Display impls ignore width for nested values, so pad the
            // rendered key instead.
            writeln!(
                f,
                "  {:<8} {:>6} {}",
                format!("{key}:"),
                count,
                bar(*count, total)
            )?;
        }

        writeln!(f)?;
        writeln!(f, "Tenants")?;
        writeln!(f, "-------")?;
        for (tenant, count) in &stats.tenant_counts {
            writeln!(
                f,
                "  {:<14} {:>6} {}",
                format!("{tenant}:"),
                count,
                bar(*count, total)
            )?;
        }

        if !stats.error_counts.is_empty() {
            writeln!(f)?;
            writeln!(f, "Errors")?;
            writeln!(f, "------")?;
            for (error, count) in &stats.error_counts {
                writeln!(f, "  {error}: {count}")?;
            }
        }

        writeln!(f)?;
        writeln!(f, "{}", "=".repeat(RULE_WIDTH))?;
        match report.verdict {
            spate_core::Verdict::Passed => {
                writeln!(f, "PASSED: the endpoint absorbed the load")?
            }
            spate_core::Verdict::PartiallyPassed => {
                writeln!(f, "PARTIALLY PASSED: some requests failed")?
            }
            spate_core::Verdict::Failed => {
                writeln!(f, "FAILED: the endpoint could not keep up with the load")?
            }
        }
        write!(f, "{}", "=".repeat(RULE_WIDTH))
    }
}

/// Flat machine-readable summary, printed when `--json` is set.
#[derive(Debug, Serialize)]
pub struct JsonSummary {
    pub verdict: String,
    pub total_requests: u64,
    pub successful: u64,
    pub failed: u64,
    pub success_rate: f64,
    pub avg_response_time: f64,
    pub p95_latency: f64,
    pub p99_latency: f64,
    pub elapsed_secs: f64,
    pub actual_rpm: f64,
}

pub fn json_summary(report: &RunReport) -> JsonSummary {
    let stats = &report.stats;
    JsonSummary {
        verdict: report.verdict.to_string(),
        total_requests: stats.total,
        successful: stats.successful,
        failed: stats.failed,
        success_rate: stats.success_rate(),
        avg_response_time: stats.latency.avg.as_secs_f64(),
        p95_latency: stats.latency.p95.as_secs_f64(),
        p99_latency: stats.latency.p99.as_secs_f64(),
        elapsed_secs: report.elapsed.as_secs_f64(),
        actual_rpm: achieved_rpm(report),
    }
}

fn share(count: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}

fn achieved_rpm(report: &RunReport) -> f64 {
    let secs = report.elapsed.as_secs_f64();
    if secs > 0.0 {
        report.stats.total as f64 / secs * 60.0
    } else {
        0.0
    }
}

fn millis(latency: Duration) -> String {
    format!("{:>8.1}ms", latency.as_secs_f64() * 1000.0)
}

fn bar(count: u64, total: u64) -> String {
    if total == 0 {
        return String::new();
    }
    let width = (count as f64 / total as f64 * BAR_WIDTH) as usize;
    "█".repeat(width)
}

#[cfg(test)]
mod tests {
    use super::*;
    use spate_core::{PayloadKind, RequestOutcome, RunStatistics, Verdict};

    fn sample_report() -> RunReport {
        let mut outcomes = Vec::new();
        for i in 0..96u64 {
            outcomes.push(RequestOutcome::received(
                202,
                Duration::from_millis(100 + i),
                PayloadKind::Structured,
                "acme-corp",
            ));
        }
        for _ in 0..4 {
            outcomes.push(RequestOutcome::timeout(
                Duration::from_secs(10),
                PayloadKind::Raw,
                "globex",
            ));
        }

        let stats = RunStatistics::from_outcomes(&outcomes);
        let verdict = Verdict::assess(&stats);
        RunReport {
            plan: RunPlan::new(6_000, 1),
            outcomes,
            stats,
            verdict,
            elapsed: Duration::from_secs(2),
        }
    }

    #[test]
    fn text_report_covers_every_section() {
        let report = sample_report();
        let rendered = TextReport(&report).to_string();

        assert!(rendered.contains("total:        100"));
        assert!(rendered.contains("successful:   96 (96.0%)"));
        assert!(rendered.contains("failed:       4 (4.0%)"));
        assert!(rendered.contains("202:"));
        assert!(rendered.contains("Error:"));
        assert!(rendered.contains("acme-corp:"));
        assert!(rendered.contains("Timeout: 4"));
        assert!(rendered.contains("PASSED: the endpoint absorbed the load"));
    }

    #[test]
    fn histogram_bars_scale_to_forty_columns() {
        assert_eq!(bar(100, 100).chars().count(), 40);
        assert_eq!(bar(50, 100).chars().count(), 20);
        assert_eq!(bar(1, 100).chars().count(), 0);
        assert_eq!(bar(0, 0).chars().count(), 0);
    }

    #[test]
    fn json_summary_matches_the_stats() {
        let report = sample_report();
        let summary = json_summary(&report);

        assert_eq!(summary.verdict, "Passed");
        assert_eq!(summary.total_requests, 100);
        assert_eq!(summary.successful, 96);
        assert_eq!(summary.failed, 4);
        assert_eq!(summary.success_rate, 96.0);
        assert_eq!(summary.elapsed_secs, 2.0);
        assert_eq!(summary.actual_rpm, 3_000.0);
    }

    #[test]
    fn banner_shows_the_plan() {
        let config = RunConfig::new("http://localhost:3100/ingest");
        let plan = config.plan();
        let rendered = Banner {
            config: &config,
            plan: &plan,
        }
        .to_string();

        assert!(rendered.contains("target:      http://localhost:3100/ingest"));
        assert!(rendered.contains("rate:        2000 rpm"));
        assert!(rendered.contains("planning 2000 requests, one every 30ms"));
    }
}
