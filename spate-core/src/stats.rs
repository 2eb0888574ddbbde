use crate::{PayloadKind, RequestOutcome};
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

/// Histogram key for response statuses. The derived ordering lists real
/// codes in ascending order with the no-response sentinel after them, which
/// matches how the report lays the histogram out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StatusKey {
    Code(u16),
    NoResponse,
}

impl StatusKey {
    pub fn of(outcome: &RequestOutcome) -> Self {
        if outcome.no_response() {
            Self::NoResponse
        } else {
            Self::Code(outcome.status)
        }
    }
}

impl fmt::Display for StatusKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Code(code) => write!(f, "{code}"),
            Self::NoResponse => write!(f, "Error"),
        }
    }
}

/// Latency digest over the successful requests of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LatencySummary {
    pub avg: Duration,
    pub min: Duration,
    pub max: Duration,
    pub p50: Duration,
    pub p95: Duration,
    pub p99: Duration,
}

impl LatencySummary {
    /// Sorts the samples in place and reads the summary off the sorted run.
    pub fn of(latencies: &mut Vec<Duration>) -> Self {
        if latencies.is_empty() {
            return Self::default();
        }

        latencies.sort_unstable();
        let sum: Duration = latencies.iter().sum();
        Self {
            avg: sum / latencies.len() as u32,
            min: latencies[0],
            max: latencies[latencies.len() - 1],
            p50: percentile(latencies, 0.50),
            p95: percentile(latencies, 0.95),
            p99: percentile(latencies, 0.99),
        }
    }
}

/// Order-statistic percentile: the sample at index floor(p * n), clamped to
/// the last element. Small sample sets bias high rather than interpolate.
pub fn percentile(sorted: &[Duration], p: f64) -> Duration {
    if sorted.is_empty() {
        return Duration::ZERO;
    }
    let idx = ((sorted.len() as f64 * p).floor() as usize).min(sorted.len() - 1);
    sorted[idx]
}

/// Aggregate view of a completed run, folded from the per-request outcomes.
#[derive(Debug, Clone, Default)]
pub struct RunStatistics {
    pub total: u64,
    pub successful: u64,
    pub failed: u64,
    pub structured: u64,
    pub raw: u64,
    pub latency: LatencySummary,
    pub status_counts: BTreeMap<StatusKey, u64>,
    pub tenant_counts: BTreeMap<String, u64>,
    /// Distinct error descriptions, most frequent first.
    pub error_counts: Vec<(String, u64)>,
}

impl RunStatistics {
    pub fn from_outcomes(outcomes: &[RequestOutcome]) -> Self {
        let mut stats = Self {
            total: outcomes.len() as u64,
            ..Self::default()
        };

        let mut latencies = Vec::with_capacity(outcomes.len());
        let mut errors: BTreeMap<&str, u64> = BTreeMap::new();
        for outcome in outcomes {
            if outcome.success {
                stats.successful += 1;
                latencies.push(outcome.latency);
            } else {
                stats.failed += 1;
            }

            match outcome.kind {
                PayloadKind::Structured => stats.structured += 1,
                PayloadKind::Raw => stats.raw += 1,
            }

            *stats.status_counts.entry(StatusKey::of(outcome)).or_default() += 1;
            *stats.tenant_counts.entry(outcome.tenant.clone()).or_default() += 1;
            if let Some(error) = &outcome.error {
                *errors.entry(error).or_default() += 1;
            }
        }

        stats.latency = LatencySummary::of(&mut latencies);

        // The BTreeMap fold already ordered ties alphabetically, so the sort
        // by descending count only needs to be stable.
        let mut error_counts: Vec<_> = errors
            .into_iter()
            .map(|(error, count)| (error.to_string(), count))
            .collect();
        error_counts.sort_by_key(|(_, count)| std::cmp::Reverse(*count));
        stats.error_counts = error_counts;

        stats
    }

    /// Successful requests as a percentage of the total. Zero-request runs
    /// rate 0%.
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.successful as f64 / self.total as f64 * 100.0
        }
    }
}
