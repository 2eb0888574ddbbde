use crate::{RunStatistics, PARTIAL_SUCCESS_RATE, PASS_AVG_LATENCY, PASS_SUCCESS_RATE};
use std::fmt;

/// Overall judgement of how the target held up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Passed,
    PartiallyPassed,
    Failed,
}

impl Verdict {
    /// A pass needs both a high success rate and a tolerable average
    /// latency; the partial tier looks at the success rate alone. A run
    /// that issued no requests proves nothing and fails.
    pub fn assess(stats: &RunStatistics) -> Self {
        if stats.total == 0 {
            return Self::Failed;
        }

        let rate = stats.success_rate();
        if rate >= PASS_SUCCESS_RATE && stats.latency.avg < PASS_AVG_LATENCY {
            Self::Passed
        } else if rate >= PARTIAL_SUCCESS_RATE {
            Self::PartiallyPassed
        } else {
            Self::Failed
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Passed => write!(f, "Passed"),
            Self::PartiallyPassed => write!(f, "Partially Passed"),
            Self::Failed => write!(f, "Failed"),
        }
    }
}
