use crate::{DEFAULT_DURATION_SECS, DEFAULT_MAX_CONCURRENT, DEFAULT_RPM, DEFAULT_TENANTS};
use std::time::Duration;
use thiserror::Error;

/// Knobs for a single load-generation run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub url: String,
    /// Target launch rate in requests per minute.
    pub rpm: i64,
    pub duration_secs: i64,
    pub max_concurrent: usize,
    pub skip_ssl: bool,
    pub tenants: Vec<String>,
}

impl RunConfig {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            rpm: DEFAULT_RPM,
            duration_secs: DEFAULT_DURATION_SECS,
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            skip_ssl: false,
            tenants: DEFAULT_TENANTS.iter().map(|t| t.to_string()).collect(),
        }
    }

    /// Launch schedule derived from the rate and duration.
    pub fn plan(&self) -> RunPlan {
        RunPlan::new(self.rpm, self.duration_secs)
    }

    /// Rejects configurations that could never complete a run. A non-positive
    /// rate or duration is not an error; it simply plans zero requests.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tenants.is_empty() {
            return Err(ConfigError::NoTenants);
        }
        // A zero-permit limiter would park every launched request forever.
        if self.max_concurrent == 0 && !self.plan().is_empty() {
            return Err(ConfigError::NoConcurrency);
        }
        Ok(())
    }
}

/// Launch schedule, computed once at run start and immutable afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunPlan {
    pub total_requests: u64,
    /// Gap between successive launches.
    pub interval: Duration,
}

impl RunPlan {
    pub fn new(rpm: i64, duration_secs: i64) -> Self {
        if rpm <= 0 || duration_secs <= 0 {
            return Self {
                total_requests: 0,
                interval: Duration::ZERO,
            };
        }

        // Integer division floors exactly; the i128 widening keeps absurd
        // rate/duration combinations from overflowing.
        let total_requests = (rpm as i128 * duration_secs as i128 / 60) as u64;
        Self {
            total_requests,
            interval: Duration::from_secs_f64(60.0 / rpm as f64),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total_requests == 0
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("tenant set is empty")]
    NoTenants,

    #[error("max concurrency is zero but requests are planned")]
    NoConcurrency,
}
