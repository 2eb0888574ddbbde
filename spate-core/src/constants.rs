use std::time::Duration;

/// Statuses the ingestion endpoint may answer with when it accepts a record.
pub const ACCEPTED_STATUSES: [u16; 3] = [200, 201, 202];

/// Error string recorded when a request deadline expires.
pub const TIMEOUT_ERROR: &str = "Timeout";

/// Per-request deadline. Kept under [`SESSION_TIMEOUT`] so the request
/// deadline always fires before the client gives up on the session.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Ceiling applied to the HTTP client as a whole.
pub const SESSION_TIMEOUT: Duration = Duration::from_secs(30);

pub const DEFAULT_RPM: i64 = 2_000;
pub const DEFAULT_DURATION_SECS: i64 = 60;
pub const DEFAULT_MAX_CONCURRENT: usize = 100;

/// Tenant ids used when the caller does not supply a set.
pub const DEFAULT_TENANTS: [&str; 5] = [
    "acme-corp",
    "globex",
    "hooli-dev",
    "initech",
    "umbrella-labs",
];

/// A progress signal is emitted once per this many launches.
pub const PROGRESS_EVERY: u64 = 100;

/// Success-rate floor (percent) and mean-latency ceiling for a passing run.
pub const PASS_SUCCESS_RATE: f64 = 95.0;
pub const PASS_AVG_LATENCY: Duration = Duration::from_secs(1);

/// Success-rate floor (percent) for a partial pass.
pub const PARTIAL_SUCCESS_RATE: f64 = 80.0;

/// Length bounds (bytes, ASCII) for synthetic log text.
pub const TEXT_MIN_LEN: usize = 50;
pub const TEXT_MAX_LEN: usize = 200;
