use crate::{ACCEPTED_STATUSES, TIMEOUT_ERROR};
use std::fmt;
use std::time::Duration;

/// Shape of the request body sent to the ingest endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PayloadKind {
    /// JSON record carrying the tenant inline.
    Structured,
    /// Plain text body with the tenant in a header.
    Raw,
}

impl fmt::Display for PayloadKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Structured => write!(f, "structured"),
            Self::Raw => write!(f, "raw"),
        }
    }
}

/// Result of a single dispatched request. Every launch produces exactly one
/// of these, whether the request completed, failed, or never left the client.
#[derive(Debug, Clone)]
pub struct RequestOutcome {
    pub success: bool,
    /// HTTP status code, or 0 when no response arrived.
    pub status: u16,
    pub latency: Duration,
    pub kind: PayloadKind,
    pub tenant: String,
    pub error: Option<String>,
}

impl RequestOutcome {
    /// A response arrived; whether it counts as a success depends solely on
    /// the status code. Unexpected codes carry no error text.
    pub fn received(
        status: u16,
        latency: Duration,
        kind: PayloadKind,
        tenant: impl Into<String>,
    ) -> Self {
        debug_assert!(status != 0, "0 is reserved for missing responses");
        Self {
            success: ACCEPTED_STATUSES.contains(&status),
            status,
            latency,
            kind,
            tenant: tenant.into(),
            error: None,
        }
    }

    /// The per-request deadline elapsed before a response arrived.
    pub fn timeout(latency: Duration, kind: PayloadKind, tenant: impl Into<String>) -> Self {
        Self {
            success: false,
            status: 0,
            latency,
            kind,
            tenant: tenant.into(),
            error: Some(TIMEOUT_ERROR.to_string()),
        }
    }

    /// The transport failed below HTTP (refused connection, DNS, TLS, ...).
    pub fn transport(
        error: impl Into<String>,
        latency: Duration,
        kind: PayloadKind,
        tenant: impl Into<String>,
    ) -> Self {
        Self {
            success: false,
            status: 0,
            latency,
            kind,
            tenant: tenant.into(),
            error: Some(error.into()),
        }
    }

    /// The task running the request died before producing an outcome.
    pub fn aborted(error: impl Into<String>, kind: PayloadKind, tenant: impl Into<String>) -> Self {
        Self {
            success: false,
            status: 0,
            latency: Duration::ZERO,
            kind,
            tenant: tenant.into(),
            error: Some(error.into()),
        }
    }

    /// True when no response was received at all.
    pub fn no_response(&self) -> bool {
        self.status == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepted_statuses_succeed() {
        for status in [200, 201, 202] {
            let outcome = RequestOutcome::received(
                status,
                Duration::from_millis(12),
                PayloadKind::Structured,
                "acme-corp",
            );
            assert!(outcome.success, "status {status}");
            assert_eq!(outcome.error, None);
        }
    }

    #[test]
    fn unexpected_status_fails_without_error_text() {
        let outcome = RequestOutcome::received(
            503,
            Duration::from_millis(40),
            PayloadKind::Raw,
            "globex",
        );
        assert!(!outcome.success);
        assert_eq!(outcome.status, 503);
        assert_eq!(outcome.error, None);
        assert!(!outcome.no_response());
    }

    #[test]
    fn timeout_uses_the_fixed_label() {
        let outcome =
            RequestOutcome::timeout(Duration::from_secs(10), PayloadKind::Structured, "initech");
        assert!(!outcome.success);
        assert_eq!(outcome.status, 0);
        assert_eq!(outcome.error.as_deref(), Some("Timeout"));
        assert!(outcome.no_response());
    }

    #[test]
    fn transport_failures_keep_their_description() {
        let outcome = RequestOutcome::transport(
            "connection refused",
            Duration::from_millis(1),
            PayloadKind::Raw,
            "hooli-dev",
        );
        assert!(!outcome.success);
        assert_eq!(outcome.status, 0);
        assert_eq!(outcome.error.as_deref(), Some("connection refused"));
    }

    #[test]
    fn aborted_outcomes_report_zero_latency() {
        let outcome = RequestOutcome::aborted("task panicked", PayloadKind::Structured, "globex");
        assert!(!outcome.success);
        assert_eq!(outcome.latency, Duration::ZERO);
        assert!(outcome.no_response());
    }
}
