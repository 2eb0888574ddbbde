//! Request construction and dispatch against the ingest endpoint.

use crate::payload;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Url};
use serde::Serialize;
use spate_core::{PayloadKind, RequestOutcome, REQUEST_TIMEOUT};
use std::time::{Duration, Instant};
#[allow(unused)]
use tracing::{debug, error, info, trace, warn};

/// Header carrying the tenant id on raw-text requests.
pub const TENANT_HEADER: &str = "X-Tenant-ID";

#[derive(Debug, Serialize)]
struct StructuredRecord<'a> {
    tenant_id: &'a str,
    log_id: String,
    text: String,
}

/// Issues single requests and turns every possible ending into a
/// [`RequestOutcome`]. Cloning is cheap; the clones share one pooled client.
#[derive(Clone)]
pub struct Dispatcher {
    client: Client,
    target: Url,
    request_timeout: Duration,
}

impl Dispatcher {
    pub fn new(client: Client, target: Url) -> Self {
        #[cfg(feature = "metrics")]
        metrics::describe_histogram!("spate_request_latency", metrics::Unit::Nanoseconds, "");

        Self {
            client,
            target,
            request_timeout: REQUEST_TIMEOUT,
        }
    }

    /// Overrides the per-request deadline. Tests use this to force quick
    /// timeouts; real runs keep the default.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Sends one POST for `tenant` and reports how it went. This never
    /// fails outward: timeouts and transport errors come back as
    /// unsuccessful outcomes with status 0.
    pub async fn send(&self, tenant: &str, kind: PayloadKind) -> RequestOutcome {
        // The rng must not live across an await, so the request is fully
        // built before dispatch.
        let request = {
            let mut rng = rand::thread_rng();
            let text = payload::sample_text(&mut rng);
            let base = self
                .client
                .post(self.target.clone())
                .timeout(self.request_timeout);

            match kind {
                PayloadKind::Structured => base.json(&StructuredRecord {
                    tenant_id: tenant,
                    log_id: payload::next_record_id(&mut rng),
                    text,
                }),
                PayloadKind::Raw => base
                    .header(CONTENT_TYPE, "text/plain")
                    .header(TENANT_HEADER, tenant)
                    .body(text),
            }
        };

        let start = Instant::now();
        let outcome = match request.send().await {
            Ok(response) => {
                RequestOutcome::received(response.status().as_u16(), start.elapsed(), kind, tenant)
            }
            Err(err) if err.is_timeout() => RequestOutcome::timeout(start.elapsed(), kind, tenant),
            Err(err) => RequestOutcome::transport(err.to_string(), start.elapsed(), kind, tenant),
        };

        self.record(&outcome);
        outcome
    }

    fn record(&self, outcome: &RequestOutcome) {
        trace!(
            status = outcome.status,
            latency_us = outcome.latency.as_micros() as u64,
            tenant = %outcome.tenant,
            kind = %outcome.kind,
            "request finished"
        );

        #[cfg(feature = "metrics")]
        {
            metrics::histogram!("spate_request_latency").record(outcome.latency.as_nanos() as f64);
            if outcome.success {
                metrics::counter!("spate_request_success").increment(1);
            } else {
                metrics::counter!("spate_request_error").increment(1);
            }
        }
    }
}
