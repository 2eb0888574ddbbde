use axum::body::Bytes;
use axum::http::{header, HeaderMap, StatusCode};
use axum::{debug_handler, extract::Path, routing::post, Router};
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use lazy_static::lazy_static;
use rand::Rng;
use serde::Deserialize;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::{
    num::NonZeroU32,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, RwLock,
    },
    time::Duration,
};
use tracing::debug;

pub fn app() -> Router {
    Router::new()
        .route("/ingest", post(ingest))
        .route("/ingest/delay/ms/:delay_ms", post(ingest_delayed))
        .route("/ingest/flaky/:percent", post(ingest_flaky))
        .route("/ingest/limited/:tps", post(ingest_limited))
}

pub async fn run(addr: SocketAddr) {
    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    axum::serve(listener, app()).await.unwrap();
}

/// Serves on an ephemeral port and returns the bound address, for tests
/// that need their own isolated endpoint.
pub async fn spawn() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app()).await.unwrap();
    });
    addr
}

#[derive(Debug, Deserialize)]
struct IngestRecord {
    tenant_id: String,
    log_id: String,
    text: String,
}

#[debug_handler]
pub async fn ingest(headers: HeaderMap, body: Bytes) -> StatusCode {
    let is_json = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.starts_with("application/json"))
        .unwrap_or(false);

    if is_json {
        match serde_json::from_slice::<IngestRecord>(&body) {
            Ok(record) => {
                debug!(
                    tenant = %record.tenant_id,
                    log_id = %record.log_id,
                    bytes = record.text.len(),
                    "ingested structured record"
                );
                INGESTED.fetch_add(1, Ordering::Relaxed);
                StatusCode::ACCEPTED
            }
            Err(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    } else {
        // Raw bodies must carry the tenant out-of-band.
        match headers.get("X-Tenant-ID").and_then(|v| v.to_str().ok()) {
            Some(tenant) => {
                debug!(tenant, bytes = body.len(), "ingested raw record");
                INGESTED.fetch_add(1, Ordering::Relaxed);
                StatusCode::ACCEPTED
            }
            None => StatusCode::BAD_REQUEST,
        }
    }
}

#[debug_handler]
pub async fn ingest_delayed(Path(delay_ms): Path<u64>) -> StatusCode {
    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
    INGESTED.fetch_add(1, Ordering::Relaxed);
    StatusCode::ACCEPTED
}

#[debug_handler]
pub async fn ingest_flaky(Path(percent): Path<u8>) -> StatusCode {
    if rand::thread_rng().gen_range(0..100) < percent {
        StatusCode::INTERNAL_SERVER_ERROR
    } else {
        INGESTED.fetch_add(1, Ordering::Relaxed);
        StatusCode::ACCEPTED
    }
}

lazy_static! {
    static ref LIMITER_MAP: Arc<RwLock<HashMap<u32, Arc<DefaultDirectRateLimiter>>>> =
        Arc::new(RwLock::new(HashMap::new()));
}

#[debug_handler]
pub async fn ingest_limited(Path(tps): Path<u32>) -> StatusCode {
    let read = LIMITER_MAP.read().unwrap().get(&tps).cloned();
    let limiter = if let Some(limiter) = read {
        limiter
    } else {
        let limiter = Arc::new(rate_limiter(tps));
        LIMITER_MAP.write().unwrap().insert(tps, limiter.clone());
        limiter
    };

    match limiter.check() {
        Ok(_) => {
            INGESTED.fetch_add(1, Ordering::Relaxed);
            StatusCode::ACCEPTED
        }
        Err(_) => StatusCode::TOO_MANY_REQUESTS,
    }
}

/** Utils **/

pub fn rate_limiter(tps: u32) -> DefaultDirectRateLimiter {
    RateLimiter::direct(Quota::per_second(NonZeroU32::new(tps.max(1)).unwrap()))
}

/** Throughput Printer **/

static INGESTED: AtomicU64 = AtomicU64::new(0);

pub async fn throughput_task() {
    loop {
        tokio::time::sleep(Duration::from_millis(1000)).await;
        let ingested = INGESTED.fetch_min(0, Ordering::Relaxed);
        println!("{ingested} ingested/s");
    }
}
