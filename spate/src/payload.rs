//! Synthetic record content: log-like text lines and unique record ids.

use rand::Rng;
use spate_core::{TEXT_MAX_LEN, TEXT_MIN_LEN};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Fixed corpus the generated text is seeded from.
pub const SAMPLE_LINES: [&str; 15] = [
    "User 88412 signed in from a new device",
    "ERROR: upstream connection reset while streaming response",
    "Invoice 2024-00317 settled via wire transfer",
    "WARN: disk usage at 91 percent on volume /var/data",
    "New API key issued for service account deploy-bot",
    "Rate limit tripped for client 10.40.2.17",
    "Query plan fell back to sequential scan on orders",
    "Session refresh failed: token expired 42 minutes ago",
    "Backup snapshot completed in 12.4 seconds",
    "Checksum mismatch on chunk 0009, retrying fetch",
    "Password rotation reminder sent to 312 accounts",
    "Webhook redelivered after two failed attempts",
    "Nightly compaction reclaimed 1.8 GiB",
    "TLS handshake aborted: unsupported cipher suite",
    "Feature flag beta-ingest enabled for cohort B",
];

const FILLER: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789 ";

/// Picks a corpus line and pads it with random filler up to a target length
/// drawn from the configured bounds. Lines already past the target are kept
/// as they are; every corpus line fits the upper bound.
pub fn sample_text<R: Rng>(rng: &mut R) -> String {
    let base = SAMPLE_LINES[rng.gen_range(0..SAMPLE_LINES.len())];
    let target = rng.gen_range(TEXT_MIN_LEN..=TEXT_MAX_LEN);
    if base.len() >= target {
        return base.to_string();
    }

    let mut text = String::with_capacity(target);
    text.push_str(base);
    text.push(' ');
    while text.len() < target {
        text.push(FILLER[rng.gen_range(0..FILLER.len())] as char);
    }
    text
}

static SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Returns a process-unique record id.
///
/// The wall-clock millisecond prefix keeps ids sortable across runs; the
/// atomic sequence number disambiguates ids minted within the same
/// millisecond, which a random suffix alone cannot guarantee under high
/// concurrency.
pub fn next_record_id<R: Rng>(rng: &mut R) -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis())
        .unwrap_or_default();
    let seq = SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("log_{millis}_{seq}_{:04}", rng.gen_range(0..10_000))
}
