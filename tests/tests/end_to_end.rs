mod utils;
#[allow(unused)]
use utils::*;

use spate::report::{self, TextReport};
use spate_core::{RunConfig, StatusKey, Verdict};
use std::time::Duration;

/// 6000 rpm for one second: 100 launches spaced 10ms apart.
fn quick_config(url: &str) -> RunConfig {
    let mut config = RunConfig::new(url);
    config.rpm = 6_000;
    config.duration_secs = 1;
    config.max_concurrent = 50;
    config
}

#[tokio::test]
#[ntest::timeout(30_000)]
async fn full_run_against_a_healthy_endpoint() {
    init();
    let addr = mock_ingest::spawn().await;
    let config = quick_config(&format!("http://{addr}/ingest"));

    let report = spate::execute(&config).await.unwrap();

    assert_eq!(report.plan.total_requests, 100);
    assert_eq!(report.stats.total, 100);
    assert_eq!(report.stats.successful, 100);
    assert_eq!(report.stats.failed, 0);
    assert_eq!(report.verdict, Verdict::Passed);

    // Everything got a 202 and a real latency measurement.
    assert_eq!(report.stats.status_counts[&StatusKey::Code(202)], 100);
    assert!(report.outcomes.iter().all(|o| o.latency > Duration::ZERO));

    // Uniform selection over 100 launches covers both payload kinds and
    // the whole default tenant set.
    assert!(report.stats.structured > 0);
    assert!(report.stats.raw > 0);
    assert_eq!(report.stats.tenant_counts.len(), config.tenants.len());

    // 100 launches each followed by a 10ms pacing sleep.
    assert!(report.elapsed >= Duration::from_secs(1));
}

#[tokio::test]
#[ntest::timeout(30_000)]
async fn unreachable_endpoint_fails_the_run() {
    init();
    // Port 9 (discard) is never listening in the test environment.
    let config = quick_config("http://127.0.0.1:9/ingest");

    let report = spate::execute(&config).await.unwrap();

    assert_eq!(report.stats.total, 100);
    assert_eq!(report.stats.successful, 0);
    assert_eq!(report.verdict, Verdict::Failed);
    assert!(report.outcomes.iter().all(|o| o.status == 0));
    assert_eq!(report.stats.status_counts[&StatusKey::NoResponse], 100);

    // Transport failures carry their description into the error histogram.
    assert!(!report.stats.error_counts.is_empty());
    let counted: u64 = report.stats.error_counts.iter().map(|(_, count)| count).sum();
    assert_eq!(counted, 100);
}

#[tokio::test]
#[ntest::timeout(30_000)]
async fn hard_server_errors_fail_without_error_text() {
    init();
    let addr = mock_ingest::spawn().await;
    let config = quick_config(&format!("http://{addr}/ingest/flaky/100"));

    let report = spate::execute(&config).await.unwrap();

    assert_eq!(report.stats.successful, 0);
    assert_eq!(report.verdict, Verdict::Failed);
    assert_eq!(report.stats.status_counts[&StatusKey::Code(500)], 100);

    // A response arrived, so these are failures but not errors.
    assert!(report.stats.error_counts.is_empty());
}

#[tokio::test]
#[ntest::timeout(30_000)]
async fn rate_limited_endpoint_shows_rejections() {
    init();
    let addr = mock_ingest::spawn().await;
    let config = quick_config(&format!("http://{addr}/ingest/limited/5"));

    let report = spate::execute(&config).await.unwrap();

    // 100 launches in a second against a 5 tps limiter: a handful accepted,
    // the rest rejected with 429.
    assert!(report.stats.status_counts.contains_key(&StatusKey::Code(202)));
    assert!(report.stats.status_counts.contains_key(&StatusKey::Code(429)));
    assert_eq!(report.verdict, Verdict::Failed);
}

#[tokio::test]
#[ntest::timeout(60_000)]
async fn slow_endpoint_raises_measured_latency() {
    init();
    let addr = mock_ingest::spawn().await;
    let config = quick_config(&format!("http://{addr}/ingest/delay/ms/100"));

    let report = spate::execute(&config).await.unwrap();

    assert_eq!(report.stats.successful, 100);
    assert_eq!(report.verdict, Verdict::Passed);
    assert!(report.stats.latency.min >= Duration::from_millis(100));
    assert!(report.stats.latency.p50 >= Duration::from_millis(100));
}

#[tokio::test]
#[ntest::timeout(30_000)]
async fn report_rendering_matches_the_run() {
    init();
    let addr = mock_ingest::spawn().await;
    let config = quick_config(&format!("http://{addr}/ingest"));

    let report = spate::execute(&config).await.unwrap();

    let rendered = TextReport(&report).to_string();
    assert!(rendered.contains("total:        100"));
    assert!(rendered.contains("successful:   100 (100.0%)"));
    assert!(rendered.contains("202:"));
    assert!(rendered.contains("PASSED: the endpoint absorbed the load"));

    let summary = serde_json::to_value(report::json_summary(&report)).unwrap();
    assert_eq!(summary["verdict"], "Passed");
    assert_eq!(summary["total_requests"], 100);
    assert_eq!(summary["successful"], 100);
    assert_eq!(summary["success_rate"], 100.0);
}

#[tokio::test]
#[ntest::timeout(30_000)]
async fn mock_contract_rejects_malformed_records() -> anyhow::Result<()> {
    init();
    let addr = mock_ingest::spawn().await;
    let url = format!("http://{addr}/ingest");
    let client = reqwest::Client::new();

    // Well-formed structured record.
    let accepted = client
        .post(&url)
        .json(&serde_json::json!({
            "tenant_id": "acme-corp",
            "log_id": "log_0_0_0000",
            "text": "User 88412 signed in from a new device",
        }))
        .send()
        .await?;
    assert_eq!(accepted.status().as_u16(), 202);

    // Structured record missing required fields.
    let malformed = client
        .post(&url)
        .header("Content-Type", "application/json")
        .body(r#"{"tenant_id": "acme-corp"}"#)
        .send()
        .await?;
    assert_eq!(malformed.status().as_u16(), 422);

    // Raw record without the tenant header.
    let headerless = client
        .post(&url)
        .header("Content-Type", "text/plain")
        .body("orphaned line")
        .send()
        .await?;
    assert_eq!(headerless.status().as_u16(), 400);

    Ok(())
}
