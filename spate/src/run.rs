//! End-to-end orchestration of a load-generation run.

use crate::dispatch::Dispatcher;
use crate::schedule::{Progress, Scheduler};
use crate::select::UniformSelection;
use crate::{client, Error};
use reqwest::Url;
use spate_core::{RequestOutcome, RunConfig, RunPlan, RunStatistics, Verdict};
use std::sync::Arc;
use std::time::{Duration, Instant};
#[allow(unused)]
use tracing::{debug, error, info, instrument, trace, warn};

/// Everything a finished run produced.
#[derive(Debug)]
pub struct RunReport {
    pub plan: RunPlan,
    pub outcomes: Vec<RequestOutcome>,
    pub stats: RunStatistics,
    pub verdict: Verdict,
    /// Wall time from first launch to last joined response.
    pub elapsed: Duration,
}

/// Validates the configuration, runs the plan against the target, and
/// aggregates the outcomes into a report.
#[instrument(name = "run", skip_all, fields(url = %config.url))]
pub async fn execute(config: &RunConfig) -> Result<RunReport, Error> {
    config.validate()?;
    let target = Url::parse(&config.url)?;
    let client = client::build(config.max_concurrent, config.skip_ssl)?;
    let dispatcher = Dispatcher::new(client, target);

    let plan = config.plan();
    info!(
        total = plan.total_requests,
        interval_ms = plan.interval.as_millis() as u64,
        concurrency = config.max_concurrent,
        "starting run against {}",
        config.url
    );

    let policy = Arc::new(UniformSelection::new(config.tenants.clone()));
    let scheduler = Scheduler::new(plan, config.max_concurrent, policy).on_progress(log_progress);

    let start = Instant::now();
    let outcomes = scheduler
        .run(move |launch| {
            let dispatcher = dispatcher.clone();
            async move { dispatcher.send(&launch.tenant, launch.kind).await }
        })
        .await;
    let elapsed = start.elapsed();

    let stats = RunStatistics::from_outcomes(&outcomes);
    let verdict = Verdict::assess(&stats);
    info!(
        successful = stats.successful,
        failed = stats.failed,
        verdict = %verdict,
        "run complete in {:.1}s",
        elapsed.as_secs_f64()
    );

    Ok(RunReport {
        plan,
        outcomes,
        stats,
        verdict,
        elapsed,
    })
}

fn log_progress(progress: Progress) {
    info!(
        "launched {}/{} | elapsed: {:.1}s | current rpm: {:.0}",
        progress.launched,
        progress.total,
        progress.elapsed.as_secs_f64(),
        progress.rpm
    );
}
