//! Rate-paced launching of requests with bounded concurrency.

use crate::select::SelectionPolicy;
use spate_core::{PayloadKind, RequestOutcome, RunPlan, PROGRESS_EVERY};
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tokio::time::sleep;
#[allow(unused)]
use tracing::{debug, error, info, trace, warn};

/// One unit of work handed to the transport closure.
#[derive(Debug, Clone)]
pub struct Launch {
    /// Zero-based position in the launch sequence.
    pub index: u64,
    pub tenant: String,
    pub kind: PayloadKind,
}

/// Periodic snapshot of a run in flight.
#[derive(Debug, Clone, Copy)]
pub struct Progress {
    pub launched: u64,
    pub total: u64,
    pub elapsed: Duration,
    /// Achieved launch rate so far, in requests per minute.
    pub rpm: f64,
}

type ProgressFn = dyn Fn(Progress) + Send + Sync;

/// Launches one request per plan interval without waiting for earlier
/// requests to finish, then joins everything at the end.
///
/// The scheduler targets an average rate. Launches are spaced by sleeping
/// the plan interval between them, so a slow target never slows the launch
/// cadence; backpressure shows up as permit waits inside the spawned tasks,
/// never as a stalled schedule.
pub struct Scheduler {
    plan: RunPlan,
    max_concurrent: usize,
    policy: Arc<dyn SelectionPolicy>,
    on_progress: Option<Box<ProgressFn>>,
}

impl Scheduler {
    /// `max_concurrent` must be non-zero whenever the plan launches work;
    /// a zero-permit limiter would park every task forever.
    pub fn new(plan: RunPlan, max_concurrent: usize, policy: Arc<dyn SelectionPolicy>) -> Self {
        debug_assert!(max_concurrent > 0 || plan.is_empty());
        Self {
            plan,
            max_concurrent,
            policy,
            on_progress: None,
        }
    }

    /// Registers a callback invoked once per `PROGRESS_EVERY` launches.
    pub fn on_progress(mut self, callback: impl Fn(Progress) + Send + Sync + 'static) -> Self {
        self.on_progress = Some(Box::new(callback));
        self
    }

    /// Runs the whole plan through `work` and returns one outcome per
    /// launch, in launch order. A panicking task loses neither the run nor
    /// its own accounting slot; it joins as a failed outcome.
    pub async fn run<T, F>(&self, work: T) -> Vec<RequestOutcome>
    where
        T: Fn(Launch) -> F,
        F: Future<Output = RequestOutcome> + Send + 'static,
    {
        if self.plan.is_empty() {
            return vec![];
        }

        let start = Instant::now();
        let limiter = Arc::new(Semaphore::new(self.max_concurrent));
        let mut tasks: Vec<(Launch, JoinHandle<RequestOutcome>)> =
            Vec::with_capacity(self.plan.total_requests as usize);

        for index in 0..self.plan.total_requests {
            let launch = Launch {
                index,
                tenant: self.policy.tenant(),
                kind: self.policy.kind(),
            };

            // The future is created here but does no work until the
            // spawned task holds a permit.
            let fut = work(launch.clone());
            let limiter = limiter.clone();
            let meta = launch.clone();
            let handle = tokio::spawn(async move {
                let _permit = match limiter.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => {
                        return RequestOutcome::aborted(
                            "limiter closed before dispatch",
                            meta.kind,
                            meta.tenant,
                        )
                    }
                };
                fut.await
            });
            tasks.push((launch, handle));

            if (index + 1) % PROGRESS_EVERY == 0 {
                self.emit_progress(index + 1, start.elapsed());
            }

            sleep(self.plan.interval).await;
        }

        info!(
            total = self.plan.total_requests,
            "all requests launched, waiting for in-flight responses"
        );

        let mut outcomes = Vec::with_capacity(tasks.len());
        for (launch, handle) in tasks {
            match handle.await {
                Ok(outcome) => outcomes.push(outcome),
                Err(err) => {
                    error!(index = launch.index, "request task died: {err}");
                    outcomes.push(RequestOutcome::aborted(
                        err.to_string(),
                        launch.kind,
                        launch.tenant,
                    ));
                }
            }
        }

        outcomes
    }

    fn emit_progress(&self, launched: u64, elapsed: Duration) {
        if let Some(callback) = &self.on_progress {
            let secs = elapsed.as_secs_f64();
            let rpm = if secs > 0.0 {
                launched as f64 / secs * 60.0
            } else {
                0.0
            };
            callback(Progress {
                launched,
                total: self.plan.total_requests,
                elapsed,
                rpm,
            });
        }
    }
}
