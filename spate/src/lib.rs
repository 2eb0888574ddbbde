#![cfg_attr(docsrs, feature(doc_cfg))]
//! A synthetic traffic generator for log ingest endpoints.
//!
//! `spate` launches HTTP POST requests against a target URL at a fixed
//! pace, mixing structured JSON records with raw text lines across a set
//! of tenants, then aggregates the outcomes into latency and failure
//! statistics and a pass/fail verdict.
//!
//! The pieces compose: [`Scheduler`](schedule::Scheduler) paces launches,
//! [`Dispatcher`](dispatch::Dispatcher) performs them, and
//! [`execute`](run::execute) wires the two together for the common case:
//!
//! ```no_run
//! use spate::prelude::*;
//! use spate_core::RunConfig;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), spate::Error> {
//!     let mut config = RunConfig::new("http://localhost:3100/ingest");
//!     config.rpm = 600;
//!     config.duration_secs = 10;
//!
//!     let report = execute(&config).await?;
//!     println!("{}", report.verdict);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod dispatch;
pub mod payload;
pub mod report;
pub mod run;
pub mod schedule;
pub mod select;

mod error;

pub use error::Error;
pub use run::{execute, RunReport};

pub mod prelude {
    pub use crate::dispatch::Dispatcher;
    pub use crate::run::{execute, RunReport};
    pub use crate::schedule::{Launch, Progress, Scheduler};
    pub use crate::select::{RoundRobinSelection, SelectionPolicy, UniformSelection};

    pub use spate_core::{RequestOutcome, RunStatistics, Verdict};
}
