//! # Overview
//!
//! queuesim simulates a single-server queueing facility over a bounded observation window. Clients arrive according
//! to a nonhomogeneous Poisson process with a time-varying rate λ(t), wait in a FIFO line, and are served one at a time.
//! A run produces an event log, a timing record for every client, and aggregate statistics: mean wait, mean time in
//! system, mean queue length, server utilization, and how far service ran past closing.
//!
//! The pieces fit together as follows:
//!
//! * An [`IntensityProfile`] supplies λ(t). [`DailyProfile`] is the reference working-day table, [`ConstantRate`] a
//!   homogeneous rate, and any `Fn(f64) -> f64` works too.
//! * An [`ArrivalProcess`] draws the next arrival instant by thinning candidates generated at a dominating rate
//!   `λ_max`. The bound `λ(t) ≤ λ_max` is a precondition; [`intensity::verify_bound`] checks it before a run.
//! * A [`ServiceTimeGenerator`] draws service durations and reports a [`Error::ServiceDomain`] instead of producing an
//!   undefined value when its rate is too small.
//! * The [`Simulation`] owns the scheduling state and repeatedly processes whichever comes first: an arrival, a
//!   departure, or, once the window has closed, a departure that drains the remaining line.
//! * Every random draw comes from an injected [`RandomSource`], so a run is reproducible from its stream alone.
//!
//! The [`report`] module renders the results as text tables, and [`RunConfig`] bundles parameters, seeding, and the
//! pre-run bound check for callers that do not need to inject their own source.
//!
//! ```
//! use queuesim::{DailyProfile, RunConfig};
//!
//! let config = RunConfig {
//!     seed: Some(7),
//!     ..RunConfig::default()
//! };
//! let mut sim = config.build(DailyProfile)?;
//! sim.run()?;
//!
//! let summary = sim.summary();
//! assert_eq!(summary.arrivals, summary.departures);
//! assert!((0.0..=1.0).contains(&summary.utilization));
//! # Ok::<(), queuesim::Error>(())
//! ```

mod arrivals;
mod client;
mod config;
pub mod engine;
mod error;
pub mod intensity;
mod random;
pub mod report;
mod service;
pub mod stats;

pub use arrivals::ArrivalProcess;
pub use client::Client;
pub use config::{Parameters, RunConfig, Window};
pub use engine::{EventKind, Simulation};
pub use error::{Error, Result};
pub use intensity::{ConstantRate, DailyProfile, IntensityProfile};
pub use random::{ConstantSource, RandomSource, RngSource, SequenceSource};
pub use service::ServiceTimeGenerator;
pub use stats::{EventRecord, Summary};
