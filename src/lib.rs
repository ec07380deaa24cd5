//! Discrete-event simulation of a finite-capacity queueing network.
//!
//! Independent sources with uniformly distributed inter-arrival times feed
//! a bounded buffer and a pool of servers with exponentially distributed
//! service times. The buffer implements a priority-knockout eviction
//! discipline (the least-important buffered request loses its slot) and a
//! packet-based selection discipline (requests of one source are served
//! contiguously, highest-priority source first, FIFO within a source).
//!
//! A [`Sweep`] runs one [`Realization`] per value of the mean service time
//! τ and collects one [`RealizationResult`] per value. All time is virtual
//! and advances strictly event to event; realizations are seeded and fully
//! reproducible. A step-mode [`Observer`] can watch every event with a
//! full state [`Snapshot`] and steer the run synchronously.
//!
//! ```
//! use quenet::{Config, SourceConfig, Sweep, SweepRange};
//!
//! let config = Config {
//!     buffer_capacity: 3,
//!     min_requests: 50,
//!     max_events: 100_000,
//!     seed: 1,
//!     sources: vec![
//!         SourceConfig { min_interval: 0.4, max_interval: 1.2 },
//!         SourceConfig { min_interval: 0.6, max_interval: 1.6 },
//!     ],
//!     servers: 2,
//!     sweep: SweepRange { min: 0.5, max: 2.0, step: 0.5 },
//! };
//! let results = Sweep::new(config)?.run(None)?;
//! assert_eq!(4, results.len());
//! # Ok::<(), quenet::SimError>(())
//! ```

pub mod config;
pub mod error;
pub mod modeling;
pub mod observer;
pub mod random;
pub mod report;
pub mod simulation;

pub use config::{Config, ConfigError, SourceConfig, SweepRange};
pub use error::SimError;
pub use observer::{Directive, EventKind, Observer, Snapshot};
pub use random::Sampler;
pub use report::{RealizationResult, RunStatus};
pub use simulation::{Event, Realization, Sweep};
