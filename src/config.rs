use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors detected while validating a [`Config`].
/// All of them are reported before any realization starts.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("buffer capacity must be greater than zero")]
    ZeroBufferCapacity,
    #[error("at least one source is required")]
    NoSources,
    #[error("at least one server is required")]
    NoServers,
    #[error("minimum requests per source must be greater than zero")]
    ZeroMinRequests,
    #[error("event ceiling must be greater than zero")]
    ZeroEventCeiling,
    #[error("source {source_id}: arrival interval bounds must satisfy 0 < {min} < {max}")]
    BadArrivalInterval { source_id: usize, min: f64, max: f64 },
    #[error("sweep bounds must satisfy 0 < {min} <= {max}")]
    BadSweepBounds { min: f64, max: f64 },
    #[error("sweep step must be positive and finite, got {step}")]
    BadSweepStep { step: f64 },
}

/// Arrival process parameters of one source.
/// Inter-arrival times are drawn uniformly from `[min_interval, max_interval)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SourceConfig {
    pub min_interval: f64,
    pub max_interval: f64,
}

/// Range of the swept mean-service-time parameter τ.
/// Realizations run for `min, min + step, ...` up to and including `max`
/// (within floating-point tolerance).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl SweepRange {
    /// Returns the ordered τ grid. The endpoint is included when it falls
    /// on the grid within a small relative tolerance.
    pub fn values(&self) -> Vec<f64> {
        let span = (self.max - self.min) / self.step;
        let count = (span + span.abs() * 1e-9 + 1e-12).floor() as usize + 1;
        (0..count).map(|k| self.min + k as f64 * self.step).collect()
    }
}

/// Full engine configuration.
///
/// The engine consumes this as a plain in-memory value; loading it from a
/// file is a collaborator's job (it derives [`Deserialize`] for that).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Number of buffer slots.
    pub buffer_capacity: usize,
    /// Stopping condition: every source must generate at least this many requests.
    pub min_requests: usize,
    /// Hard ceiling on processed events per realization.
    #[serde(default = "default_max_events")]
    pub max_events: usize,
    /// Base seed; realization `k` of the sweep uses `seed + k`.
    #[serde(default)]
    pub seed: u64,
    /// One entry per source, ordered by source id (id 0 has highest priority).
    pub sources: Vec<SourceConfig>,
    /// Number of servers in the pool.
    pub servers: usize,
    /// Swept mean-service-time range.
    pub sweep: SweepRange,
}

fn default_max_events() -> usize {
    100_000
}

impl Config {
    /// Checks every bound the disciplines rely on. Called by the sweep
    /// before the first realization; errors here halt the run up front.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.buffer_capacity == 0 {
            return Err(ConfigError::ZeroBufferCapacity);
        }
        if self.sources.is_empty() {
            return Err(ConfigError::NoSources);
        }
        if self.servers == 0 {
            return Err(ConfigError::NoServers);
        }
        if self.min_requests == 0 {
            return Err(ConfigError::ZeroMinRequests);
        }
        if self.max_events == 0 {
            return Err(ConfigError::ZeroEventCeiling);
        }
        for (id, source) in self.sources.iter().enumerate() {
            let (min, max) = (source.min_interval, source.max_interval);
            if !(min.is_finite() && max.is_finite()) || min <= 0. || min >= max {
                return Err(ConfigError::BadArrivalInterval { source_id: id, min, max });
            }
        }
        let sweep = &self.sweep;
        if !(sweep.min.is_finite() && sweep.max.is_finite()) || sweep.min <= 0. || sweep.min > sweep.max {
            return Err(ConfigError::BadSweepBounds {
                min: sweep.min,
                max: sweep.max,
            });
        }
        if !sweep.step.is_finite() || sweep.step <= 0. {
            return Err(ConfigError::BadSweepStep { step: sweep.step });
        }
        Ok(())
    }
}
