use crate::config::ConfigError;
use crate::observer::Snapshot;
use thiserror::Error;

/// Errors that halt a realization and the surrounding sweep.
///
/// Event-ceiling and observer-abort terminations are NOT errors; they are
/// reported through [`crate::report::RunStatus`] instead.
#[derive(Debug, Error)]
pub enum SimError {
    /// Invalid configuration, rejected before any realization starts.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A discipline invariant was broken. This indicates a defect in the
    /// engine itself; the snapshot carries the full state for diagnosis.
    #[error("invariant violation at t={}: {context}", .snapshot.time)]
    InvariantViolation {
        context: String,
        snapshot: Box<Snapshot>,
    },
}
