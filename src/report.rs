use serde::Serialize;

/// How a realization came to an end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RunStatus {
    /// Every source generated at least the configured minimum of requests.
    Completed,
    /// The event ceiling was reached before the stopping condition.
    EventCeiling,
    /// No finite event time remained in the calendar.
    Exhausted,
    /// The step-mode observer requested an abort; statistics are partial.
    Aborted,
}

/// Aggregate counters over all sources of one realization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SystemStats {
    pub generated: usize,
    pub processed: usize,
    pub rejected: usize,
    /// `rejected / generated`, or 0 when nothing was generated.
    pub rejection_probability: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SourceStats {
    pub id: usize,
    pub generated: usize,
    pub processed: usize,
    pub rejected: usize,
    /// Mean time spent in the buffer by this source's serviced requests,
    /// or 0 when none were serviced.
    pub average_wait: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ServerStats {
    pub id: usize,
    pub processed: usize,
}

/// Summary of one completed realization. Immutable once produced; the
/// sweep owns the ordered sequence of these records as its only output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RealizationResult {
    /// Mean service time this realization was run with.
    pub tau: f64,
    pub status: RunStatus,
    /// Number of calendar events processed.
    pub events: usize,
    pub system: SystemStats,
    pub sources: Vec<SourceStats>,
    pub servers: Vec<ServerStats>,
}
