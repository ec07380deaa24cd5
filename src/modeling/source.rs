use crate::config::SourceConfig;
use crate::random::Sampler;

/// One arrival process and its running counters.
///
/// Lower ids have higher priority throughout the disciplines: source 0 is
/// the most important one.
#[derive(Debug, Clone)]
pub struct Source {
    pub id: usize,
    min_interval: f64,
    max_interval: f64,
    /// Time of this source's next arrival event.
    pub next_arrival: f64,
    pub generated: usize,
    pub processed: usize,
    pub rejected: usize,
    /// Accumulated buffer wait of all serviced requests.
    pub total_wait: f64,
}

impl Source {
    /// Creates a fresh source and schedules its first arrival from t = 0.
    pub fn new(id: usize, config: &SourceConfig, sampler: &mut Sampler) -> Self {
        let mut source = Self {
            id,
            min_interval: config.min_interval,
            max_interval: config.max_interval,
            next_arrival: 0.,
            generated: 0,
            processed: 0,
            rejected: 0,
            total_wait: 0.,
        };
        source.schedule_next(0., sampler);
        source
    }

    /// Schedules the next arrival at `now + uniform(min, max)`.
    /// With validated intervals (`min > 0`) the arrival time strictly advances.
    pub fn schedule_next(&mut self, now: f64, sampler: &mut Sampler) {
        self.next_arrival = now + sampler.uniform(self.min_interval, self.max_interval);
    }
}
