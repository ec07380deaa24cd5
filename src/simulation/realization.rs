use crate::config::Config;
use crate::error::SimError;
use crate::modeling::{Buffer, Server, Source};
use crate::observer::{BufferEntry, Directive, EventKind, Observer, ServerSnapshot, Snapshot, SourceSnapshot};
use crate::random::Sampler;
use crate::report::{RealizationResult, RunStatus, ServerStats, SourceStats, SystemStats};
use crate::simulation::scheduler::{next_event, Event};

/// Outcome of one applied transition.
#[derive(Debug, PartialEq, Eq)]
enum Step {
    Continue,
    Abort,
}

/// Observer gate: forwards subscribed events until the observer asks to
/// run to completion, and reports abort requests.
struct Gate<'a> {
    observer: Option<&'a mut dyn Observer>,
    armed: bool,
}

impl Gate<'_> {
    fn notify(&mut self, kind: EventKind, snapshot: impl FnOnce() -> Snapshot) -> Directive {
        if !self.armed {
            return Directive::Continue;
        }
        let Some(observer) = self.observer.as_deref_mut() else {
            return Directive::Continue;
        };
        if !observer.subscribed(kind) {
            return Directive::Continue;
        }
        let directive = observer.on_event(kind, &snapshot());
        if directive == Directive::RunToCompletion {
            self.armed = false;
        }
        directive
    }
}

/// One complete simulation run for a fixed mean service time τ.
///
/// All state (sources, servers, buffer, sampler) is constructed fresh per
/// realization and owned exclusively by it; nothing leaks into the next
/// realization of a sweep.
#[derive(Debug)]
pub struct Realization {
    tau: f64,
    service_rate: f64,
    min_requests: usize,
    max_events: usize,
    time: f64,
    events: usize,
    sampler: Sampler,
    sources: Vec<Source>,
    servers: Vec<Server>,
    buffer: Buffer,
}

impl Realization {
    /// Builds a fresh state bundle for one realization. The first arrival
    /// of every source is scheduled from t = 0.
    pub fn new(config: &Config, tau: f64, seed: u64) -> Self {
        let mut sampler = Sampler::seeded(seed);
        let sources = config
            .sources
            .iter()
            .enumerate()
            .map(|(id, source)| Source::new(id, source, &mut sampler))
            .collect();
        let servers = (0..config.servers).map(Server::new).collect();
        Self {
            tau,
            service_rate: 1. / tau,
            min_requests: config.min_requests,
            max_events: config.max_events,
            time: 0.,
            events: 0,
            sampler,
            sources,
            servers,
            buffer: Buffer::new(config.buffer_capacity),
        }
    }

    /// Full engine state at the current virtual time.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            time: self.time,
            tau: self.tau,
            buffer: self
                .buffer
                .slots()
                .iter()
                .map(|slot| {
                    slot.as_ref().map(|request| BufferEntry {
                        source: request.source,
                        arrival: request.arrival,
                    })
                })
                .collect(),
            servers: self
                .servers
                .iter()
                .map(|server| ServerSnapshot {
                    occupant: server.occupant,
                    completion: server.completion,
                    processed: server.processed,
                })
                .collect(),
            sources: self
                .sources
                .iter()
                .map(|source| SourceSnapshot {
                    next_arrival: source.next_arrival,
                    generated: source.generated,
                    processed: source.processed,
                    rejected: source.rejected,
                })
                .collect(),
            total_rejected: self.sources.iter().map(|source| source.rejected).sum(),
            packet: self.buffer.packet(),
        }
    }

    /// Drives the realization to its stopping condition and aggregates the
    /// result record.
    ///
    /// The loop stops cleanly once every source has generated at least the
    /// configured minimum of requests; the event ceiling, an exhausted
    /// calendar, and an observer abort each stop it early with a
    /// distinguishable [`RunStatus`]. Invariant violations are engine
    /// defects and come back as [`SimError::InvariantViolation`].
    pub fn run(
        &mut self,
        observer: Option<&mut dyn Observer>,
    ) -> Result<RealizationResult, SimError> {
        tracing::info!(tau = self.tau, "starting realization");
        let mut gate = Gate {
            observer,
            armed: true,
        };
        let status = loop {
            if self
                .sources
                .iter()
                .all(|source| source.generated >= self.min_requests)
            {
                break RunStatus::Completed;
            }
            if self.events >= self.max_events {
                tracing::warn!(events = self.events, "event ceiling reached");
                break RunStatus::EventCeiling;
            }
            let Some((event, time)) = next_event(&self.sources, &self.servers) else {
                break RunStatus::Exhausted;
            };
            if time < self.time {
                return Err(self.invariant(format!(
                    "event time {time} precedes current time {}",
                    self.time
                )));
            }
            self.time = time;
            self.events += 1;
            tracing::debug!(?event, time, "processing event");
            let step = match event {
                Event::Arrival(source) => self.on_arrival(source, &mut gate)?,
                Event::Completion(server) => self.on_completion(server, &mut gate)?,
            };
            self.audit_buffer()?;
            if step == Step::Abort {
                tracing::info!("observer aborted the realization");
                break RunStatus::Aborted;
            }
        };
        tracing::info!(tau = self.tau, ?status, events = self.events, "realization finished");
        Ok(self.results(status))
    }

    /// Arrival transition: direct service if a server is free, otherwise
    /// buffer write, otherwise priority knockout. The source reschedules
    /// its next arrival in every branch.
    fn on_arrival(&mut self, source_id: usize, gate: &mut Gate) -> Result<Step, SimError> {
        if gate.notify(EventKind::Arrival, || self.snapshot()) == Directive::Abort {
            return Ok(Step::Abort);
        }
        let free = self.servers.iter().position(|server| !server.is_busy());
        let kind = if let Some(index) = free {
            let completion = self.time + self.sampler.exponential(self.service_rate);
            self.servers[index].assign(source_id, completion);
            let source = &mut self.sources[source_id];
            source.generated += 1;
            source.processed += 1;
            source.schedule_next(self.time, &mut self.sampler);
            EventKind::AssignDirect
        } else if !self.buffer.is_full() {
            if self.buffer.write(source_id, self.time).is_none() {
                return Err(self.invariant("write refused by a non-full buffer".into()));
            }
            let source = &mut self.sources[source_id];
            source.generated += 1;
            source.schedule_next(self.time, &mut self.sampler);
            EventKind::BufferWrite
        } else {
            let Some(eviction) = self.buffer.evict(source_id, self.time) else {
                return Err(self.invariant("eviction from an empty buffer".into()));
            };
            tracing::debug!(
                victim = eviction.victim_source,
                slot = eviction.slot,
                "request knocked out of the buffer"
            );
            self.sources[eviction.victim_source].rejected += 1;
            let source = &mut self.sources[source_id];
            source.generated += 1;
            source.schedule_next(self.time, &mut self.sampler);
            EventKind::BufferReject
        };
        if gate.notify(kind, || self.snapshot()) == Directive::Abort {
            return Ok(Step::Abort);
        }
        Ok(Step::Continue)
    }

    /// Completion transition: the server frees up and either goes idle or
    /// immediately takes the next request chosen by the packet discipline.
    fn on_completion(&mut self, server_id: usize, gate: &mut Gate) -> Result<Step, SimError> {
        self.servers[server_id].release();
        if self.buffer.is_empty() {
            if gate.notify(EventKind::ServerIdle, || self.snapshot()) == Directive::Abort {
                return Ok(Step::Abort);
            }
            return Ok(Step::Continue);
        }
        let Some(selection) = self.buffer.select() else {
            return Err(self.invariant("selection from a non-empty buffer yielded nothing".into()));
        };
        if let Some((old, new)) = selection.switched {
            tracing::debug!(old, new, "packet switch");
            if gate.notify(EventKind::PacketSwitch, || self.snapshot()) == Directive::Abort {
                return Ok(Step::Abort);
            }
        }
        let wait = self.time - selection.arrival;
        if wait < 0. {
            return Err(self.invariant(format!(
                "negative wait {wait} for source {}",
                selection.source
            )));
        }
        let source = &mut self.sources[selection.source];
        source.total_wait += wait;
        source.processed += 1;
        let completion = self.time + self.sampler.exponential(self.service_rate);
        self.servers[server_id].assign(selection.source, completion);
        if gate.notify(EventKind::AssignFromBuffer, || self.snapshot()) == Directive::Abort {
            return Ok(Step::Abort);
        }
        Ok(Step::Continue)
    }

    /// Occupancy audit: the counter must match the slots and stay within
    /// capacity. A mismatch is a defect in the discipline logic.
    fn audit_buffer(&self) -> Result<(), SimError> {
        let occupied = self.buffer.count_occupied();
        if occupied != self.buffer.len() || occupied > self.buffer.capacity() {
            return Err(self.invariant(format!(
                "buffer occupancy {} disagrees with slots ({occupied} of {})",
                self.buffer.len(),
                self.buffer.capacity()
            )));
        }
        Ok(())
    }

    fn invariant(&self, context: String) -> SimError {
        SimError::InvariantViolation {
            context,
            snapshot: Box::new(self.snapshot()),
        }
    }

    fn results(&self, status: RunStatus) -> RealizationResult {
        let generated: usize = self.sources.iter().map(|source| source.generated).sum();
        let processed: usize = self.sources.iter().map(|source| source.processed).sum();
        let rejected: usize = self.sources.iter().map(|source| source.rejected).sum();
        let rejection_probability = match generated {
            0 => 0.,
            _ => rejected as f64 / generated as f64,
        };
        RealizationResult {
            tau: self.tau,
            status,
            events: self.events,
            system: SystemStats {
                generated,
                processed,
                rejected,
                rejection_probability,
            },
            sources: self
                .sources
                .iter()
                .map(|source| SourceStats {
                    id: source.id,
                    generated: source.generated,
                    processed: source.processed,
                    rejected: source.rejected,
                    average_wait: match source.processed {
                        0 => 0.,
                        processed => source.total_wait / processed as f64,
                    },
                })
                .collect(),
            servers: self
                .servers
                .iter()
                .map(|server| ServerStats {
                    id: server.id,
                    processed: server.processed,
                })
                .collect(),
        }
    }
}
