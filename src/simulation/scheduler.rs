use crate::modeling::{Server, Source};

/// A calendar event: either a source arrival or a server completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Arrival(usize),
    Completion(usize),
}

/// Returns the next event and its time, or `None` when no finite event
/// time remains.
///
/// Candidates are every source's next arrival and every busy server's
/// completion. The scan keeps the strictly smallest time, so the iteration
/// order is the tie policy: at equal times arrivals beat completions,
/// lower source ids beat higher ones, and lower server ids beat higher
/// ones.
pub fn next_event(sources: &[Source], servers: &[Server]) -> Option<(Event, f64)> {
    let mut next: Option<(Event, f64)> = None;
    for source in sources {
        if source.next_arrival.is_finite()
            && next.map_or(true, |(_, time)| source.next_arrival < time)
        {
            next = Some((Event::Arrival(source.id), source.next_arrival));
        }
    }
    for server in servers {
        if server.completion.is_finite() && next.map_or(true, |(_, time)| server.completion < time)
        {
            next = Some((Event::Completion(server.id), server.completion));
        }
    }
    next
}
