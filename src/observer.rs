use serde::Serialize;

/// Kinds of engine events an observer can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EventKind {
    /// A request arrived at a source.
    Arrival,
    /// An arriving request was written into a free buffer slot.
    BufferWrite,
    /// The buffer was full; a buffered request was evicted to admit the arrival.
    BufferReject,
    /// An arriving request was assigned straight to a free server.
    AssignDirect,
    /// A buffered request was selected and assigned to a freed server.
    AssignFromBuffer,
    /// A server completed service and found the buffer empty.
    ServerIdle,
    /// The selection discipline switched to a different packet.
    PacketSwitch,
}

/// Control directive returned synchronously by the observer hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    /// Resume until the next subscribed event.
    Continue,
    /// Stop notifying for the rest of the realization.
    RunToCompletion,
    /// Terminate the current realization immediately.
    Abort,
}

/// One occupied buffer slot as seen by the observer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BufferEntry {
    pub source: usize,
    pub arrival: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ServerSnapshot {
    /// Source id currently in service, if any.
    pub occupant: Option<usize>,
    /// Completion time; infinite while idle.
    pub completion: f64,
    pub processed: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SourceSnapshot {
    pub next_arrival: f64,
    pub generated: usize,
    pub processed: usize,
    pub rejected: usize,
}

/// Full engine state handed to the observer on every subscribed event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    /// Current virtual time.
    pub time: f64,
    /// Mean service time of the running realization.
    pub tau: f64,
    /// Buffer slots in index order; `None` marks an empty slot.
    pub buffer: Vec<Option<BufferEntry>>,
    pub servers: Vec<ServerSnapshot>,
    pub sources: Vec<SourceSnapshot>,
    /// Evictions so far, over all sources.
    pub total_rejected: usize,
    /// Active packet of the selection discipline, if one is set.
    pub packet: Option<usize>,
}

/// Step-mode hook invoked by the engine whenever a subscribed event occurs.
///
/// The call is synchronous: the engine blocks until the hook returns its
/// [`Directive`]. Interactive behavior (prompting, display) belongs to the
/// implementor, not the engine.
pub trait Observer {
    /// Filters the event kinds this observer wants to see.
    /// The default subscribes to everything.
    fn subscribed(&self, _kind: EventKind) -> bool {
        true
    }

    /// Called with the event kind and a full state snapshot.
    fn on_event(&mut self, kind: EventKind, snapshot: &Snapshot) -> Directive;
}
