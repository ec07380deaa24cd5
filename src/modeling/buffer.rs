/// One buffered request: who generated it and when it arrived.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slot {
    pub source: usize,
    pub arrival: f64,
}

/// Outcome of the eviction discipline: which slot was reused and whose
/// request was knocked out of it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Eviction {
    pub slot: usize,
    pub victim_source: usize,
    pub victim_arrival: f64,
}

/// Outcome of the packet selection discipline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selection {
    pub slot: usize,
    pub source: usize,
    pub arrival: f64,
    /// `Some((old, new))` when the selection moved to a different packet.
    pub switched: Option<(usize, usize)>,
}

/// Fixed-capacity request buffer implementing the write, priority-eviction,
/// and packet-selection disciplines.
///
/// Slot indices carry no priority of their own; they only break ties after
/// source priority and arrival time have been compared.
#[derive(Debug, Clone)]
pub struct Buffer {
    slots: Vec<Option<Slot>>,
    occupied: usize,
    /// Active packet of the selection discipline.
    packet: Option<usize>,
}

impl Buffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity],
            occupied: 0,
            packet: None,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.occupied
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.occupied == 0
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.occupied == self.slots.len()
    }

    /// Slots in index order, for snapshots and audits.
    #[inline]
    pub fn slots(&self) -> &[Option<Slot>] {
        &self.slots
    }

    /// Active packet of the selection discipline, if one is set.
    #[inline]
    pub fn packet(&self) -> Option<usize> {
        self.packet
    }

    /// Number of slots actually holding a request. Equals [`Buffer::len`]
    /// unless the occupancy invariant is broken.
    pub fn count_occupied(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Write discipline: stores the request in the lowest-indexed empty
    /// slot and returns its index, or `None` when the buffer is full.
    pub fn write(&mut self, source: usize, arrival: f64) -> Option<usize> {
        let index = self.slots.iter().position(|slot| slot.is_none())?;
        self.slots[index] = Some(Slot { source, arrival });
        self.occupied += 1;
        Some(index)
    }

    /// Eviction discipline ("priority knockout"): removes the buffered
    /// request with the numerically largest source id (lowest priority),
    /// breaking ties by earliest arrival, then lowest slot index, and
    /// stores the arriving request in the freed slot.
    ///
    /// Returns `None` only when there is nothing to evict; callers invoke
    /// this with a full, non-empty buffer.
    pub fn evict(&mut self, source: usize, arrival: f64) -> Option<Eviction> {
        let mut victim: Option<(usize, Slot)> = None;
        for (index, slot) in self.slots.iter().enumerate() {
            if let Some(request) = slot {
                let lower_priority = match victim {
                    None => true,
                    Some((_, v)) => {
                        request.source > v.source
                            || (request.source == v.source && request.arrival < v.arrival)
                    }
                };
                if lower_priority {
                    victim = Some((index, *request));
                }
            }
        }
        let (index, knocked_out) = victim?;
        self.slots[index] = Some(Slot { source, arrival });
        Some(Eviction {
            slot: index,
            victim_source: knocked_out.source,
            victim_arrival: knocked_out.arrival,
        })
    }

    /// Packet selection discipline: keeps serving the active packet while
    /// it has buffered members; otherwise switches to the highest-priority
    /// source with buffered requests. Within the packet, the earliest
    /// arrival is served first. The chosen slot becomes empty.
    pub fn select(&mut self) -> Option<Selection> {
        if self.occupied == 0 {
            self.packet = None;
            return None;
        }
        let previous = self.packet;
        let active = match previous.filter(|packet| self.holds_source(*packet)) {
            Some(packet) => packet,
            None => self.highest_priority_source()?,
        };
        self.packet = Some(active);
        let switched = match previous {
            Some(old) if old != active => Some((old, active)),
            _ => None,
        };

        let mut chosen: Option<(usize, f64)> = None;
        for (index, slot) in self.slots.iter().enumerate() {
            if let Some(request) = slot {
                if request.source == active
                    && chosen.map_or(true, |(_, arrival)| request.arrival < arrival)
                {
                    chosen = Some((index, request.arrival));
                }
            }
        }
        let (index, _) = chosen?;
        let request = self.slots[index].take()?;
        self.occupied -= 1;
        Some(Selection {
            slot: index,
            source: request.source,
            arrival: request.arrival,
            switched,
        })
    }

    fn holds_source(&self, source: usize) -> bool {
        self.slots
            .iter()
            .flatten()
            .any(|request| request.source == source)
    }

    fn highest_priority_source(&self) -> Option<usize> {
        self.slots.iter().flatten().map(|request| request.source).min()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(capacity: usize, requests: &[(usize, f64)]) -> Buffer {
        let mut buffer = Buffer::new(capacity);
        for &(source, arrival) in requests {
            buffer.write(source, arrival).unwrap();
        }
        buffer
    }

    #[test]
    fn test_write_uses_lowest_empty_slot() {
        let mut buffer = Buffer::new(3);
        assert_eq!(Some(0), buffer.write(0, 1.0));
        assert_eq!(Some(1), buffer.write(1, 2.0));
        // free slot 0, next write must reuse it
        buffer.select().unwrap();
        assert_eq!(Some(0), buffer.write(1, 3.0));
        assert_eq!(2, buffer.len());
        assert_eq!(buffer.len(), buffer.count_occupied());
    }

    #[test]
    fn test_write_full_returns_none() {
        let mut buffer = filled(2, &[(0, 1.0), (1, 2.0)]);
        assert!(buffer.is_full());
        assert_eq!(None, buffer.write(0, 3.0));
        assert_eq!(2, buffer.len());
    }

    #[test]
    fn test_evict_lowest_priority_oldest() {
        // source 2 is the lowest-priority occupant; its oldest request loses
        let mut buffer = filled(4, &[(0, 1.0), (2, 3.0), (2, 2.0), (1, 0.5)]);
        let eviction = buffer.evict(0, 5.0).unwrap();
        assert_eq!(2, eviction.victim_source);
        assert_eq!(2.0, eviction.victim_arrival);
        assert_eq!(2, eviction.slot);
        assert_eq!(Some(Slot { source: 0, arrival: 5.0 }), buffer.slots()[2]);
        assert!(buffer.is_full());
    }

    #[test]
    fn test_evict_scenario_capacity_one() {
        // capacity 1 holding (source 1, t=2.0); arrival from source 0 at t=3.0
        let mut buffer = filled(1, &[(1, 2.0)]);
        let eviction = buffer.evict(0, 3.0).unwrap();
        assert_eq!(1, eviction.victim_source);
        assert_eq!(2.0, eviction.victim_arrival);
        assert_eq!(Some(Slot { source: 0, arrival: 3.0 }), buffer.slots()[0]);
    }

    #[test]
    fn test_evict_admits_lowest_priority_arrival() {
        // the arriving request is itself least important; a buffered one
        // still gets knocked out
        let mut buffer = filled(2, &[(1, 1.0), (1, 2.0)]);
        let eviction = buffer.evict(1, 3.0).unwrap();
        assert_eq!(1, eviction.victim_source);
        assert_eq!(1.0, eviction.victim_arrival);
        assert_eq!(2, buffer.len());
    }

    #[test]
    fn test_evict_empty_returns_none() {
        let mut buffer = Buffer::new(2);
        assert_eq!(None, buffer.evict(0, 1.0));
    }

    #[test]
    fn test_select_prefers_highest_priority_packet() {
        let mut buffer = filled(3, &[(1, 1.0), (0, 2.0), (1, 3.0)]);
        let selection = buffer.select().unwrap();
        assert_eq!(0, selection.source);
        assert_eq!(Some(0), buffer.packet());
        // no previous packet, so no switch is reported
        assert_eq!(None, selection.switched);
    }

    #[test]
    fn test_select_sticks_to_active_packet() {
        let mut buffer = filled(4, &[(1, 1.0), (1, 2.0)]);
        assert_eq!(1, buffer.select().unwrap().source);
        // a higher-priority request shows up while packet 1 is active
        buffer.write(0, 3.0).unwrap();
        let selection = buffer.select().unwrap();
        assert_eq!(1, selection.source);
        assert_eq!(2.0, selection.arrival);
        // packet 1 exhausted; now the discipline switches
        let selection = buffer.select().unwrap();
        assert_eq!(0, selection.source);
        assert_eq!(Some((1, 0)), selection.switched);
    }

    #[test]
    fn test_select_fifo_within_packet() {
        let mut buffer = filled(3, &[(0, 3.0), (0, 1.0), (0, 2.0)]);
        assert_eq!(1.0, buffer.select().unwrap().arrival);
        assert_eq!(2.0, buffer.select().unwrap().arrival);
        assert_eq!(3.0, buffer.select().unwrap().arrival);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_select_empty_returns_none() {
        let mut buffer = filled(2, &[(0, 1.0)]);
        buffer.select().unwrap();
        assert_eq!(None, buffer.select());
        assert_eq!(None, buffer.packet());
    }

    #[test]
    fn test_occupied_count_tracks_slots() {
        let mut buffer = filled(4, &[(0, 1.0), (1, 2.0), (0, 3.0)]);
        buffer.select().unwrap();
        buffer.write(1, 4.0).unwrap();
        buffer.select().unwrap();
        assert_eq!(buffer.count_occupied(), buffer.len());
        assert!(buffer.len() <= buffer.capacity());
    }
}
