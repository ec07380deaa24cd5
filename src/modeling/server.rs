/// One service unit.
///
/// `completion` is infinite exactly while the server is idle, so the event
/// calendar can treat idle servers as "never completing" candidates.
#[derive(Debug, Clone)]
pub struct Server {
    pub id: usize,
    /// Source id of the request in service, if any.
    pub occupant: Option<usize>,
    /// Completion time of the request in service; infinite while idle.
    pub completion: f64,
    pub processed: usize,
}

impl Server {
    pub fn new(id: usize) -> Self {
        Self {
            id,
            occupant: None,
            completion: f64::INFINITY,
            processed: 0,
        }
    }

    #[inline]
    pub fn is_busy(&self) -> bool {
        self.occupant.is_some()
    }

    /// Puts a request from `source` into service until `completion`.
    pub fn assign(&mut self, source: usize, completion: f64) {
        self.occupant = Some(source);
        self.completion = completion;
        self.processed += 1;
    }

    /// Returns the server to the idle state.
    pub fn release(&mut self) {
        self.occupant = None;
        self.completion = f64::INFINITY;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_iff_infinite_completion() {
        let mut server = Server::new(0);
        assert!(!server.is_busy());
        assert_eq!(f64::INFINITY, server.completion);

        server.assign(1, 4.2);
        assert!(server.is_busy());
        assert_eq!(Some(1), server.occupant);
        assert_eq!(4.2, server.completion);
        assert_eq!(1, server.processed);

        server.release();
        assert!(!server.is_busy());
        assert_eq!(f64::INFINITY, server.completion);
        assert_eq!(1, server.processed);
    }
}
