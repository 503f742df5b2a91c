/// Identifies the one frame callback a host has pending for a loop.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct FrameTicket(pub u64);

/// Host-side frame scheduling, e.g. `requestAnimationFrame`.
///
/// A callback requested with [`FrameHost::request_frame`] fires at most once;
/// [`FrameHost::cancel_frame`] guarantees it never fires.
pub trait FrameHost {
    fn request_frame(&mut self) -> FrameTicket;
    fn cancel_frame(&mut self, ticket: FrameTicket);
}

/// Deterministic frame host: callbacks fire only when the caller pops them.
#[derive(Debug, Default)]
pub struct ManualFrameHost {
    next_ticket: u64,
    pending: Vec<FrameTicket>,
    requested: u64,
    cancelled: u64,
}

impl ManualFrameHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Callbacks that would fire on the next display refresh, oldest first.
    pub fn pending(&self) -> &[FrameTicket] {
        &self.pending
    }

    /// Fire the oldest pending callback.
    pub fn fire(&mut self) -> Option<FrameTicket> {
        if self.pending.is_empty() {
            None
        } else {
            Some(self.pending.remove(0))
        }
    }

    pub fn requested_count(&self) -> u64 {
        self.requested
    }

    pub fn cancelled_count(&self) -> u64 {
        self.cancelled
    }
}

impl FrameHost for ManualFrameHost {
    fn request_frame(&mut self) -> FrameTicket {
        let ticket = FrameTicket(self.next_ticket);
        self.next_ticket = self.next_ticket.wrapping_add(1);
        self.requested += 1;
        self.pending.push(ticket);
        ticket
    }

    fn cancel_frame(&mut self, ticket: FrameTicket) {
        let before = self.pending.len();
        self.pending.retain(|t| *t != ticket);
        if self.pending.len() != before {
            self.cancelled += 1;
        }
    }
}
