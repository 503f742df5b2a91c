use crate::listeners::{INPUT_EVENTS, InputHost, ListenerSet};
use crate::scheduler::{FrameHost, FrameTicket, ManualFrameHost};

/// Host without a display: frames fire on demand and listeners are bookkeeping only.
///
/// Used by the command-line renderer and by tests that drive a globe end to end.
#[derive(Debug, Default)]
pub struct HeadlessHost {
    pub frames: ManualFrameHost,
    listeners: ListenerSet<()>,
}

impl HeadlessHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// A host with the standard pointer/touch/wheel listeners attached.
    pub fn with_input_listeners() -> Self {
        let mut host = Self::new();
        for event in INPUT_EVENTS {
            host.listeners.attach(event, ());
        }
        host
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl FrameHost for HeadlessHost {
    fn request_frame(&mut self) -> FrameTicket {
        self.frames.request_frame()
    }

    fn cancel_frame(&mut self, ticket: FrameTicket) {
        self.frames.cancel_frame(ticket);
    }
}

impl InputHost for HeadlessHost {
    fn detach_listeners(&mut self) -> usize {
        self.listeners.detach_all(|_, _| {})
    }
}

#[cfg(test)]
mod tests {
    use super::HeadlessHost;
    use crate::listeners::InputHost;
    use crate::scheduler::FrameHost;

    #[test]
    fn detaches_standard_listeners() {
        let mut host = HeadlessHost::with_input_listeners();
        assert_eq!(host.listener_count(), 8);
        assert_eq!(host.detach_listeners(), 8);
        assert_eq!(host.listener_count(), 0);
    }

    #[test]
    fn forwards_frames() {
        let mut host = HeadlessHost::new();
        let t = host.request_frame();
        assert_eq!(host.frames.pending(), &[t]);
        host.cancel_frame(t);
        assert!(host.frames.pending().is_empty());
    }
}
