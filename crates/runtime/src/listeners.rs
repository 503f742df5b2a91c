/// DOM-style event names a globe surface listens to.
pub const INPUT_EVENTS: [&str; 8] = [
    "mousedown",
    "mousemove",
    "mouseup",
    "mouseleave",
    "touchstart",
    "touchmove",
    "touchend",
    "wheel",
];

/// Event listeners attached to a host surface.
///
/// Listeners must be handed back to the host for removal; dropping a
/// non-empty set leaks them and is reported.
#[derive(Debug)]
pub struct ListenerSet<L> {
    entries: Vec<(&'static str, L)>,
}

impl<L> Default for ListenerSet<L> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<L> ListenerSet<L> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&mut self, event: &'static str, listener: L) {
        self.entries.push((event, listener));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Hand every listener to `detach` and forget it. Returns how many were detached.
    pub fn detach_all(&mut self, mut detach: impl FnMut(&'static str, L)) -> usize {
        let entries = std::mem::take(&mut self.entries);
        let count = entries.len();
        for (event, listener) in entries {
            detach(event, listener);
        }
        count
    }
}

impl<L> Drop for ListenerSet<L> {
    fn drop(&mut self) {
        if !self.entries.is_empty() {
            tracing::warn!(
                count = self.entries.len(),
                "event listeners dropped without being detached"
            );
        }
    }
}

/// Host that owns input listeners for a surface.
pub trait InputHost {
    /// Remove all listeners; returns how many were removed.
    fn detach_listeners(&mut self) -> usize;
}

#[cfg(test)]
mod tests {
    use super::{INPUT_EVENTS, ListenerSet};

    #[test]
    fn detach_all_hands_back_every_listener() {
        let mut set = ListenerSet::new();
        for (i, event) in INPUT_EVENTS.iter().enumerate() {
            set.attach(*event, i);
        }
        assert_eq!(set.len(), 8);

        let mut seen = Vec::new();
        let n = set.detach_all(|event, id| seen.push((event, id)));
        assert_eq!(n, 8);
        assert!(set.is_empty());
        assert_eq!(seen[0], ("mousedown", 0));
        assert_eq!(seen[7], ("wheel", 7));
    }

    #[test]
    fn second_detach_is_empty() {
        let mut set = ListenerSet::new();
        set.attach("wheel", ());
        assert_eq!(set.detach_all(|_, _| {}), 1);
        assert_eq!(set.detach_all(|_, _| {}), 0);
    }
}
