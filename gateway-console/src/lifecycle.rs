//! Per-view request generations and exclusively owned render instances.

use std::cell::Cell;
use std::rc::Rc;

// ── Request generations ──────────────────────────────────────────────────────

/// Issues monotonically increasing tickets for one view instance.
///
/// Only the response holding the latest ticket may touch view state; older
/// responses that resolve late are dropped. Clones share the same counter so
/// the handle can move into spawned futures.
#[derive(Clone, Debug, Default)]
pub struct RequestTracker {
    latest: Rc<Cell<u64>>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RequestTicket(u64);

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self) -> RequestTicket {
        let next = self.latest.get().wrapping_add(1);
        self.latest.set(next);
        RequestTicket(next)
    }

    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        self.latest.get() == ticket.0
    }

    /// Invalidate every outstanding ticket without issuing a new one.
    pub fn abandon(&self) {
        self.latest.set(self.latest.get().wrapping_add(1));
    }
}

// ── Render slots ─────────────────────────────────────────────────────────────

/// Holds at most one render instance (chart, graph scene) for a mount point.
///
/// `mount` drops the previous instance before the new one is installed and
/// bumps `revision`; views key the mounted element on the revision so the old
/// DOM subtree is discarded instead of patched.
#[derive(Debug)]
pub struct RenderSlot<T> {
    current: Option<T>,
    revision: u64,
}

impl<T> Default for RenderSlot<T> {
    fn default() -> Self {
        Self {
            current: None,
            revision: 0,
        }
    }
}

impl<T> RenderSlot<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mount(&mut self, instance: T) -> u64 {
        drop(self.current.take());
        self.current = Some(instance);
        self.revision += 1;
        self.revision
    }

    pub fn clear(&mut self) {
        drop(self.current.take());
    }

    pub fn current(&self) -> Option<&T> {
        self.current.as_ref()
    }

    pub fn is_mounted(&self) -> bool {
        self.current.is_some()
    }

    /// Number of instances mounted over the slot's lifetime
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn element_key(&self) -> String {
        format!("slot-{}", self.revision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_latest_ticket_is_current() {
        let tracker = RequestTracker::new();
        let first = tracker.issue();
        let second = tracker.issue();
        assert!(!tracker.is_current(first), "stale ticket must be rejected");
        assert!(tracker.is_current(second));
    }

    #[test]
    fn test_clones_share_generation() {
        let tracker = RequestTracker::new();
        let in_flight = tracker.clone();
        let ticket = in_flight.issue();
        tracker.issue();
        assert!(!in_flight.is_current(ticket));
    }

    #[test]
    fn test_abandon_invalidates_outstanding() {
        let tracker = RequestTracker::new();
        let ticket = tracker.issue();
        tracker.abandon();
        assert!(!tracker.is_current(ticket));
    }

    struct Probe {
        live: Rc<Cell<i32>>,
    }

    impl Probe {
        fn new(live: &Rc<Cell<i32>>) -> Self {
            live.set(live.get() + 1);
            Self { live: live.clone() }
        }
    }

    impl Drop for Probe {
        fn drop(&mut self) {
            self.live.set(self.live.get() - 1);
        }
    }

    #[test]
    fn test_mount_tears_down_previous_instance() {
        let live = Rc::new(Cell::new(0));
        let mut slot = RenderSlot::new();
        slot.mount(Probe::new(&live));
        assert_eq!(live.get(), 1);

        // Constructed before mount, so two exist until the old one is dropped.
        let next = Probe::new(&live);
        assert_eq!(live.get(), 2);
        slot.mount(next);
        assert_eq!(live.get(), 1, "exactly one instance may stay bound");
        assert_eq!(slot.revision(), 2);

        slot.clear();
        assert_eq!(live.get(), 0);
        assert!(!slot.is_mounted());
        assert_eq!(slot.revision(), 2);
    }

    #[test]
    fn test_element_key_changes_per_mount() {
        let mut slot = RenderSlot::new();
        let before = slot.element_key();
        slot.mount(1_u8);
        assert_ne!(before, slot.element_key());
    }
}
