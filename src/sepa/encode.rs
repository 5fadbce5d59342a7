//! Latest-only slot for asynchronously rendered payload graphics.
//!
//! Rendering a payload into a scannable image may run off the editing
//! thread. Each render request takes a ticket; a result is kept only if its
//! ticket is still the newest one when it completes, so an out-of-date code
//! is never shown.

use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

/// Identifies one render request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EncodeTicket(u64);

#[derive(Debug)]
struct Rendered<T> {
    generation: u64,
    value: Option<T>,
}

/// Holds the render result for the most recent request only.
#[derive(Debug)]
pub struct EncodeSlot<T> {
    generation: AtomicU64,
    rendered: Mutex<Rendered<T>>,
}

impl<T: Clone> EncodeSlot<T> {
    pub fn new() -> Self {
        Self {
            generation: AtomicU64::new(0),
            rendered: Mutex::new(Rendered {
                generation: 0,
                value: None,
            }),
        }
    }

    /// Start a new render. Supersedes every earlier ticket.
    pub fn request(&self) -> EncodeTicket {
        EncodeTicket(self.generation.fetch_add(1, Ordering::AcqRel) + 1)
    }

    /// Whether `ticket` is still the newest request. Encoders may poll this
    /// to abandon stale work early.
    pub fn is_current(&self, ticket: EncodeTicket) -> bool {
        self.generation.load(Ordering::Acquire) == ticket.0
    }

    /// Drop any shown result, e.g. when banking details were cleared.
    /// Pending renders are superseded as well.
    pub fn clear(&self) {
        let ticket = self.request();
        let mut rendered = self.lock();
        rendered.generation = ticket.0;
        rendered.value = None;
    }

    /// Store the result of `ticket`. Returns `false` (and discards `value`)
    /// if a newer request exists.
    pub fn fulfil(&self, ticket: EncodeTicket, value: T) -> bool {
        let mut rendered = self.lock();
        if !self.is_current(ticket) || ticket.0 < rendered.generation {
            tracing::debug!(ticket = ticket.0, "discarding stale payload render");
            return false;
        }
        rendered.generation = ticket.0;
        rendered.value = Some(value);
        true
    }

    /// The newest stored result, if any.
    pub fn latest(&self) -> Option<T> {
        self.lock().value.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Rendered<T>> {
        // A panic while holding the lock leaves plain data behind; keep using it.
        self.rendered
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<T: Clone> Default for EncodeSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_ticket_wins() {
        let slot = EncodeSlot::new();
        let first = slot.request();
        let second = slot.request();
        assert!(!slot.is_current(first));
        assert!(slot.is_current(second));

        assert!(slot.fulfil(second, "new"));
        assert!(!slot.fulfil(first, "old"));
        assert_eq!(slot.latest(), Some("new"));
    }

    #[test]
    fn stale_result_before_new_one_is_dropped() {
        let slot = EncodeSlot::new();
        let first = slot.request();
        let _second = slot.request();
        assert!(!slot.fulfil(first, 1));
        assert_eq!(slot.latest(), None);
    }

    #[test]
    fn clear_supersedes_pending() {
        let slot = EncodeSlot::new();
        let t = slot.request();
        assert!(slot.fulfil(t, 1));
        let pending = slot.request();
        slot.clear();
        assert!(!slot.fulfil(pending, 2));
        assert_eq!(slot.latest(), None);
    }
}
