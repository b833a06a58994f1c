use crate::core::event::{Event, EventKind};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::debug;

/// Type alias for a registered callback
pub type ListenerFn = dyn Fn(&Event) + Send + Sync;

/// Handle identifying a single listener registration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerId(u64);

/// Global registration counter; ids are unique across all targets
static NEXT_LISTENER_ID: AtomicU64 = AtomicU64::new(1);

struct ListenerEntry {
    id: ListenerId,
    /// Entries written through an `on_*` property; at most one per kind
    slot: bool,
    callback: Arc<ListenerFn>,
}

/// The listener table every socket and server composes
///
/// One ordered list per event kind. Multi-listener registrations
/// (`add_listener`) and the single-slot `on_*` property (`set_handler`)
/// share the list, so both surfaces observe dispatched events identically
/// and in registration order relative to each other.
#[derive(Default)]
pub struct EventTarget {
    table: RwLock<HashMap<EventKind, Vec<ListenerEntry>>>,
}

impl EventTarget {
    /// Create an empty listener table
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback for an event kind
    pub fn add_listener<F>(&self, kind: EventKind, callback: F) -> ListenerId
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        self.push_entry(kind, Arc::new(callback), false)
    }

    /// Remove a registration by id
    ///
    /// Returns whether an entry was actually removed. Removing the entry
    /// behind an `on_*` property clears that property.
    pub fn remove_listener(&self, kind: EventKind, id: ListenerId) -> bool {
        let mut table = self.table.write();
        if let Some(entries) = table.get_mut(&kind) {
            let before = entries.len();
            entries.retain(|entry| entry.id != id);
            return entries.len() < before;
        }
        false
    }

    /// Assign the single-slot handler for an event kind
    ///
    /// Overwrites any previous property assignment for the kind; the new
    /// handler takes the position of a fresh registration. Listeners added
    /// through `add_listener` are unaffected.
    pub fn set_handler<F>(&self, kind: EventKind, callback: F) -> ListenerId
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        self.clear_handler(kind);
        self.push_entry(kind, Arc::new(callback), true)
    }

    /// Read the currently assigned single-slot handler, if any
    pub fn handler(&self, kind: EventKind) -> Option<Arc<ListenerFn>> {
        let table = self.table.read();
        table
            .get(&kind)?
            .iter()
            .find(|entry| entry.slot)
            .map(|entry| Arc::clone(&entry.callback))
    }

    /// Clear the single-slot handler for an event kind
    pub fn clear_handler(&self, kind: EventKind) {
        let mut table = self.table.write();
        if let Some(entries) = table.get_mut(&kind) {
            entries.retain(|entry| !entry.slot);
        }
    }

    /// Dispatch an event to every listener registered for its kind
    ///
    /// The callback list is snapshotted before invocation; callbacks run
    /// without the table lock held, so they may re-enter the target (or the
    /// socket that owns it) freely.
    pub fn dispatch(&self, event: &Event) {
        let kind = event.kind();
        let callbacks: Vec<Arc<ListenerFn>> = {
            let table = self.table.read();
            match table.get(&kind) {
                Some(entries) => entries
                    .iter()
                    .map(|entry| Arc::clone(&entry.callback))
                    .collect(),
                None => Vec::new(),
            }
        };

        debug!(
            "dispatching '{}' on {} to {} listener(s)",
            kind.as_str(),
            event.target,
            callbacks.len()
        );

        for callback in callbacks {
            callback(event);
        }
    }

    /// Number of registrations for an event kind (slot included)
    pub fn listener_count(&self, kind: EventKind) -> usize {
        let table = self.table.read();
        table.get(&kind).map_or(0, |entries| entries.len())
    }

    fn push_entry(&self, kind: EventKind, callback: Arc<ListenerFn>, slot: bool) -> ListenerId {
        let id = ListenerId(NEXT_LISTENER_ID.fetch_add(1, Ordering::Relaxed));
        let mut table = self.table.write();
        table.entry(kind).or_default().push(ListenerEntry {
            id,
            slot,
            callback,
        });
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::event::EventPayload;
    use parking_lot::Mutex;

    fn open_event() -> Event {
        Event::new("ws://host/", EventPayload::Open)
    }

    #[test]
    fn test_listeners_fire_in_registration_order() {
        let target = EventTarget::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        for label in ["first", "second", "third"] {
            let seen = Arc::clone(&seen);
            target.add_listener(EventKind::Open, move |_| seen.lock().push(label));
        }

        target.dispatch(&open_event());
        assert_eq!(*seen.lock(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_remove_listener_stops_delivery() {
        let target = EventTarget::new();
        let seen = Arc::new(Mutex::new(0u32));

        let seen_clone = Arc::clone(&seen);
        let id = target.add_listener(EventKind::Open, move |_| *seen_clone.lock() += 1);

        target.dispatch(&open_event());
        assert!(target.remove_listener(EventKind::Open, id));
        assert!(!target.remove_listener(EventKind::Open, id));
        target.dispatch(&open_event());

        assert_eq!(*seen.lock(), 1);
    }

    #[test]
    fn test_slot_reassignment_overwrites() {
        let target = EventTarget::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let seen_a = Arc::clone(&seen);
        target.set_handler(EventKind::Open, move |_| seen_a.lock().push("a"));
        let seen_b = Arc::clone(&seen);
        target.set_handler(EventKind::Open, move |_| seen_b.lock().push("b"));

        assert!(target.handler(EventKind::Open).is_some());
        assert_eq!(target.listener_count(EventKind::Open), 1);

        target.dispatch(&open_event());
        assert_eq!(*seen.lock(), vec!["b"]);
    }

    #[test]
    fn test_slot_and_listeners_share_one_ordered_table() {
        let target = EventTarget::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let seen_l = Arc::clone(&seen);
        target.add_listener(EventKind::Open, move |_| seen_l.lock().push("listener"));
        let seen_s = Arc::clone(&seen);
        target.set_handler(EventKind::Open, move |_| seen_s.lock().push("slot"));

        target.dispatch(&open_event());
        assert_eq!(*seen.lock(), vec!["listener", "slot"]);
    }

    #[test]
    fn test_listener_may_reenter_target_during_dispatch() {
        let target = Arc::new(EventTarget::new());
        let seen = Arc::new(Mutex::new(0u32));

        let target_clone = Arc::clone(&target);
        let seen_clone = Arc::clone(&seen);
        target.add_listener(EventKind::Open, move |_| {
            // Registering from inside a callback must not deadlock.
            let seen_inner = Arc::clone(&seen_clone);
            target_clone.add_listener(EventKind::Close, move |_| *seen_inner.lock() += 1);
        });

        target.dispatch(&open_event());
        assert_eq!(target.listener_count(EventKind::Close), 1);
    }
}
