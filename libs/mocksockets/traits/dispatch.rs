use crate::core::event::{Event, EventKind};
use crate::core::event_target::{EventTarget, ListenerId};

/// The event capability shared by every socket and server
///
/// Both `MockSocket` and `MockServer` are "event targets": they hold an
/// owned listener table and expose the same three-method registration and
/// dispatch contract over it. Composition replaces the inheritance the
/// browser API implies — implementors only provide access to their table.
pub trait EventDispatch {
    /// Access the underlying listener table
    fn event_target(&self) -> &EventTarget;

    /// Register a callback for an event kind
    ///
    /// Callbacks for one kind fire in registration order. The returned id
    /// removes exactly this registration.
    fn add_event_listener<F>(&self, kind: EventKind, callback: F) -> ListenerId
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        self.event_target().add_listener(kind, callback)
    }

    /// Remove a previously registered callback
    ///
    /// # Returns
    /// * `true` - The listener was present and has been removed
    /// * `false` - No listener with that id was registered for the kind
    fn remove_event_listener(&self, kind: EventKind, id: ListenerId) -> bool {
        self.event_target().remove_listener(kind, id)
    }

    /// Dispatch an event to every listener registered for its kind
    ///
    /// Dispatch is synchronous. Listeners may re-enter the target (for
    /// example an `on_open` callback calling `send`); the table is not
    /// locked while callbacks run.
    fn dispatch_event(&self, event: &Event) {
        self.event_target().dispatch(event);
    }
}
