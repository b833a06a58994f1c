//! Common test utilities for MockSockets integration tests
//!
//! Provides an event recorder that can observe sockets and servers through
//! the same listener surface application code uses.

use mocksockets::{Event, EventDispatch, EventKind, MockServer, MockSocket};
use parking_lot::Mutex;
use std::sync::Arc;

/// Macro for verbose test output (controlled by TEST_VERBOSE env var)
#[macro_export]
macro_rules! verbose_println {
    ($($arg:tt)*) => {
        if std::env::var("TEST_VERBOSE").is_ok() {
            println!($($arg)*);
        }
    };
}

/// Install a log subscriber for verbose runs (TEST_VERBOSE + RUST_LOG)
pub fn init_tracing() {
    if std::env::var("TEST_VERBOSE").is_ok() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    }
}

/// Records every event it observes, in dispatch order
///
/// Clones share one underlying log, so a single recorder can observe a
/// server and a socket at once and capture their relative event order.
#[derive(Clone, Default)]
pub struct EventRecorder {
    events: Arc<Mutex<Vec<Event>>>,
}

impl EventRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Observe the four client-side event kinds on a socket
    pub fn observe_socket(&self, socket: &MockSocket) {
        for kind in [
            EventKind::Open,
            EventKind::Message,
            EventKind::Close,
            EventKind::Error,
        ] {
            let recorder = self.clone();
            socket.add_event_listener(kind, move |event| recorder.record(event));
        }
    }

    /// Observe the server-side event kinds on a server
    pub fn observe_server(&self, server: &MockServer) {
        for kind in [EventKind::Connection, EventKind::Message, EventKind::Close] {
            let recorder = self.clone();
            server.add_event_listener(kind, move |event| recorder.record(event));
        }
    }

    pub fn record(&self, event: &Event) {
        self.events.lock().push(event.clone());
    }

    /// Snapshot of the recorded events
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().clone()
    }

    /// The recorded event type names, in order
    pub fn kinds(&self) -> Vec<&'static str> {
        self.events
            .lock()
            .iter()
            .map(|event| event.kind().as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }
}
