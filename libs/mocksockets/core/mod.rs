//! # Core components
//!
//! The pieces the behavioral double is assembled from:
//!
//! - **ready_state**: the four-valued connection lifecycle enum and its
//!   atomic wrapper
//! - **event / event_target**: immutable event value objects and the
//!   listener table every socket and server composes
//! - **url**: endpoint normalization (the registry key)
//! - **scheduler**: the run-once deferred task queue that stands in for the
//!   browser's microtask scheduling
//! - **socket**: the client-side state machine (`MockSocket`)
//! - **server**: the mock server collaborator (`MockServer`)

pub mod event;
pub mod event_target;
pub mod ready_state;
pub mod scheduler;
pub mod server;
pub mod socket;
pub mod url;

// Re-export main types
pub use event::{
    close_code, CloseEvent, ErrorEvent, Event, EventKind, EventPayload, MessageData, MessageEvent,
};
pub use event_target::{EventTarget, ListenerFn, ListenerId};
pub use ready_state::{AtomicReadyState, ReadyState};
pub use server::{MockServer, ServerOptions};
pub use socket::{BinaryType, MockSocket};
pub use url::normalize_url;

// Re-export traits for convenience
pub use crate::traits::*;
