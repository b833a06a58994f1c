//! # MockSockets
//!
//! An in-process simulation of the WebSocket client/server protocol surface,
//! built so application code can be exercised in tests without a real
//! network socket.
//!
//! ## Features
//!
//! - **Browser-faithful client state machine**: `MockSocket` walks the same
//!   CONNECTING → OPEN → CLOSED lifecycle and emits the same event sequences
//!   a real `WebSocket` would, including the error/close pair on refused or
//!   rejected connections
//! - **Explicit network bridge**: servers and sockets meet through a
//!   `NetworkBridge` instance you own — no global singleton, no hidden state
//! - **Deterministic scheduling**: connection attempts are deferred onto a
//!   run-once task queue and executed only when you pump the bridge, so a
//!   test controls exactly when "the network" happens
//! - **Dual listener surface**: `addEventListener`-style multi-listener
//!   registration and single-slot `on_*` properties over one listener table
//!
//! ## Example
//!
//! ```rust,ignore
//! use mocksockets::{MockServer, MockSocket, NetworkBridge};
//!
//! let bridge = NetworkBridge::new();
//! let server = MockServer::start(&bridge, "ws://localhost:8080")?;
//! server.set_on_connection(|event| println!("client connected: {event:?}"));
//!
//! let socket = MockSocket::new(&bridge, "ws://localhost:8080")?;
//! socket.set_on_open(|_| println!("open!"));
//!
//! // Run the deferred connection attempt.
//! bridge.run_pending();
//!
//! socket.send("hello")?;
//! socket.close()?;
//! ```

pub mod bridge;
pub mod core;
pub mod traits;

// Re-export all traits
pub use traits::*;

// Re-export core functionality
pub use self::core::{
    event::{
        close_code, CloseEvent, ErrorEvent, Event, EventKind, EventPayload, MessageData,
        MessageEvent,
    },
    event_target::{EventTarget, ListenerFn, ListenerId},
    ready_state::{AtomicReadyState, ReadyState},
    server::{MockServer, ServerOptions},
    socket::{BinaryType, MockSocket},
    url::normalize_url,
};

// Re-export the bridge
pub use bridge::NetworkBridge;

/// Type alias for Result with MockSocketError
pub type Result<T> = std::result::Result<T, traits::MockSocketError>;
