//! # MockSockets Bridge
//!
//! The connection registry: a process-wide mapping from normalized endpoint
//! to mock server and attached client sockets, plus the deferred task queue
//! that drives connection attempts.

pub mod bridge;

pub use bridge::NetworkBridge;
pub use crate::core::*;
pub use crate::traits::*;
