//! # MockSockets Traits
//!
//! Core traits and types for the MockSockets behavioral double:
//!
//! - **MockSocketError**: the error taxonomy for programmer errors
//!   (connection-level failures are reported through events, never errors)
//! - **EventDispatch**: the three-method event capability implemented by
//!   every socket and server
//! - **VerifyClient**: the optional server-side admission predicate

pub mod dispatch;
pub mod error;
pub mod verify;

// Re-export commonly used types
pub use dispatch::EventDispatch;
pub use error::{ErrorKind, MockSocketError, Result};
pub use verify::{AcceptAll, VerifyClient};
