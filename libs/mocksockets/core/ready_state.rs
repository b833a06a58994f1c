use std::sync::atomic::{AtomicU8, Ordering};

/// Connection lifecycle state of a socket
///
/// The numeric values match the browser's `WebSocket.readyState` constants.
/// A socket only ever moves forward through this sequence; CLOSING is
/// transient and the visible close path moves directly OPEN → CLOSED.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ReadyState {
    /// Constructed, connection attempt not yet run
    Connecting = 0,
    /// Connected to a server through the bridge
    Open = 1,
    /// Close in progress (not reached by the visible close path)
    Closing = 2,
    /// Terminal; the socket never re-registers
    Closed = 3,
}

impl ReadyState {
    /// Get the numeric readyState value
    #[inline]
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Convert a stored numeric value back to the enum
    fn from_u8(value: u8) -> ReadyState {
        match value {
            0 => ReadyState::Connecting,
            1 => ReadyState::Open,
            2 => ReadyState::Closing,
            _ => ReadyState::Closed,
        }
    }

    /// Check if the state is CONNECTING
    #[inline]
    pub fn is_connecting(self) -> bool {
        self == ReadyState::Connecting
    }

    /// Check if the state is OPEN
    #[inline]
    pub fn is_open(self) -> bool {
        self == ReadyState::Open
    }

    /// Check if the state is CLOSING or CLOSED
    #[inline]
    pub fn is_closing_or_closed(self) -> bool {
        matches!(self, ReadyState::Closing | ReadyState::Closed)
    }

    /// Check if the state is CLOSED
    #[inline]
    pub fn is_closed(self) -> bool {
        self == ReadyState::Closed
    }

    /// Human-readable name, as logged
    pub fn as_str(self) -> &'static str {
        match self {
            ReadyState::Connecting => "CONNECTING",
            ReadyState::Open => "OPEN",
            ReadyState::Closing => "CLOSING",
            ReadyState::Closed => "CLOSED",
        }
    }
}

/// Atomic wrapper around `ReadyState`
///
/// Allows lock-free reads of the lifecycle state from listener callbacks
/// while a transition is in progress elsewhere on the handle.
pub struct AtomicReadyState(AtomicU8);

impl AtomicReadyState {
    /// Create a new atomic state with the given initial value
    pub fn new(initial: ReadyState) -> Self {
        Self(AtomicU8::new(initial.as_u8()))
    }

    /// Get the current state
    #[inline]
    pub fn get(&self) -> ReadyState {
        ReadyState::from_u8(self.0.load(Ordering::Acquire))
    }

    /// Set the state
    pub fn set(&self, state: ReadyState) {
        self.0.store(state.as_u8(), Ordering::Release);
    }

    /// Check if the current state is OPEN
    #[inline]
    pub fn is_open(&self) -> bool {
        self.get().is_open()
    }

    /// Check if the current state is CLOSED
    #[inline]
    pub fn is_closed(&self) -> bool {
        self.get().is_closed()
    }
}

impl Default for AtomicReadyState {
    fn default() -> Self {
        Self::new(ReadyState::Connecting)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_values_match_browser_constants() {
        assert_eq!(ReadyState::Connecting.as_u8(), 0);
        assert_eq!(ReadyState::Open.as_u8(), 1);
        assert_eq!(ReadyState::Closing.as_u8(), 2);
        assert_eq!(ReadyState::Closed.as_u8(), 3);
    }

    #[test]
    fn test_atomic_lifecycle_walk() {
        let state = AtomicReadyState::default();
        assert!(state.get().is_connecting());

        state.set(ReadyState::Open);
        assert!(state.is_open());
        assert!(!state.get().is_closing_or_closed());

        state.set(ReadyState::Closed);
        assert!(state.is_closed());
        assert!(state.get().is_closing_or_closed());
    }

    #[test]
    fn test_as_str() {
        assert_eq!(ReadyState::Connecting.as_str(), "CONNECTING");
        assert_eq!(ReadyState::Closed.as_str(), "CLOSED");
    }
}
