use crate::core::socket::MockSocket;

/// Close codes recognized by an explicit `close` request
pub mod close_code {
    /// Normal closure; the only non-reserved code a caller may pass
    pub const NORMAL: u16 = 1000;
    /// Start of the application-reserved range
    pub const APP_RESERVED_MIN: u16 = 3000;
    /// End of the application-reserved range (inclusive)
    pub const APP_RESERVED_MAX: u16 = 4999;

    /// Check whether a caller-supplied close code is acceptable
    pub fn is_valid(code: u16) -> bool {
        code == NORMAL || (APP_RESERVED_MIN..=APP_RESERVED_MAX).contains(&code)
    }
}

/// The kinds of events a socket or server can observe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Connection established (socket-side)
    Open,
    /// Message delivered (server-side in this double)
    Message,
    /// Connection ended (both sides)
    Close,
    /// Connection-level failure (socket-side)
    Error,
    /// New client admitted (server-side)
    Connection,
}

impl EventKind {
    /// The event type string, matching the browser event names
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Open => "open",
            EventKind::Message => "message",
            EventKind::Close => "close",
            EventKind::Error => "error",
            EventKind::Connection => "connection",
        }
    }
}

/// Payload of a message event
///
/// Can be text or binary data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageData {
    Text(String),
    Binary(Vec<u8>),
}

impl MessageData {
    /// Get the data as text, if it is text
    pub fn as_text(&self) -> Option<&str> {
        match self {
            MessageData::Text(s) => Some(s),
            MessageData::Binary(_) => None,
        }
    }

    /// Get the data as binary, if it is binary
    pub fn as_binary(&self) -> Option<&[u8]> {
        match self {
            MessageData::Text(_) => None,
            MessageData::Binary(b) => Some(b),
        }
    }

    /// Check if the data is text
    pub fn is_text(&self) -> bool {
        matches!(self, MessageData::Text(_))
    }

    /// Check if the data is binary
    pub fn is_binary(&self) -> bool {
        matches!(self, MessageData::Binary(_))
    }
}

impl From<&str> for MessageData {
    fn from(value: &str) -> Self {
        MessageData::Text(value.to_string())
    }
}

impl From<String> for MessageData {
    fn from(value: String) -> Self {
        MessageData::Text(value)
    }
}

impl From<Vec<u8>> for MessageData {
    fn from(value: Vec<u8>) -> Self {
        MessageData::Binary(value)
    }
}

/// A delivered message: the data plus the endpoint it originated from
#[derive(Debug, Clone)]
pub struct MessageEvent {
    pub data: MessageData,
    pub origin: String,
}

/// A connection ending
///
/// `was_clean` follows the reference behavior: it reports whether the
/// carried code is the normal-closure code, for failure-path closes too.
#[derive(Debug, Clone)]
pub struct CloseEvent {
    pub code: u16,
    pub reason: String,
    pub was_clean: bool,
}

impl CloseEvent {
    /// Build a close event for the given code and optional reason
    pub fn new(code: u16, reason: impl Into<String>) -> Self {
        Self {
            code,
            reason: reason.into(),
            was_clean: code == close_code::NORMAL,
        }
    }
}

/// A connection-level failure report
#[derive(Debug, Clone)]
pub struct ErrorEvent {
    pub message: String,
}

/// Type-specific event payload
#[derive(Debug, Clone)]
pub enum EventPayload {
    Open,
    Message(MessageEvent),
    Close(CloseEvent),
    Error(ErrorEvent),
    /// A newly admitted client; the dispatching server is the event target
    Connection(MockSocket),
}

/// An immutable event value object
///
/// `target` is the normalized endpoint of the socket or server the event
/// was dispatched on. Listeners receive events by shared reference and must
/// not rely on being the only observer.
#[derive(Debug, Clone)]
pub struct Event {
    pub target: String,
    pub payload: EventPayload,
}

impl Event {
    /// Build an event targeting `target`
    pub fn new(target: impl Into<String>, payload: EventPayload) -> Self {
        Self {
            target: target.into(),
            payload,
        }
    }

    /// The kind this event dispatches under
    pub fn kind(&self) -> EventKind {
        match self.payload {
            EventPayload::Open => EventKind::Open,
            EventPayload::Message(_) => EventKind::Message,
            EventPayload::Close(_) => EventKind::Close,
            EventPayload::Error(_) => EventKind::Error,
            EventPayload::Connection(_) => EventKind::Connection,
        }
    }

    /// The message payload, if this is a message event
    pub fn as_message(&self) -> Option<&MessageEvent> {
        match &self.payload {
            EventPayload::Message(m) => Some(m),
            _ => None,
        }
    }

    /// The close payload, if this is a close event
    pub fn as_close(&self) -> Option<&CloseEvent> {
        match &self.payload {
            EventPayload::Close(c) => Some(c),
            _ => None,
        }
    }

    /// The connecting socket, if this is a connection event
    pub fn as_connection(&self) -> Option<&MockSocket> {
        match &self.payload {
            EventPayload::Connection(s) => Some(s),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_close_code_validation() {
        assert!(close_code::is_valid(1000));
        assert!(close_code::is_valid(3000));
        assert!(close_code::is_valid(4000));
        assert!(close_code::is_valid(4999));

        assert!(!close_code::is_valid(0));
        assert!(!close_code::is_valid(1001));
        assert!(!close_code::is_valid(2000));
        assert!(!close_code::is_valid(2999));
        assert!(!close_code::is_valid(5000));
    }

    #[test]
    fn test_close_event_was_clean_tracks_code() {
        assert!(CloseEvent::new(close_code::NORMAL, "").was_clean);
        assert!(!CloseEvent::new(4000, "going away").was_clean);
    }

    #[test]
    fn test_message_data_accessors() {
        let text = MessageData::from("hello");
        assert!(text.is_text());
        assert_eq!(text.as_text(), Some("hello"));
        assert_eq!(text.as_binary(), None);

        let binary = MessageData::from(vec![1u8, 2, 3]);
        assert!(binary.is_binary());
        assert_eq!(binary.as_binary(), Some(&[1u8, 2, 3][..]));
    }

    #[test]
    fn test_event_kind_mapping() {
        let event = Event::new("ws://host/", EventPayload::Open);
        assert_eq!(event.kind(), EventKind::Open);
        assert_eq!(event.kind().as_str(), "open");
        assert!(event.as_message().is_none());
    }
}
