use thiserror::Error;

/// Main error type for mocksockets
///
/// Every variant is a synchronous programmer error, mirroring the browser
/// API's split between throwing (bad arguments, bad state) and event
/// reporting (network-level failures). A refused or rejected connection is
/// never surfaced here; it arrives as an `error` + `close` event pair on
/// the socket.
#[derive(Error, Debug)]
pub enum MockSocketError {
    /// Constructor called without a usable endpoint
    #[error("failed to construct socket: the url argument is required")]
    MissingUrl,

    /// Endpoint does not carry a ws:// or wss:// scheme
    #[error("the URL '{0}' is invalid: the scheme must be either 'ws' or 'wss'")]
    InvalidUrl(String),

    /// Explicit close code outside 1000 and the reserved range 3000-4999
    #[error("the close code must be either 1000, or between 3000 and 4999; {0} is neither")]
    InvalidCloseCode(u16),

    /// Operation requires an open socket
    #[error("the socket is already in CLOSING or CLOSED state")]
    NotOpen,

    /// A second server was started on an endpoint already being served
    #[error("a mock server is already listening on '{0}'")]
    AddressInUse(String),
}

/// Coarse error classification
///
/// Groups the variants the way the browser API groups its exception types:
/// missing arguments, protocol violations, and invalid-state operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A required argument was missing or unusable
    Argument,
    /// The argument was present but violates the protocol rules
    Protocol,
    /// The operation is invalid for the socket's current ready state
    State,
}

impl MockSocketError {
    /// Classify this error into its taxonomy kind
    pub fn kind(&self) -> ErrorKind {
        match self {
            MockSocketError::MissingUrl | MockSocketError::AddressInUse(_) => ErrorKind::Argument,
            MockSocketError::InvalidUrl(_) | MockSocketError::InvalidCloseCode(_) => {
                ErrorKind::Protocol
            }
            MockSocketError::NotOpen => ErrorKind::State,
        }
    }
}

/// Result type for mocksockets operations
pub type Result<T> = std::result::Result<T, MockSocketError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(MockSocketError::MissingUrl.kind(), ErrorKind::Argument);
        assert_eq!(
            MockSocketError::InvalidUrl("http://x".into()).kind(),
            ErrorKind::Protocol
        );
        assert_eq!(
            MockSocketError::InvalidCloseCode(2000).kind(),
            ErrorKind::Protocol
        );
        assert_eq!(MockSocketError::NotOpen.kind(), ErrorKind::State);
        assert_eq!(
            MockSocketError::AddressInUse("ws://host/".into()).kind(),
            ErrorKind::Argument
        );
    }

    #[test]
    fn test_error_messages_name_the_offender() {
        let err = MockSocketError::InvalidCloseCode(2000);
        assert!(err.to_string().contains("2000"));

        let err = MockSocketError::InvalidUrl("http://example.com".into());
        assert!(err.to_string().contains("http://example.com"));
    }
}
