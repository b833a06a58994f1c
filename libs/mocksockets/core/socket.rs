use crate::bridge::NetworkBridge;
use crate::core::event::{
    close_code, CloseEvent, ErrorEvent, Event, EventKind, EventPayload, MessageData, MessageEvent,
};
use crate::core::event_target::{EventTarget, ListenerFn, ListenerId};
use crate::core::ready_state::{AtomicReadyState, ReadyState};
use crate::core::url::normalize_url;
use crate::traits::dispatch::EventDispatch;
use crate::traits::error::{MockSocketError, Result};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Identity counter for socket handles; the bridge's attached sets key on it
static NEXT_SOCKET_ID: AtomicU64 = AtomicU64::new(1);

/// The `binaryType` property values of the browser API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BinaryType {
    #[default]
    Blob,
    ArrayBuffer,
}

impl BinaryType {
    /// The property string, as the browser exposes it
    pub fn as_str(self) -> &'static str {
        match self {
            BinaryType::Blob => "blob",
            BinaryType::ArrayBuffer => "arraybuffer",
        }
    }

    fn parse(value: &str) -> Option<BinaryType> {
        match value {
            "blob" => Some(BinaryType::Blob),
            "arraybuffer" => Some(BinaryType::ArrayBuffer),
            _ => None,
        }
    }
}

struct SocketInner {
    id: u64,
    url: String,
    protocol: String,
    ready_state: AtomicReadyState,
    binary_type: RwLock<BinaryType>,
    target: EventTarget,
    bridge: NetworkBridge,
}

/// The client-side socket state machine
///
/// Mimics the native `WebSocket` object: construction validates the
/// endpoint, initializes the state to CONNECTING and defers a run-once
/// connection attempt onto the bridge's task queue. Because nothing
/// happens until [`NetworkBridge::run_pending`] is called, every listener
/// registered synchronously after construction is guaranteed to be in
/// place before the first event fires.
///
/// Connection-level failures (no server, admission rejected) are never
/// returned as errors; they surface as an `error` event followed by a
/// `close` event, exactly like a refused connection in the browser.
/// Programmer errors (`send` on a closed socket, out-of-range close code)
/// fail synchronously.
///
/// Handles are cheap clones of one underlying socket.
#[derive(Clone)]
pub struct MockSocket {
    inner: Arc<SocketInner>,
}

impl MockSocket {
    /// Construct a socket and schedule its connection attempt
    ///
    /// # Errors
    /// * `MissingUrl` - the endpoint is empty or blank
    /// * `InvalidUrl` - the endpoint lacks a `ws://`/`wss://` scheme
    pub fn new(bridge: &NetworkBridge, url: &str) -> Result<Self> {
        Self::with_protocols(bridge, url, &[])
    }

    /// Construct a socket requesting the given subprotocols
    ///
    /// The double performs no negotiation: the first requested subprotocol
    /// becomes the socket's `protocol` property.
    pub fn with_protocols(bridge: &NetworkBridge, url: &str, protocols: &[&str]) -> Result<Self> {
        if url.trim().is_empty() {
            return Err(MockSocketError::MissingUrl);
        }
        let url = normalize_url(url)?;
        let protocol = protocols.first().map(|p| p.to_string()).unwrap_or_default();

        let socket = Self {
            inner: Arc::new(SocketInner {
                id: NEXT_SOCKET_ID.fetch_add(1, Ordering::Relaxed),
                url,
                protocol,
                ready_state: AtomicReadyState::new(ReadyState::Connecting),
                binary_type: RwLock::new(BinaryType::default()),
                target: EventTarget::new(),
                bridge: bridge.clone(),
            }),
        };

        debug!(
            "socket #{} created for {}, connection attempt deferred",
            socket.inner.id, socket.inner.url
        );
        let pending = socket.clone();
        bridge.defer(move || pending.run_connection_attempt());

        Ok(socket)
    }

    /// The normalized endpoint this socket connects to
    pub fn url(&self) -> &str {
        &self.inner.url
    }

    /// The requested subprotocol (first of the list), or empty
    pub fn protocol(&self) -> &str {
        &self.inner.protocol
    }

    /// Current lifecycle state
    #[inline]
    pub fn ready_state(&self) -> ReadyState {
        self.inner.ready_state.get()
    }

    /// Current `binaryType` value
    pub fn binary_type(&self) -> BinaryType {
        *self.inner.binary_type.read()
    }

    /// Assign `binaryType`
    ///
    /// Only `"blob"` and `"arraybuffer"` are accepted; any other value is
    /// ignored with a warning, never an error — browser behavior.
    pub fn set_binary_type(&self, value: &str) {
        match BinaryType::parse(value) {
            Some(binary_type) => *self.inner.binary_type.write() = binary_type,
            None => warn!(
                "binaryType must be 'blob' or 'arraybuffer'; ignoring '{}'",
                value
            ),
        }
    }

    /// Send data to the server currently at this socket's endpoint
    ///
    /// The server is resolved through the bridge on every call. A missing
    /// server (torn down after the socket opened) drops the message
    /// silently; only the socket's own state produces an error.
    ///
    /// # Errors
    /// * `NotOpen` - the socket is CLOSING or CLOSED
    pub fn send(&self, data: impl Into<MessageData>) -> Result<()> {
        if self.ready_state().is_closing_or_closed() {
            return Err(MockSocketError::NotOpen);
        }

        let data = data.into();
        match self.inner.bridge.lookup_server(&self.inner.url) {
            Some(server) => {
                let event = Event::new(
                    server.url(),
                    EventPayload::Message(MessageEvent {
                        data,
                        origin: self.inner.url.clone(),
                    }),
                );
                server.dispatch_event(&event);
            }
            None => {
                debug!("no server at {}, message dropped", self.inner.url);
            }
        }
        Ok(())
    }

    /// Close the connection with the default (unset) code
    pub fn close(&self) -> Result<()> {
        self.close_with(None, None)
    }

    /// Close the connection with an explicit code and reason
    ///
    /// The code is validated — it must be 1000 or within [3000, 4999] —
    /// but the emitted close event always carries 1000 on the client side.
    /// Closing a socket that is not OPEN is a no-op, so a second `close`
    /// never produces duplicate events and a close racing a still-pending
    /// connection attempt does nothing.
    ///
    /// # Errors
    /// * `InvalidCloseCode` - a code was supplied and is out of range
    pub fn close_with(&self, code: Option<u16>, reason: Option<&str>) -> Result<()> {
        if let Some(code) = code {
            if !close_code::is_valid(code) {
                return Err(MockSocketError::InvalidCloseCode(code));
            }
        }

        if !self.ready_state().is_open() {
            debug!(
                "close on socket #{} in state {} is a no-op",
                self.inner.id,
                self.ready_state().as_str()
            );
            return Ok(());
        }

        let server = self.inner.bridge.lookup_server(&self.inner.url);
        self.inner.bridge.detach(self, &self.inner.url);
        self.inner.ready_state.set(ReadyState::Closed);
        info!("socket #{} closed ({})", self.inner.id, self.inner.url);

        let event = Event::new(
            self.inner.url.clone(),
            EventPayload::Close(CloseEvent::new(
                close_code::NORMAL,
                reason.unwrap_or_default(),
            )),
        );
        self.dispatch_event(&event);
        if let Some(server) = server {
            server.dispatch_event(&event);
        }
        Ok(())
    }

    /// Assign the single-slot `open` handler
    pub fn set_on_open<F>(&self, callback: F) -> ListenerId
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        self.inner.target.set_handler(EventKind::Open, callback)
    }

    /// Read the single-slot `open` handler
    pub fn on_open(&self) -> Option<Arc<ListenerFn>> {
        self.inner.target.handler(EventKind::Open)
    }

    /// Assign the single-slot `message` handler
    pub fn set_on_message<F>(&self, callback: F) -> ListenerId
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        self.inner.target.set_handler(EventKind::Message, callback)
    }

    /// Read the single-slot `message` handler
    pub fn on_message(&self) -> Option<Arc<ListenerFn>> {
        self.inner.target.handler(EventKind::Message)
    }

    /// Assign the single-slot `close` handler
    pub fn set_on_close<F>(&self, callback: F) -> ListenerId
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        self.inner.target.set_handler(EventKind::Close, callback)
    }

    /// Read the single-slot `close` handler
    pub fn on_close(&self) -> Option<Arc<ListenerFn>> {
        self.inner.target.handler(EventKind::Close)
    }

    /// Assign the single-slot `error` handler
    pub fn set_on_error<F>(&self, callback: F) -> ListenerId
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        self.inner.target.set_handler(EventKind::Error, callback)
    }

    /// Read the single-slot `error` handler
    pub fn on_error(&self) -> Option<Arc<ListenerFn>> {
        self.inner.target.handler(EventKind::Error)
    }

    /// Identity check: two handles for the same underlying socket
    pub(crate) fn same_socket(&self, other: &MockSocket) -> bool {
        self.inner.id == other.inner.id
    }

    /// The deferred, run-once connection attempt
    ///
    /// Attach and lookup are one bridge call; on rejection the attachment
    /// is undone before the failure events fire, on refusal there was never
    /// an attachment to undo. The server is notified before the socket's
    /// own `open` fires.
    fn run_connection_attempt(&self) {
        match self.inner.bridge.attach(self, &self.inner.url) {
            None => {
                debug!("connection refused: no server at {}", self.inner.url);
                self.fail_connection();
            }
            Some(server) => {
                if !server.verify_client() {
                    self.inner.bridge.detach(self, &self.inner.url);
                    debug!("connection rejected by {}", server.url());
                    self.fail_connection();
                    return;
                }

                self.inner.ready_state.set(ReadyState::Open);
                info!("socket #{} open ({})", self.inner.id, self.inner.url);

                server.dispatch_event(&Event::new(
                    server.url(),
                    EventPayload::Connection(self.clone()),
                ));
                self.dispatch_event(&Event::new(self.inner.url.clone(), EventPayload::Open));
            }
        }
    }

    /// Terminal failure path: CLOSED, then `error`, then `close`
    fn fail_connection(&self) {
        self.inner.ready_state.set(ReadyState::Closed);

        self.dispatch_event(&Event::new(
            self.inner.url.clone(),
            EventPayload::Error(ErrorEvent {
                message: format!("connection to {} failed", self.inner.url),
            }),
        ));
        self.dispatch_event(&Event::new(
            self.inner.url.clone(),
            EventPayload::Close(CloseEvent::new(close_code::NORMAL, "")),
        ));
    }
}

impl EventDispatch for MockSocket {
    fn event_target(&self) -> &EventTarget {
        &self.inner.target
    }
}

impl std::fmt::Debug for MockSocket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockSocket")
            .field("id", &self.inner.id)
            .field("url", &self.inner.url)
            .field("ready_state", &self.ready_state().as_str())
            .finish()
    }
}
