use crate::bridge::NetworkBridge;
use crate::core::event::{Event, EventKind};
use crate::core::event_target::{EventTarget, ListenerId};
use crate::core::url::normalize_url;
use crate::traits::dispatch::EventDispatch;
use crate::traits::error::Result;
use crate::traits::verify::VerifyClient;
use std::sync::Arc;
use tracing::debug;

/// Configuration for a mock server
#[derive(Default)]
pub struct ServerOptions {
    /// Optional admission predicate, consulted once per connection attempt
    pub verify_client: Option<Box<dyn VerifyClient>>,
}

impl ServerOptions {
    /// Options with an admission predicate
    pub fn verify_with<V>(predicate: V) -> Self
    where
        V: VerifyClient + 'static,
    {
        Self {
            verify_client: Some(Box::new(predicate)),
        }
    }
}

struct ServerInner {
    url: String,
    target: EventTarget,
    verify_client: Option<Box<dyn VerifyClient>>,
    bridge: NetworkBridge,
}

/// The mock server collaborator
///
/// Deliberately thin: it registers itself with the bridge, optionally vets
/// connecting clients, and observes the `connection`, `message`, and
/// `close` events sockets dispatch at it. Client-list bookkeeping beyond
/// [`client_count`] and broadcast helpers are out of scope for the double.
///
/// Handles are cheap clones of one underlying server.
///
/// [`client_count`]: MockServer::client_count
#[derive(Clone)]
pub struct MockServer {
    inner: Arc<ServerInner>,
}

impl MockServer {
    /// Start a server accepting every client
    ///
    /// # Errors
    /// * `InvalidUrl` - the endpoint lacks a `ws://`/`wss://` scheme
    /// * `AddressInUse` - another server already serves this endpoint
    pub fn start(bridge: &NetworkBridge, url: &str) -> Result<Self> {
        Self::start_with(bridge, url, ServerOptions::default())
    }

    /// Start a server with explicit options
    pub fn start_with(bridge: &NetworkBridge, url: &str, options: ServerOptions) -> Result<Self> {
        let url = normalize_url(url)?;
        let server = Self {
            inner: Arc::new(ServerInner {
                url,
                target: EventTarget::new(),
                verify_client: options.verify_client,
                bridge: bridge.clone(),
            }),
        };
        bridge.serve(server.clone())?;
        Ok(server)
    }

    /// The normalized endpoint this server serves
    pub fn url(&self) -> &str {
        &self.inner.url
    }

    /// Number of sockets currently attached to this endpoint
    pub fn client_count(&self) -> usize {
        self.inner.bridge.client_count(&self.inner.url)
    }

    /// Stop serving: removes the registry entry
    ///
    /// Idempotent. Sockets still open observe the absence on their next
    /// `send` or `close` through the bridge.
    pub fn stop(&self) {
        self.inner.bridge.remove_server(&self.inner.url);
    }

    /// Consult the admission predicate; servers without one accept everyone
    pub(crate) fn verify_client(&self) -> bool {
        match &self.inner.verify_client {
            Some(predicate) => {
                let admitted = predicate.verify();
                debug!(
                    "verify_client at {}: {}",
                    self.inner.url,
                    if admitted { "admitted" } else { "rejected" }
                );
                admitted
            }
            None => true,
        }
    }

    /// Assign the single-slot `connection` handler
    pub fn set_on_connection<F>(&self, callback: F) -> ListenerId
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        self.inner.target.set_handler(EventKind::Connection, callback)
    }

    /// Assign the single-slot `message` handler
    pub fn set_on_message<F>(&self, callback: F) -> ListenerId
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        self.inner.target.set_handler(EventKind::Message, callback)
    }

    /// Assign the single-slot `close` handler
    pub fn set_on_close<F>(&self, callback: F) -> ListenerId
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        self.inner.target.set_handler(EventKind::Close, callback)
    }
}

impl EventDispatch for MockServer {
    fn event_target(&self) -> &EventTarget {
        &self.inner.target
    }
}

impl std::fmt::Debug for MockServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockServer")
            .field("url", &self.inner.url)
            .field("has_verify_client", &self.inner.verify_client.is_some())
            .finish()
    }
}
