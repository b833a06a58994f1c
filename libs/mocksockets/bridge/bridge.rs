use crate::core::scheduler::TaskQueue;
use crate::core::server::MockServer;
use crate::core::socket::MockSocket;
use crate::traits::error::{MockSocketError, Result};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// One served endpoint: the server plus the sockets currently attached
struct BridgeEntry {
    server: MockServer,
    clients: Vec<MockSocket>,
}

struct BridgeInner {
    entries: RwLock<HashMap<String, BridgeEntry>>,
    tasks: TaskQueue,
}

/// The network bridge between mock servers and client sockets
///
/// An explicit, owned registry instance: servers register themselves under
/// their normalized endpoint, sockets attach at connection time and detach
/// exactly once (close or admission rejection). Every `send`/`close` looks
/// the server up again through the bridge, so registry state is the single
/// source of truth for "is there a live peer" — a server torn down between
/// sends is observed correctly by the next call.
///
/// The bridge also owns the deferred task queue. Constructing a socket
/// enqueues its connection attempt; nothing connects until [`run_pending`]
/// is called, which makes event ordering fully deterministic in tests.
///
/// Handles are cheap clones sharing one registry.
///
/// [`run_pending`]: NetworkBridge::run_pending
#[derive(Clone)]
pub struct NetworkBridge {
    inner: Arc<BridgeInner>,
}

impl NetworkBridge {
    /// Create an empty bridge
    pub fn new() -> Self {
        Self {
            inner: Arc::new(BridgeInner {
                entries: RwLock::new(HashMap::new()),
                tasks: TaskQueue::new(),
            }),
        }
    }

    /// Register a server under its endpoint
    ///
    /// # Errors
    /// * `AddressInUse` - another server already serves this endpoint
    pub(crate) fn serve(&self, server: MockServer) -> Result<()> {
        let mut entries = self.inner.entries.write();
        let url = server.url().to_string();

        if entries.contains_key(&url) {
            return Err(MockSocketError::AddressInUse(url));
        }

        entries.insert(
            url.clone(),
            BridgeEntry {
                server,
                clients: Vec::new(),
            },
        );
        info!("mock server listening on {}", url);
        Ok(())
    }

    /// Remove the server entry for an endpoint
    ///
    /// Any sockets still attached observe the absence on their next
    /// `send`/`close`. No-op when nothing is served there.
    pub(crate) fn remove_server(&self, url: &str) {
        let removed = self.inner.entries.write().remove(url);
        if removed.is_some() {
            info!("mock server removed from {}", url);
        }
    }

    /// Register a socket against the server at `url`, if one exists
    ///
    /// Lookup and attachment are one step: when no server is present the
    /// registration is simply skipped and `None` is returned. Attaching is
    /// idempotent per socket (set semantics, never duplicate entries).
    pub fn attach(&self, socket: &MockSocket, url: &str) -> Option<MockServer> {
        let mut entries = self.inner.entries.write();
        let entry = entries.get_mut(url)?;

        if !entry.clients.iter().any(|s| s.same_socket(socket)) {
            entry.clients.push(socket.clone());
            debug!(
                "socket attached at {} ({} client(s) total)",
                url,
                entry.clients.len()
            );
        } else {
            warn!("socket already attached at {}", url);
        }
        Some(entry.server.clone())
    }

    /// Remove a socket from the attached set at `url`
    ///
    /// No-op when the socket is not attached or nothing is served there.
    pub fn detach(&self, socket: &MockSocket, url: &str) {
        let mut entries = self.inner.entries.write();
        if let Some(entry) = entries.get_mut(url) {
            let before = entry.clients.len();
            entry.clients.retain(|s| !s.same_socket(socket));
            if entry.clients.len() < before {
                debug!(
                    "socket detached from {} ({} client(s) remain)",
                    url,
                    entry.clients.len()
                );
            }
        }
    }

    /// Look up the server currently serving `url`
    ///
    /// A pure read. Callers never cache the result; every `send` and
    /// `close` resolves the endpoint afresh.
    pub fn lookup_server(&self, url: &str) -> Option<MockServer> {
        let entries = self.inner.entries.read();
        entries.get(url).map(|entry| entry.server.clone())
    }

    /// Number of sockets attached at `url`
    pub fn client_count(&self, url: &str) -> usize {
        let entries = self.inner.entries.read();
        entries.get(url).map_or(0, |entry| entry.clients.len())
    }

    /// Number of endpoints currently served
    pub fn server_count(&self) -> usize {
        self.inner.entries.read().len()
    }

    /// Enqueue a deferred run-once task
    pub(crate) fn defer<F>(&self, task: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.inner.tasks.defer(task);
    }

    /// Run every deferred task (pending connection attempts)
    ///
    /// Returns the number of tasks executed. Tasks scheduled while the pump
    /// runs are executed by the same pump.
    pub fn run_pending(&self) -> usize {
        self.inner.tasks.run_pending()
    }

    /// Number of deferred tasks waiting for a pump
    pub fn pending_tasks(&self) -> usize {
        self.inner.tasks.pending()
    }
}

impl Default for NetworkBridge {
    fn default() -> Self {
        Self::new()
    }
}
