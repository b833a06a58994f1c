/// Trait for the server-side admission predicate
///
/// A server may decide per connection attempt whether to admit the client.
/// Returning `false` models "authentication rejected after physical
/// connection": the socket is detached from the bridge again and observes
/// the same `error` + `close` event pair as a refused connection.
pub trait VerifyClient: Send + Sync {
    /// Decide whether the connecting client should be admitted
    ///
    /// # Returns
    /// * `true` - Accept the connection
    /// * `false` - Reject it; the socket ends up CLOSED
    fn verify(&self) -> bool;
}

/// An admission predicate that accepts every client
///
/// This is the behavior of a server configured without `verify_client`.
pub struct AcceptAll;

impl VerifyClient for AcceptAll {
    fn verify(&self) -> bool {
        true
    }
}

impl<F> VerifyClient for F
where
    F: Fn() -> bool + Send + Sync,
{
    fn verify(&self) -> bool {
        self()
    }
}
