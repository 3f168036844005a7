use std::future::Future;

use tokio_util::sync::CancellationToken;

use crate::error::TransportResult;
use crate::request::Request;
use crate::response::Response;

/// Sends requests and yields responses.
pub trait Transport: Send + Sync {
    /// ## Summary
    /// Sends one request.
    ///
    /// A token that has already fired fails with
    /// [`TransportError::Cancelled`](crate::TransportError::Cancelled)
    /// without touching the network.
    ///
    /// ## Errors
    /// Returns `Cancelled` on cancellation, abort or timeout, `Transport` if
    /// the exchange could not complete, and `Status` for a non-success
    /// status.
    fn send(
        &self,
        request: Request,
        cancel: &CancellationToken,
    ) -> impl Future<Output = TransportResult<Response>> + Send;

    /// Cancels every send currently in flight on this instance.
    fn abort(&self);
}
