use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use postern_transport::{
    CancelReason, CancellationToken, Request, Response, ResponseHeaders, Transport,
    TransportError, TransportResult,
};

/// A [`Transport`] that replays scripted outcomes in order and records
/// every request it is given.
#[derive(Debug, Default)]
pub struct FakeTransport {
    outcomes: Mutex<VecDeque<TransportResult<Response>>>,
    requests: Mutex<Vec<Request>>,
    aborts: AtomicUsize,
}

impl FakeTransport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a response. Non-success statuses are returned as
    /// [`TransportError::Status`], as the real transport does.
    pub fn push_response(&self, status: u16, body: impl Into<Vec<u8>>) {
        self.push_outcome(Ok(Response::buffered(
            status,
            ResponseHeaders::default(),
            body.into(),
        )));
    }

    pub fn push_outcome(&self, outcome: TransportResult<Response>) {
        self.outcomes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(outcome);
    }

    /// Requests sent so far, oldest first.
    #[must_use]
    pub fn requests(&self) -> Vec<Request> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn abort_count(&self) -> usize {
        self.aborts.load(Ordering::SeqCst)
    }
}

impl Transport for FakeTransport {
    async fn send(
        &self,
        request: Request,
        cancel: &CancellationToken,
    ) -> TransportResult<Response> {
        if cancel.is_cancelled() {
            return Err(TransportError::Cancelled(CancelReason::Caller));
        }

        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request);

        let outcome = self
            .outcomes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| {
                Err(TransportError::Transport(
                    "no scripted response left".into(),
                ))
            })?;

        if outcome.is_success() {
            Ok(outcome)
        } else {
            Err(TransportError::Status(Box::new(outcome)))
        }
    }

    fn abort(&self) {
        self.aborts.fetch_add(1, Ordering::SeqCst);
    }
}
