use std::fmt;

use thiserror::Error;

use crate::response::Response;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Why an exchange was cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelReason {
    /// The caller's cancellation token fired.
    Caller,
    /// `abort()` was called on the transport.
    Aborted,
    /// The request or client timeout elapsed.
    Timeout,
}

impl fmt::Display for CancelReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Caller => write!(f, "cancelled by caller"),
            Self::Aborted => write!(f, "aborted"),
            Self::Timeout => write!(f, "timed out"),
        }
    }
}

/// Transport layer errors
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Request cancelled: {0}")]
    Cancelled(CancelReason),

    #[error("Transport failure: {0}")]
    Transport(#[source] BoxError),

    /// The exchange completed with a non-success status. The response body
    /// has not been read.
    #[error("Request failed with status {} {}", .0.status(), .0.reason())]
    Status(Box<Response>),

    #[error("Invalid transport configuration: {0}")]
    Configuration(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Response body already consumed")]
    BodyConsumed,

    #[error("Transport has been disposed")]
    Disposed,
}

pub type TransportResult<T> = std::result::Result<T, TransportError>;

impl TransportError {
    /// Maps a reqwest failure into the transport taxonomy.
    #[must_use]
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Cancelled(CancelReason::Timeout)
        } else if err.is_builder() {
            Self::InvalidRequest(err.to_string())
        } else {
            Self::Transport(Box::new(err))
        }
    }

    /// ## Summary
    /// Whether repeating the same request may succeed.
    ///
    /// Only failures to complete the exchange are retryable. Cancellation
    /// never is, and status failures are left to the caller's policy.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled(_))
    }

    /// Status code of a completed but unsuccessful exchange.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        self.response().map(Response::status)
    }

    #[must_use]
    pub fn response(&self) -> Option<&Response> {
        match self {
            Self::Status(response) => Some(response),
            _ => None,
        }
    }

    #[must_use]
    pub fn into_response(self) -> Option<Response> {
        match self {
            Self::Status(response) => Some(*response),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::ResponseHeaders;

    #[test]
    fn only_transport_failures_are_retryable() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset");
        assert!(TransportError::Transport(Box::new(io)).is_retryable());
        assert!(!TransportError::Cancelled(CancelReason::Timeout).is_retryable());
        assert!(!TransportError::Disposed.is_retryable());

        let status = TransportError::Status(Box::new(Response::buffered(
            503,
            ResponseHeaders::default(),
            Vec::new(),
        )));
        assert!(!status.is_retryable());
    }

    #[test]
    fn status_error_hands_back_the_response() {
        let err = TransportError::Status(Box::new(Response::buffered(
            404,
            ResponseHeaders::default(),
            b"gone".to_vec(),
        )));
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.to_string(), "Request failed with status 404 Not Found");

        let response = err.into_response().unwrap();
        assert_eq!(response.reason(), "Not Found");
        assert!(TransportError::Disposed.into_response().is_none());
    }

    #[test]
    fn cancel_reason_display() {
        assert_eq!(
            TransportError::Cancelled(CancelReason::Aborted).to_string(),
            "Request cancelled: aborted"
        );
    }
}
