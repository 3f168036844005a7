use thiserror::Error;

/// Client errors - combines all error types
#[derive(Error, Debug)]
pub enum ClientError {
    #[error(transparent)]
    Transport(#[from] postern_transport::TransportError),

    #[error(transparent)]
    Parse(#[from] postern_xml::ParseError),

    #[error(transparent)]
    Core(#[from] postern_core::error::CoreError),
}

pub type ClientResult<T> = std::result::Result<T, ClientError>;

impl ClientError {
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Transport(err) if err.is_cancelled())
    }

    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(err) if err.is_retryable())
    }
}
