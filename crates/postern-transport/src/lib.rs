//! HTTP transport for XML service requests.
//!
//! [`HttpTransport`] owns one pooled client configured from
//! [`TransportOptions`]. Each [`Request`] is sent once and yields a
//! [`Response`] or a [`TransportError`].

pub mod error;
pub mod http;
pub mod options;
pub mod request;
pub mod response;
pub mod transport;

pub use error::{CancelReason, TransportError, TransportResult};
pub use http::HttpTransport;
pub use options::{Credentials, ProxyMode, ProxyOptions, TransportOptions};
pub use request::Request;
pub use response::{Response, ResponseBody, ResponseHeaders};
pub use transport::Transport;

pub use reqwest::{Method, Version};
pub use tokio_util::sync::CancellationToken;
