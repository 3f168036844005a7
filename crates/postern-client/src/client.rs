use postern_core::error::CoreError;
use postern_transport::{
    CancellationToken, HttpTransport, Request, Transport, TransportError, TransportOptions,
};
use postern_xml::{ComplexProperty, find_complex_property};

use crate::error::ClientResult;

/// Sends requests and decodes complex properties from the replies.
#[derive(Debug)]
pub struct ServiceClient<T> {
    transport: T,
    url: Option<String>,
}

impl ServiceClient<HttpTransport> {
    /// ## Summary
    /// Builds a client over an [`HttpTransport`] configured from `options`.
    ///
    /// ## Errors
    /// Returns an error if the transport cannot be configured.
    pub fn with_options(options: TransportOptions, url: Option<String>) -> ClientResult<Self> {
        Ok(Self::new(HttpTransport::configure(options)?).with_url(url))
    }
}

impl<T: Transport> ServiceClient<T> {
    #[must_use]
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            url: None,
        }
    }

    #[must_use]
    pub fn with_url(mut self, url: Option<String>) -> Self {
        self.url = url;
        self
    }

    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Service endpoint used by [`ServiceClient::post`].
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// ## Summary
    /// Builds a POST of `body` to the configured service URL.
    ///
    /// ## Errors
    /// Returns a configuration error if no service URL is set.
    pub fn post(&self, body: impl Into<String>) -> ClientResult<Request> {
        let url = self.url.as_deref().ok_or_else(|| {
            CoreError::InvalidConfiguration("service.url is not set".to_owned())
        })?;
        Ok(Request::post(url, body))
    }

    /// ## Summary
    /// Sends `request` and decodes the first `element` in the reply as `P`.
    ///
    /// The response is closed on every path, including read and parse
    /// failures.
    ///
    /// ## Errors
    /// Returns the transport error if the exchange fails or the body cannot
    /// be read, and a parse error if the reply lacks `element` or it does not
    /// decode as `P`.
    #[tracing::instrument(skip(self, request, cancel), fields(uri = %request.uri))]
    pub async fn execute<P: ComplexProperty>(
        &self,
        request: Request,
        element: &str,
        cancel: &CancellationToken,
    ) -> ClientResult<P> {
        let mut response = self.transport.send(request, cancel).await?;

        let body = match response.take_body() {
            Some(body) => body.read_to_end().await,
            None => Err(TransportError::BodyConsumed),
        };
        response.close();
        let body = body?;

        tracing::debug!(status = response.status(), body_len = body.len(), "Decoding reply");
        Ok(find_complex_property::<P>(&body, element)?)
    }

    pub fn abort(&self) {
        self.transport.abort();
    }
}
