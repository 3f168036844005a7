use std::collections::HashMap;

use reqwest::header::HeaderMap;
use reqwest::{StatusCode, Version};

use crate::error::{TransportError, TransportResult};

/// Response headers with one value per name.
///
/// Names compare case-insensitively. When a name repeats, the last value
/// wins; `Set-Cookie` is consumed by the cookie jar, not read from here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseHeaders {
    entries: HashMap<String, String>,
}

impl ResponseHeaders {
    #[must_use]
    pub fn from_header_map(headers: &HeaderMap) -> Self {
        headers
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_owned(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect()
    }

    pub fn insert(&mut self, name: &str, value: impl Into<String>) {
        self.entries.insert(name.to_ascii_lowercase(), value.into());
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates `(lowercase name, value)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for ResponseHeaders {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut headers = Self::default();
        for (name, value) in iter {
            headers.insert(name.as_ref(), value);
        }
        headers
    }
}

#[derive(Debug)]
enum BodySource {
    Network(reqwest::Response),
    Buffered(Option<Vec<u8>>),
}

/// Body of a response, readable once.
#[derive(Debug)]
pub struct ResponseBody {
    source: BodySource,
}

impl ResponseBody {
    #[must_use]
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self {
            source: BodySource::Buffered(Some(bytes)),
        }
    }

    /// ## Summary
    /// Reads the next chunk of the body, or `None` once it is exhausted.
    ///
    /// ## Errors
    /// Returns a transport error if the connection fails mid-body, or a
    /// timeout cancellation if the exchange deadline passes.
    pub async fn chunk(&mut self) -> TransportResult<Option<Vec<u8>>> {
        match &mut self.source {
            BodySource::Network(response) => Ok(response
                .chunk()
                .await
                .map_err(TransportError::from_reqwest)?
                .map(|bytes| bytes.to_vec())),
            BodySource::Buffered(bytes) => Ok(bytes.take().filter(|b| !b.is_empty())),
        }
    }

    /// ## Summary
    /// Reads the remaining body. An empty body is `Ok` with no bytes.
    ///
    /// ## Errors
    /// Same as [`ResponseBody::chunk`].
    pub async fn read_to_end(mut self) -> TransportResult<Vec<u8>> {
        let mut out = Vec::new();
        while let Some(chunk) = self.chunk().await? {
            out.extend_from_slice(&chunk);
        }
        Ok(out)
    }
}

/// A completed exchange.
///
/// Dropping the response or calling [`Response::close`] releases the
/// connection.
#[derive(Debug)]
pub struct Response {
    status: u16,
    reason: String,
    headers: ResponseHeaders,
    version: Version,
    url: String,
    body: Option<ResponseBody>,
    closed: bool,
}

impl Response {
    #[must_use]
    pub fn from_reqwest(response: reqwest::Response) -> Self {
        let status = response.status();
        // hyper only records the phrase when it differs from the canonical one.
        let reason = response
            .extensions()
            .get::<hyper::ext::ReasonPhrase>()
            .map(|phrase| String::from_utf8_lossy(phrase.as_bytes()).into_owned())
            .or_else(|| status.canonical_reason().map(str::to_owned))
            .unwrap_or_default();
        Self {
            status: status.as_u16(),
            reason,
            headers: ResponseHeaders::from_header_map(response.headers()),
            version: response.version(),
            url: response.url().to_string(),
            body: Some(ResponseBody {
                source: BodySource::Network(response),
            }),
            closed: false,
        }
    }

    /// A response whose body is already in memory.
    #[must_use]
    pub fn buffered(status: u16, headers: ResponseHeaders, body: Vec<u8>) -> Self {
        let reason = StatusCode::from_u16(status)
            .ok()
            .and_then(|code| code.canonical_reason())
            .unwrap_or_default()
            .to_owned();
        Self {
            status,
            reason,
            headers,
            version: Version::HTTP_11,
            url: String::new(),
            body: Some(ResponseBody::from_bytes(body)),
            closed: false,
        }
    }

    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    #[must_use]
    pub fn status(&self) -> u16 {
        self.status
    }

    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    #[must_use]
    pub fn headers(&self) -> &ResponseHeaders {
        &self.headers
    }

    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.headers.get("content-type")
    }

    #[must_use]
    pub fn content_encoding(&self) -> Option<&str> {
        self.headers.get("content-encoding")
    }

    /// Request id echoed by the server, if any.
    #[must_use]
    pub fn client_request_id(&self) -> Option<&str> {
        self.headers
            .get(postern_core::constants::CLIENT_REQUEST_ID_HEADER)
    }

    #[must_use]
    pub fn version(&self) -> Version {
        self.version
    }

    /// URI that produced this response, after redirects.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Takes the body. Returns `None` if it was already taken or the
    /// response is closed.
    pub fn take_body(&mut self) -> Option<ResponseBody> {
        self.body.take()
    }

    /// ## Summary
    /// Reads the whole body and releases the connection.
    ///
    /// ## Errors
    /// Returns [`TransportError::BodyConsumed`] if the body was already
    /// taken, or the read error.
    pub async fn bytes(mut self) -> TransportResult<Vec<u8>> {
        let body = self.take_body().ok_or(TransportError::BodyConsumed)?;
        body.read_to_end().await
    }

    /// ## Summary
    /// Reads the whole body as text, replacing invalid UTF-8.
    ///
    /// ## Errors
    /// Same as [`Response::bytes`].
    pub async fn text(self) -> TransportResult<String> {
        let bytes = self.bytes().await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Releases the connection. Calling it again does nothing.
    pub fn close(&mut self) {
        if !self.closed {
            tracing::trace!(status = self.status, "Closing response");
            self.body = None;
            self.closed = true;
        }
    }
}
