use std::sync::{Arc, Mutex, PoisonError, RwLock};

use postern_core::constants::{
    CLIENT_REQUEST_ID_HEADER, MAX_REDIRECTS, RETURN_CLIENT_REQUEST_ID_HEADER,
};
use reqwest::cookie::Jar;
use reqwest::header::{
    ACCEPT, CONNECTION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue, USER_AGENT,
    WWW_AUTHENTICATE,
};
use reqwest::{Client, Identity, Proxy, StatusCode, redirect};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::error::{CancelReason, TransportError, TransportResult};
use crate::options::{Credentials, ProxyMode, TransportOptions};
use crate::request::Request;
use crate::response::Response;
use crate::transport::Transport;

/// [`Transport`] over a pooled reqwest client.
#[derive(Debug)]
pub struct HttpTransport {
    options: TransportOptions,
    cookie_jar: Arc<Jar>,
    client: RwLock<Option<Client>>,
    /// Replaced on every `abort()`; sends watch the token current when they
    /// start.
    abort: Mutex<CancellationToken>,
}

impl HttpTransport {
    /// ## Summary
    /// Builds a transport and its HTTP client from `options`.
    ///
    /// ## Errors
    /// Returns a configuration error if the proxy URL or client certificate
    /// is invalid, or the client cannot be built.
    pub fn configure(options: TransportOptions) -> TransportResult<Self> {
        let cookie_jar = options
            .cookie_jar
            .clone()
            .unwrap_or_else(|| Arc::new(Jar::default()));
        let client = build_client(&options, Arc::clone(&cookie_jar))?;

        tracing::debug!(
            timeout = ?options.timeout,
            allow_auto_redirect = options.allow_auto_redirect,
            keep_alive = options.keep_alive,
            "HTTP transport configured"
        );

        Ok(Self {
            options,
            cookie_jar,
            client: RwLock::new(Some(client)),
            abort: Mutex::new(CancellationToken::new()),
        })
    }

    #[must_use]
    pub fn options(&self) -> &TransportOptions {
        &self.options
    }

    #[must_use]
    pub fn cookie_jar(&self) -> &Arc<Jar> {
        &self.cookie_jar
    }

    /// Releases pooled connections. Later sends fail with
    /// [`TransportError::Disposed`].
    pub fn dispose(&self) {
        let mut client = self.client.write().unwrap_or_else(PoisonError::into_inner);
        if client.take().is_some() {
            tracing::debug!("HTTP transport disposed");
        }
    }

    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.client
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_none()
    }

    /// ## Summary
    /// Sends one request through the pooled client.
    ///
    /// ## Errors
    /// See [`Transport::send`]. Also fails with `Disposed` after
    /// [`HttpTransport::dispose`] and `InvalidRequest` for a malformed URI or
    /// header.
    #[tracing::instrument(
        skip_all,
        fields(
            method = %request.method,
            uri = %request.uri,
            client_request_id = tracing::field::Empty,
        )
    )]
    pub async fn send(
        &self,
        request: Request,
        cancel: &CancellationToken,
    ) -> TransportResult<Response> {
        if cancel.is_cancelled() {
            tracing::debug!("Cancellation already requested, not sending");
            return Err(TransportError::Cancelled(CancelReason::Caller));
        }

        let client = self
            .client
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(TransportError::Disposed)?;
        let abort = self
            .abort
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        let client_request_id = self.options.send_client_request_id.then(Uuid::new_v4);
        if let Some(id) = client_request_id {
            tracing::Span::current().record("client_request_id", tracing::field::display(id));
        }

        tokio::select! {
            biased;
            () = cancel.cancelled() => {
                tracing::debug!("Request cancelled by caller");
                Err(TransportError::Cancelled(CancelReason::Caller))
            }
            () = abort.cancelled() => {
                tracing::debug!("Request aborted");
                Err(TransportError::Cancelled(CancelReason::Aborted))
            }
            result = self.exchange(&client, &request, client_request_id) => result,
        }
    }

    /// Cancels every send in flight. Sends started afterwards are unaffected.
    pub fn abort(&self) {
        let previous = {
            let mut current = self.abort.lock().unwrap_or_else(PoisonError::into_inner);
            std::mem::replace(&mut *current, CancellationToken::new())
        };
        previous.cancel();
        tracing::debug!("In-flight requests aborted");
    }

    async fn exchange(
        &self,
        client: &Client,
        request: &Request,
        client_request_id: Option<Uuid>,
    ) -> TransportResult<Response> {
        let credentials = self
            .options
            .credentials
            .as_ref()
            .filter(|creds| creds.scheme().is_some());
        let first_credentials = credentials.filter(|_| self.options.pre_authenticate);

        tracing::debug!(
            body_len = request.body.as_ref().map_or(0, String::len),
            "Sending request"
        );
        let mut response = self
            .build_request(client, request, client_request_id, first_credentials)?
            .send()
            .await
            .map_err(TransportError::from_reqwest)?;

        if response.status() == StatusCode::UNAUTHORIZED
            && first_credentials.is_none()
            && let Some(creds) = credentials
            && answers_challenge(response.headers(), creds)
        {
            tracing::debug!("Authentication challenge received, retrying with credentials");
            drop(response);
            response = self
                .build_request(client, request, client_request_id, Some(creds))?
                .send()
                .await
                .map_err(TransportError::from_reqwest)?;
        }

        let response = Response::from_reqwest(response);
        tracing::debug!(
            status = response.status(),
            version = ?response.version(),
            "Received response"
        );

        if response.is_success() {
            Ok(response)
        } else {
            Err(TransportError::Status(Box::new(response)))
        }
    }

    fn build_request(
        &self,
        client: &Client,
        request: &Request,
        client_request_id: Option<Uuid>,
        credentials: Option<&Credentials>,
    ) -> TransportResult<reqwest::RequestBuilder> {
        let url = reqwest::Url::parse(&request.uri).map_err(|err| {
            TransportError::InvalidRequest(format!("invalid URI {:?}: {err}", request.uri))
        })?;
        let options = &self.options;

        let mut builder = client
            .request(request.method.clone(), url)
            .header(ACCEPT, request.accept.as_deref().unwrap_or(&options.accept))
            .header(
                USER_AGENT,
                request.user_agent.as_deref().unwrap_or(&options.user_agent),
            )
            .timeout(request.timeout.unwrap_or(options.timeout));

        if let Some(body) = &request.body {
            builder = builder
                .header(
                    CONTENT_TYPE,
                    request
                        .content_type
                        .as_deref()
                        .unwrap_or(&options.content_type),
                )
                .body(body.clone());
        }
        if !options.keep_alive {
            builder = builder.header(CONNECTION, "close");
        }
        if let Some(id) = client_request_id {
            builder = builder
                .header(CLIENT_REQUEST_ID_HEADER, id.to_string())
                .header(RETURN_CLIENT_REQUEST_ID_HEADER, "true");
        }
        if !request.headers.is_empty() {
            builder = builder.headers(caller_headers(&request.headers)?);
        }
        if let Some(creds) = credentials {
            builder = creds.apply(builder);
        }

        Ok(builder)
    }
}

impl Transport for HttpTransport {
    async fn send(
        &self,
        request: Request,
        cancel: &CancellationToken,
    ) -> TransportResult<Response> {
        Self::send(self, request, cancel).await
    }

    fn abort(&self) {
        Self::abort(self);
    }
}

fn build_client(options: &TransportOptions, cookie_jar: Arc<Jar>) -> TransportResult<Client> {
    let redirect_policy = if options.allow_auto_redirect {
        redirect::Policy::limited(MAX_REDIRECTS)
    } else {
        redirect::Policy::none()
    };

    let mut builder = Client::builder()
        .redirect(redirect_policy)
        .cookie_provider(cookie_jar)
        .gzip(options.decompression)
        .deflate(options.decompression);

    if !options.keep_alive {
        builder = builder.pool_max_idle_per_host(0);
    }

    match &options.proxy {
        ProxyMode::System => {}
        ProxyMode::Disabled => builder = builder.no_proxy(),
        ProxyMode::Explicit(proxy_options) => {
            let mut proxy = Proxy::all(&proxy_options.url).map_err(|err| {
                TransportError::Configuration(format!(
                    "invalid proxy {:?}: {err}",
                    proxy_options.url
                ))
            })?;
            if let Some(username) = &proxy_options.username {
                proxy = proxy.basic_auth(
                    username,
                    proxy_options.password.as_deref().unwrap_or_default(),
                );
            }
            builder = builder.proxy(proxy);
        }
    }

    if let Some(pem) = &options.client_certificate {
        let identity = Identity::from_pem(pem).map_err(|err| {
            TransportError::Configuration(format!("invalid client certificate: {err}"))
        })?;
        builder = builder.identity(identity);
    }

    if matches!(options.credentials, Some(Credentials::DefaultCredentials)) {
        tracing::warn!("Default credentials are not supported, requests will be sent without them");
    }

    builder
        .build()
        .map_err(|err| TransportError::Configuration(format!("cannot build HTTP client: {err}")))
}

/// Caller-supplied headers. Applied with `RequestBuilder::headers`, so a
/// name set here replaces the transport's default for it.
fn caller_headers(headers: &[(String, String)]) -> TransportResult<HeaderMap> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|err| {
            TransportError::InvalidRequest(format!("invalid header name {name:?}: {err}"))
        })?;
        let header_value = HeaderValue::from_str(value).map_err(|err| {
            TransportError::InvalidRequest(format!("invalid value for header {name}: {err}"))
        })?;
        map.append(header_name, header_value);
    }
    Ok(map)
}

/// Whether a 401 response advertises the scheme `credentials` can answer.
fn answers_challenge(headers: &HeaderMap, credentials: &Credentials) -> bool {
    let Some(scheme) = credentials.scheme() else {
        return false;
    };
    headers
        .get_all(WWW_AUTHENTICATE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .filter_map(|challenge| challenge.split_whitespace().next())
        .any(|advertised| advertised.eq_ignore_ascii_case(scheme))
}
