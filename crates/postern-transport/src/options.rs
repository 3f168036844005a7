use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use postern_core::config::Settings;
use postern_core::constants::{
    DEFAULT_ACCEPT, DEFAULT_CONTENT_TYPE, DEFAULT_TIMEOUT_MS, DEFAULT_USER_AGENT,
};
use reqwest::cookie::Jar;

use crate::error::{TransportError, TransportResult};

/// Credentials attached to requests.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    Basic { username: String, password: String },
    Bearer(String),
    /// Ambient platform credentials. Not available on this HTTP stack; a
    /// transport configured with them logs a warning and sends none.
    DefaultCredentials,
}

impl Credentials {
    /// Authorization scheme these credentials answer, as advertised in
    /// `WWW-Authenticate`.
    #[must_use]
    pub fn scheme(&self) -> Option<&'static str> {
        match self {
            Self::Basic { .. } => Some("Basic"),
            Self::Bearer(_) => Some("Bearer"),
            Self::DefaultCredentials => None,
        }
    }

    pub(crate) fn apply(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self {
            Self::Basic { username, password } => builder.basic_auth(username, Some(password)),
            Self::Bearer(token) => builder.bearer_auth(token),
            Self::DefaultCredentials => builder,
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"<redacted>")
                .finish(),
            Self::Bearer(_) => f.debug_tuple("Bearer").field(&"<redacted>").finish(),
            Self::DefaultCredentials => f.write_str("DefaultCredentials"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyOptions {
    pub url: String,
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Proxy selection for the client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ProxyMode {
    /// Use the proxy named by the environment, if any.
    #[default]
    System,
    /// Connect directly, ignoring the environment.
    Disabled,
    Explicit(ProxyOptions),
}

/// Client-wide settings of an [`HttpTransport`](crate::HttpTransport).
#[derive(Debug, Clone)]
pub struct TransportOptions {
    pub accept: String,
    pub user_agent: String,
    pub content_type: String,
    /// Follow redirects, up to 50 hops.
    pub allow_auto_redirect: bool,
    pub proxy: ProxyMode,
    pub credentials: Option<Credentials>,
    /// PEM bundle holding the client certificate and its private key.
    pub client_certificate: Option<Vec<u8>>,
    /// Shared cookie container. A fresh jar is created when unset.
    pub cookie_jar: Option<Arc<Jar>>,
    /// Send credentials on the first attempt instead of waiting for a
    /// challenge.
    pub pre_authenticate: bool,
    pub keep_alive: bool,
    pub timeout: Duration,
    /// Accept and transparently decode gzip and deflate bodies.
    pub decompression: bool,
    pub send_client_request_id: bool,
}

impl Default for TransportOptions {
    fn default() -> Self {
        Self {
            accept: DEFAULT_ACCEPT.to_owned(),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            content_type: DEFAULT_CONTENT_TYPE.to_owned(),
            allow_auto_redirect: true,
            proxy: ProxyMode::default(),
            credentials: None,
            client_certificate: None,
            cookie_jar: None,
            pre_authenticate: false,
            keep_alive: true,
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            decompression: true,
            send_client_request_id: true,
        }
    }
}

impl TransportOptions {
    /// ## Summary
    /// Builds transport options from loaded settings.
    ///
    /// ## Errors
    /// Returns a configuration error if the client certificate cannot be
    /// read or the credentials section names no usable credential.
    pub fn from_settings(settings: &Settings) -> TransportResult<Self> {
        let http = &settings.http;

        let proxy = http.proxy.as_ref().map_or(ProxyMode::System, |proxy| {
            ProxyMode::Explicit(ProxyOptions {
                url: proxy.url.clone(),
                username: proxy.username.clone(),
                password: proxy.password.clone(),
            })
        });

        let client_certificate = http
            .client_certificate_path
            .as_deref()
            .map(|path| {
                std::fs::read(path).map_err(|err| {
                    TransportError::Configuration(format!(
                        "cannot read client certificate {path}: {err}"
                    ))
                })
            })
            .transpose()?;

        let credentials = match &settings.credentials {
            None => None,
            Some(creds) if creds.use_default_credentials => Some(Credentials::DefaultCredentials),
            Some(creds) => match (&creds.token, &creds.username, &creds.password) {
                (Some(token), _, _) => Some(Credentials::Bearer(token.clone())),
                (None, Some(username), password) => Some(Credentials::Basic {
                    username: username.clone(),
                    password: password.clone().unwrap_or_default(),
                }),
                (None, None, _) => {
                    return Err(TransportError::Configuration(
                        "credentials need a username or a token".to_owned(),
                    ));
                }
            },
        };

        Ok(Self {
            accept: settings.service.accept.clone(),
            user_agent: settings.service.user_agent.clone(),
            content_type: settings.service.content_type.clone(),
            allow_auto_redirect: http.allow_auto_redirect,
            proxy,
            credentials,
            client_certificate,
            cookie_jar: None,
            pre_authenticate: http.pre_authenticate,
            keep_alive: http.keep_alive,
            timeout: Duration::from_millis(http.timeout_ms),
            decompression: http.decompression,
            send_client_request_id: http.send_client_request_id,
        })
    }
}
