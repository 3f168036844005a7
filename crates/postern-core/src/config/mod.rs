use anyhow::Result;
use config::{Config, ConfigBuilder, builder::DefaultState};
use serde::Deserialize;

use crate::constants::{DEFAULT_ACCEPT, DEFAULT_CONTENT_TYPE, DEFAULT_TIMEOUT_MS, DEFAULT_USER_AGENT};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub service: ServiceConfig,
    pub http: HttpConfig,
    pub credentials: Option<CredentialsConfig>,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    pub url: Option<String>,
    pub user_agent: String,
    pub accept: String,
    pub content_type: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    pub timeout_ms: u64,
    pub allow_auto_redirect: bool,
    pub keep_alive: bool,
    pub pre_authenticate: bool,
    pub decompression: bool,
    pub send_client_request_id: bool,
    pub proxy: Option<ProxyConfig>,
    pub client_certificate_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProxyConfig {
    pub url: String,
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Clone, Deserialize)]
pub struct CredentialsConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub token: Option<String>,
    #[serde(default)]
    pub use_default_credentials: bool,
}

impl std::fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsConfig")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("use_default_credentials", &self.use_default_credentials)
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Settings {
    /// ## Summary
    /// Loads configuration from `postern.toml` and `POSTERN__*` environment variables
    /// into a `Settings`. Environment variables take precedence over file values.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load() -> Result<Self> {
        Ok(Self::defaults()?
            // TOML file
            .add_source(config::File::with_name("postern.toml").required(false))
            // Environment, e.g. POSTERN__HTTP__TIMEOUT_MS
            .add_source(
                config::Environment::with_prefix("POSTERN")
                    .prefix_separator("__")
                    .separator("__")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<Settings>()?)
    }

    /// ## Summary
    /// Builds settings from an inline TOML document layered over the defaults.
    ///
    /// ## Errors
    /// Returns an error if the document is malformed or has the wrong shape.
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        Ok(Self::defaults()?
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?
            .try_deserialize::<Settings>()?)
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>> {
        Ok(Config::builder()
            .set_default("service.user_agent", DEFAULT_USER_AGENT)?
            .set_default("service.accept", DEFAULT_ACCEPT)?
            .set_default("service.content_type", DEFAULT_CONTENT_TYPE)?
            .set_default("http.timeout_ms", DEFAULT_TIMEOUT_MS)?
            .set_default("http.allow_auto_redirect", true)?
            .set_default("http.keep_alive", true)?
            .set_default("http.pre_authenticate", false)?
            .set_default("http.decompression", true)?
            .set_default("http.send_client_request_id", true)?
            .set_default("logging.level", "info")?)
    }
}

/// ## Summary
/// Loads configuration from environment variables, `.env`, and `postern.toml`.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    let settings = Settings::load()?;
    tracing::debug!(?settings, "Settings loaded");
    Ok(settings)
}
