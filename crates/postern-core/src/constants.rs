/// Namespace URIs and protocol constants shared across crates
pub const EWS_NS_BASE: &str = "http://schemas.microsoft.com/exchange/services/2006";
pub const TYPES_NS: &str = const_str::concat!(EWS_NS_BASE, "/types");
pub const MESSAGES_NS: &str = const_str::concat!(EWS_NS_BASE, "/messages");

pub const SOAP_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";
pub const XSI_NS: &str = "http://www.w3.org/2001/XMLSchema-instance";

pub const DEFAULT_CONTENT_TYPE: &str = "text/xml; charset=utf-8";
pub const DEFAULT_ACCEPT: &str = "text/xml";
pub const DEFAULT_USER_AGENT: &str = concat!("postern/", env!("CARGO_PKG_VERSION"));

/// Default timeout for one exchange, in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 100_000;

/// Upper bound on redirect hops when auto-redirect is enabled.
pub const MAX_REDIRECTS: usize = 50;

pub const CLIENT_REQUEST_ID_HEADER: &str = "client-request-id";
pub const RETURN_CLIENT_REQUEST_ID_HEADER: &str = "return-client-request-id";
