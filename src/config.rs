//! Gateway configuration.
//!
//! Everything is read once at startup from CLI flags, falling back to the
//! environment (`PORT`, `CONTAINER_APP_HOSTNAME`, `API_KEY`, ...). The
//! resulting [`GatewayConfig`] is immutable and passed explicitly to the
//! auth gate and the agent card builder.

use axum::http::HeaderName;
use axum::http::header::InvalidHeaderName;
use clap::{Args, ValueEnum};
use std::fmt;
use std::str::FromStr;
use zeroize::Zeroizing;

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_API_KEY_HEADER: &str = "X-API-Key";

/// Name of the header carrying the API key.
///
/// Parsed once at startup; keeps the spelling as configured for the card and
/// error messages, while lookups use the normalized [`HeaderName`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiKeyHeader {
    name: HeaderName,
    display: String,
}

impl ApiKeyHeader {
    pub fn name(&self) -> &HeaderName {
        &self.name
    }

    pub fn as_str(&self) -> &str {
        &self.display
    }
}

impl FromStr for ApiKeyHeader {
    type Err = InvalidHeaderName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = HeaderName::from_bytes(s.as_bytes())?;
        Ok(Self {
            name,
            display: s.to_string(),
        })
    }
}

impl Default for ApiKeyHeader {
    fn default() -> Self {
        Self {
            name: HeaderName::from_static("x-api-key"),
            display: DEFAULT_API_KEY_HEADER.to_string(),
        }
    }
}

impl fmt::Display for ApiKeyHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

/// Raw command-line / environment arguments.
#[derive(Args, Clone)]
pub struct GatewayArgs {
    /// Address to bind the HTTP listener to
    #[arg(long, env = "BIND", default_value = "0.0.0.0")]
    pub bind: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Public hostname; when set the card advertises https://<host>/
    #[arg(long, env = "CONTAINER_APP_HOSTNAME")]
    pub public_host: Option<String>,

    /// Shared secret required on task routes (empty disables auth)
    #[arg(long, env = "API_KEY", default_value = "", hide_env_values = true)]
    pub api_key: String,

    /// Header carrying the shared secret
    #[arg(long, env = "API_KEY_HEADER", default_value = DEFAULT_API_KEY_HEADER)]
    pub api_key_header: ApiKeyHeader,

    /// Log output format
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

/// Validated, immutable gateway configuration.
#[derive(Clone)]
pub struct GatewayConfig {
    pub bind: String,
    pub port: u16,
    pub public_host: Option<String>,
    pub api_key: Option<Zeroizing<String>>,
    pub api_key_header: ApiKeyHeader,
}

impl GatewayConfig {
    /// Base URL advertised on the agent card.
    pub fn public_url(&self) -> String {
        match &self.public_host {
            Some(host) => format!("https://{}/", host),
            None => format!("http://localhost:{}/", self.port),
        }
    }

    pub fn auth_enabled(&self) -> bool {
        self.api_key.is_some()
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            public_host: None,
            api_key: None,
            api_key_header: ApiKeyHeader::default(),
        }
    }
}

impl From<GatewayArgs> for GatewayConfig {
    fn from(args: GatewayArgs) -> Self {
        let public_host = args
            .public_host
            .map(|h| h.trim().to_string())
            .filter(|h| !h.is_empty());
        let api_key = Some(args.api_key)
            .filter(|k| !k.is_empty())
            .map(Zeroizing::new);

        Self {
            bind: args.bind,
            port: args.port,
            public_host,
            api_key,
            api_key_header: args.api_key_header,
        }
    }
}

impl fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("bind", &self.bind)
            .field("port", &self.port)
            .field("public_host", &self.public_host)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("api_key_header", &self.api_key_header.as_str())
            .finish()
    }
}
