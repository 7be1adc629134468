//! Configuration structures.
//!
//! Configuration is assembled once at process start from CLI flags and
//! environment variables, then passed by reference to the components that
//! need it. Nothing in the request path reads the environment.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use super::errors::{Error, Result};

/// Production API host.
pub const DEFAULT_BASE_URL: &str = "https://micro.blog";

/// Global server configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Remote API configuration.
    #[serde(default)]
    pub api: ApiConfig,

    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,

    /// Stdio transport configuration.
    #[serde(default)]
    pub transport: TransportConfig,
}

/// Remote API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Scheme and host every request is issued against.
    pub base_url: String,

    /// Value of the `User-Agent` header.
    pub user_agent: String,

    /// Upper bound on a single HTTP exchange. Not a retry policy.
    #[serde(with = "humantime_serde")]
    pub request_timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: format!("Micro Books MCP Server/{}", env!("CARGO_PKG_VERSION")),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Tracing log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable JSON log formatting.
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

/// Stdio transport configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransportConfig {
    /// Maximum accepted size of one JSON-RPC line, in bytes.
    pub max_frame_bytes: usize,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            max_frame_bytes: 4 * 1024 * 1024,
        }
    }
}

// =============================================================================
// Credential
// =============================================================================

/// Bearer token for the remote API.
///
/// Never printed: `Debug` is redacted and there is no `Display` impl.
#[derive(Clone)]
pub struct Credential(String);

impl Credential {
    /// Build a credential, rejecting empty or whitespace-only tokens.
    pub fn new(token: impl Into<String>) -> Result<Self> {
        let token = token.into();
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(Error::config("bearer token is required and cannot be empty"));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// `Authorization` header value.
    pub(crate) fn bearer_header(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}
