//! Application error types.
//!
//! All errors use `thiserror` for automatic Error trait derivation. Each
//! variant corresponds to one failure class the dispatch router envelopes,
//! so callers classify failures by matching, never by message text.

use thiserror::Error;

/// Application result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error enum for the Micro.blog Books server.
#[derive(Error, Debug)]
pub enum Error {
    /// Startup configuration errors (missing credential, bad base URL).
    #[error("configuration error: {0}")]
    Config(String),

    /// Argument validation errors. Raised before any remote call.
    #[error("validation error: {0}")]
    Validation(String),

    /// Tool name not present in the catalog.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// The remote host could not be reached (DNS, refused, timeout).
    #[error("Network error: Unable to connect to {url}: {reason}")]
    Network { url: String, reason: String },

    /// The remote API answered with a non-success status.
    #[error("HTTP {status}: {status_text}{}", format_body(.body))]
    RemoteStatus {
        status: u16,
        status_text: String,
        body: String,
    },

    /// Internal errors, including faults caught at the dispatch boundary.
    #[error("internal error: {0}")]
    Internal(String),

    /// Serialization/deserialization errors.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

fn format_body(body: &str) -> String {
    if body.is_empty() {
        String::new()
    } else {
        format!(" - {body}")
    }
}

impl Error {
    /// Stable label for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Config(_) => "config",
            Error::Validation(_) => "validation",
            Error::UnknownTool(_) => "unknown_tool",
            Error::Network { .. } => "network",
            Error::RemoteStatus { .. } => "remote_status",
            Error::Internal(_) => "internal",
            Error::Serialization(_) => "serialization",
        }
    }
}

// Convenience constructors
impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn unknown_tool(name: impl Into<String>) -> Self {
        Self::UnknownTool(name.into())
    }

    pub fn network(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Network {
            url: url.into(),
            reason: reason.into(),
        }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
