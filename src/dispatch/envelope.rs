//! Result envelope — the only shape a tool invocation ever returns.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{json, Value};

use crate::types::Error;

/// Failure half of the envelope, serialized as
/// `{error: true, message, tool, timestamp}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolFailure {
    error: bool,
    pub message: String,
    pub tool: String,
    pub timestamp: String,
}

impl ToolFailure {
    pub fn new(tool: &str, err: &Error) -> Self {
        Self::at(tool, err, Utc::now())
    }

    pub fn at(tool: &str, err: &Error, when: DateTime<Utc>) -> Self {
        Self {
            error: true,
            message: format!("Error executing {}: {}", tool, err),
            tool: tool.to_string(),
            timestamp: when.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// Outcome of one tool invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultEnvelope {
    Success(Value),
    Failure(ToolFailure),
}

impl ResultEnvelope {
    pub fn failure(tool: &str, err: &Error) -> Self {
        ResultEnvelope::Failure(ToolFailure::new(tool, err))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ResultEnvelope::Failure(_))
    }

    /// The JSON document the caller sees inside the text block.
    pub fn to_value(&self) -> Value {
        match self {
            ResultEnvelope::Success(payload) => payload.clone(),
            ResultEnvelope::Failure(failure) => json!(failure),
        }
    }

    /// Pretty-printed JSON text.
    pub fn to_text(&self) -> String {
        serde_json::to_string_pretty(&self.to_value()).unwrap_or_else(|_| "{}".to_string())
    }

    /// `tools/call` result: a single text content block.
    pub fn to_call_result(&self) -> Value {
        json!({
            "content": [{ "type": "text", "text": self.to_text() }],
            "isError": self.is_error(),
        })
    }
}
