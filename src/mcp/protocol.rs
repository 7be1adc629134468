//! JSON-RPC 2.0 message classification and MCP result payloads.

use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::dispatch::InvocationRequest;

/// MCP protocol revision this server speaks.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// Name advertised in `initialize`.
pub const SERVER_NAME: &str = "micro-blog-books";

pub const PARSE_ERROR: i64 = -32700;
pub const INVALID_REQUEST: i64 = -32600;
pub const METHOD_NOT_FOUND: i64 = -32601;
pub const INVALID_PARAMS: i64 = -32602;

/// Protocol-level error. Tool failures never use this; they travel inside a
/// successful `tools/call` result with `isError: true`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
}

impl RpcError {
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn parse_error(message: impl Into<String>) -> Self {
        Self::new(PARSE_ERROR, message)
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(INVALID_REQUEST, message)
    }

    pub fn method_not_found(method: &str) -> Self {
        Self::new(METHOD_NOT_FOUND, format!("Method not found: {}", method))
    }

    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::new(INVALID_PARAMS, message)
    }
}

/// A decoded inbound message.
#[derive(Debug, Clone, PartialEq)]
pub enum Incoming {
    /// Has an `id`; exactly one response is owed.
    Request {
        id: Value,
        method: String,
        params: Value,
    },
    /// No `id`; nothing is sent back.
    Notification { method: String },
    /// A response from the client (`result`/`error` without `method`).
    Response,
    /// Structurally invalid; answered with the carried error.
    Invalid { id: Value, error: RpcError },
}

/// Classify one parsed JSON value.
pub fn classify(message: Value) -> Incoming {
    let Value::Object(mut obj) = message else {
        return Incoming::Invalid {
            id: Value::Null,
            error: RpcError::invalid_request("Request must be a JSON object"),
        };
    };

    let id = obj.remove("id");
    let method = match obj.remove("method") {
        Some(Value::String(method)) => method,
        Some(_) => {
            return Incoming::Invalid {
                id: id.unwrap_or(Value::Null),
                error: RpcError::invalid_request("'method' must be a string"),
            };
        }
        None if obj.contains_key("result") || obj.contains_key("error") => {
            return Incoming::Response;
        }
        None => {
            return Incoming::Invalid {
                id: id.unwrap_or(Value::Null),
                error: RpcError::invalid_request("Missing 'method'"),
            };
        }
    };

    if obj.get("jsonrpc").and_then(Value::as_str) != Some("2.0") {
        return Incoming::Invalid {
            id: id.unwrap_or(Value::Null),
            error: RpcError::invalid_request("'jsonrpc' must be \"2.0\""),
        };
    }

    match id {
        None => Incoming::Notification { method },
        Some(id) => Incoming::Request {
            id,
            method,
            params: obj.remove("params").unwrap_or(Value::Null),
        },
    }
}

pub fn success_response(id: Value, result: Value) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "result": result,
    })
}

pub fn error_response(id: Value, error: RpcError) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "error": error,
    })
}

pub fn initialize_result() -> Value {
    json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": { "tools": { "listChanged": false } },
        "serverInfo": {
            "name": SERVER_NAME,
            "version": env!("CARGO_PKG_VERSION"),
        },
    })
}

/// Extract `{name, arguments}` from `tools/call` params.
///
/// Absent or null `arguments` is an empty map; anything else non-object is
/// rejected.
pub fn parse_tool_call(params: Value) -> Result<InvocationRequest, RpcError> {
    let Value::Object(mut params) = params else {
        return Err(RpcError::invalid_params("tools/call params must be an object"));
    };

    let name = match params.remove("name") {
        Some(Value::String(name)) => name,
        _ => return Err(RpcError::invalid_params("Missing tool name")),
    };

    let arguments = match params.remove("arguments") {
        None | Some(Value::Null) => Map::new(),
        Some(Value::Object(arguments)) => arguments,
        Some(_) => return Err(RpcError::invalid_params("'arguments' must be an object")),
    };

    Ok(InvocationRequest::new(name, arguments))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_classify_request_and_notification() {
        assert_eq!(
            classify(json!({"jsonrpc": "2.0", "id": 1, "method": "ping"})),
            Incoming::Request {
                id: json!(1),
                method: "ping".to_string(),
                params: Value::Null,
            }
        );
        assert_eq!(
            classify(json!({"jsonrpc": "2.0", "method": "notifications/initialized"})),
            Incoming::Notification {
                method: "notifications/initialized".to_string()
            }
        );
        assert_eq!(classify(json!({"jsonrpc": "2.0", "id": 4, "result": {}})), Incoming::Response);
    }

    #[test]
    fn test_classify_invalid() {
        let Incoming::Invalid { id, error } = classify(json!([1, 2])) else {
            panic!("array accepted");
        };
        assert_eq!(id, Value::Null);
        assert_eq!(error.code, INVALID_REQUEST);

        let Incoming::Invalid { id, error } = classify(json!({"id": "a", "method": "ping"})) else {
            panic!("missing jsonrpc accepted");
        };
        assert_eq!(id, json!("a"));
        assert_eq!(error.code, INVALID_REQUEST);
    }

    #[test]
    fn test_parse_tool_call() {
        let request = parse_tool_call(json!({"name": "get_bookshelves"})).unwrap();
        assert_eq!(request.tool_name, "get_bookshelves");
        assert!(request.arguments.is_empty());

        let request =
            parse_tool_call(json!({"name": "add_bookshelf", "arguments": {"name": "Sci-Fi"}})).unwrap();
        assert_eq!(request.arguments["name"], "Sci-Fi");

        assert_eq!(parse_tool_call(json!({})).unwrap_err().code, INVALID_PARAMS);
        assert_eq!(
            parse_tool_call(json!({"name": "x", "arguments": [1]})).unwrap_err().code,
            INVALID_PARAMS
        );
    }

    #[test]
    fn test_initialize_advertises_tools() {
        let result = initialize_result();
        assert_eq!(result["protocolVersion"], PROTOCOL_VERSION);
        assert_eq!(result["serverInfo"]["name"], SERVER_NAME);
        assert_eq!(result["capabilities"], json!({"tools": {"listChanged": false}}));
    }
}
