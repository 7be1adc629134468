//! Stdio serve loop — read frames, route methods, write responses.

use serde_json::{json, Value};
use tokio::io::{AsyncBufRead, AsyncWrite};
use tokio_util::sync::CancellationToken;

use super::codec::{write_frame, Frame, FrameReader};
use super::protocol::{
    classify, error_response, initialize_result, parse_tool_call, success_response, Incoming,
    RpcError,
};
use crate::client::BooksApi;
use crate::dispatch::ToolRouter;
use crate::types::TransportConfig;

/// What one read produced.
enum Step {
    Reply(Value),
    Silent,
    Eof,
}

/// MCP server over a line-oriented byte stream.
///
/// Messages are handled one at a time in arrival order.
#[derive(Debug)]
pub struct McpServer<A> {
    router: ToolRouter<A>,
    transport: TransportConfig,
    cancel: CancellationToken,
}

impl<A: BooksApi> McpServer<A> {
    pub fn new(router: ToolRouter<A>, transport: TransportConfig) -> Self {
        Self {
            router,
            transport,
            cancel: CancellationToken::new(),
        }
    }

    /// Token that stops [`serve`](Self::serve) when cancelled.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Request shutdown. An in-flight call is abandoned, not awaited.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    /// Run until EOF, cancellation, or an I/O failure on either stream.
    pub async fn serve<R, W>(&self, reader: R, mut writer: W) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        tracing::info!(
            "MCP server ready on stdio ({} tools, max_frame_bytes={})",
            self.router.catalog().len(),
            self.transport.max_frame_bytes,
        );

        let mut frames = FrameReader::new(reader, self.transport.max_frame_bytes);
        loop {
            let step = tokio::select! {
                _ = self.cancel.cancelled() => {
                    tracing::info!("MCP server shutting down");
                    break;
                }
                step = self.next_step(&mut frames) => step?,
            };

            match step {
                Step::Reply(response) => write_frame(&mut writer, &response).await?,
                Step::Silent => {}
                Step::Eof => {
                    tracing::info!("input closed, stopping");
                    break;
                }
            }
        }
        Ok(())
    }

    async fn next_step<R: AsyncBufRead + Unpin>(
        &self,
        frames: &mut FrameReader<R>,
    ) -> std::io::Result<Step> {
        let bytes = match frames.next_frame().await? {
            None => return Ok(Step::Eof),
            Some(Frame::Oversized(len)) => {
                tracing::warn!(len, "discarding oversized frame");
                return Ok(Step::Reply(error_response(
                    Value::Null,
                    RpcError::parse_error(format!(
                        "Frame too large: exceeds {} bytes",
                        self.transport.max_frame_bytes
                    )),
                )));
            }
            Some(Frame::Message(bytes)) => bytes,
        };

        let message: Value = match serde_json::from_slice(&bytes) {
            Ok(v) => v,
            Err(e) => {
                tracing::debug!("unparseable frame: {}", e);
                return Ok(Step::Reply(error_response(
                    Value::Null,
                    RpcError::parse_error(format!("Parse error: {}", e)),
                )));
            }
        };

        Ok(match self.handle_message(message).await {
            Some(response) => Step::Reply(response),
            None => Step::Silent,
        })
    }

    /// Handle one decoded message. Returns the response, if one is owed.
    pub async fn handle_message(&self, message: Value) -> Option<Value> {
        match classify(message) {
            Incoming::Request { id, method, params } => {
                tracing::debug!(%method, "request");
                Some(match self.handle_request(&method, params).await {
                    Ok(result) => success_response(id, result),
                    Err(error) => error_response(id, error),
                })
            }
            Incoming::Notification { method } => {
                tracing::debug!(%method, "notification");
                None
            }
            Incoming::Response => None,
            Incoming::Invalid { id, error } => Some(error_response(id, error)),
        }
    }

    async fn handle_request(&self, method: &str, params: Value) -> Result<Value, RpcError> {
        match method {
            "initialize" => Ok(initialize_result()),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(self.router.list_tools()),
            "tools/call" => {
                let request = parse_tool_call(params)?;
                Ok(self.router.invoke(&request).await.to_call_result())
            }
            other => Err(RpcError::method_not_found(other)),
        }
    }
}
