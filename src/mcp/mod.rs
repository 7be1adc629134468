//! MCP stdio transport.
//!
//! Newline-delimited JSON-RPC 2.0 on stdin/stdout. Stdout carries protocol
//! frames only; diagnostics go to stderr.

pub mod codec;
pub mod protocol;
pub mod server;

pub use codec::{write_frame, Frame, FrameReader};
pub use protocol::{RpcError, PROTOCOL_VERSION, SERVER_NAME};
pub use server::McpServer;
