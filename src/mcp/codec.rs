//! Frame codec for the stdio wire protocol.
//!
//! Frame format:
//! ```text
//! ┌──────────────────────────────┬────┐
//! │ JSON-RPC message (UTF-8)     │ \n │
//! └──────────────────────────────┴────┘
//! ```
//! One message per line; messages must not contain raw newlines. Blank
//! lines are skipped and a trailing `\r` is tolerated.

use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

/// One line read from the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    /// Message bytes without the line terminator.
    Message(Vec<u8>),
    /// Line exceeded the size limit; carries the bytes seen before giving up.
    Oversized(usize),
}

/// Reads newline-delimited frames without buffering past `max_frame_bytes`.
///
/// An oversized line is reported as soon as the limit is crossed. The rest
/// of that line is discarded on the following read.
#[derive(Debug)]
pub struct FrameReader<R> {
    inner: R,
    max_frame_bytes: usize,
    buf: Vec<u8>,
    skipping: bool,
}

impl<R: AsyncBufRead + Unpin> FrameReader<R> {
    pub fn new(inner: R, max_frame_bytes: usize) -> Self {
        Self {
            inner,
            max_frame_bytes,
            buf: Vec::new(),
            skipping: false,
        }
    }

    /// Read one frame. Returns `None` on clean EOF.
    pub async fn next_frame(&mut self) -> std::io::Result<Option<Frame>> {
        loop {
            if self.skipping && !self.skip_line().await? {
                return Ok(None);
            }

            self.buf.clear();
            let mut started = false;
            loop {
                let available = self.inner.fill_buf().await?;
                if available.is_empty() {
                    if !started {
                        return Ok(None);
                    }
                    break;
                }
                started = true;

                if let Some(pos) = available.iter().position(|b| *b == b'\n') {
                    self.buf.extend_from_slice(&available[..pos]);
                    self.inner.consume(pos + 1);
                    break;
                }

                let len = available.len();
                self.buf.extend_from_slice(available);
                self.inner.consume(len);

                // One spare byte for a trailing '\r'.
                if self.buf.len() > self.max_frame_bytes.saturating_add(1) {
                    let seen = self.buf.len();
                    self.buf.clear();
                    self.skipping = true;
                    return Ok(Some(Frame::Oversized(seen)));
                }
            }

            if self.buf.last() == Some(&b'\r') {
                self.buf.pop();
            }
            if self.buf.iter().all(u8::is_ascii_whitespace) {
                continue;
            }
            if self.buf.len() > self.max_frame_bytes {
                let seen = self.buf.len();
                self.buf.clear();
                return Ok(Some(Frame::Oversized(seen)));
            }
            return Ok(Some(Frame::Message(std::mem::take(&mut self.buf))));
        }
    }

    /// Discard input through the next newline. Returns `false` on EOF.
    async fn skip_line(&mut self) -> std::io::Result<bool> {
        loop {
            let available = self.inner.fill_buf().await?;
            if available.is_empty() {
                return Ok(false);
            }
            if let Some(pos) = available.iter().position(|b| *b == b'\n') {
                self.inner.consume(pos + 1);
                self.skipping = false;
                return Ok(true);
            }
            let len = available.len();
            self.inner.consume(len);
        }
    }
}

/// Write one message followed by a newline, then flush.
pub async fn write_frame<W: AsyncWrite + Unpin>(writer: &mut W, message: &Value) -> std::io::Result<()> {
    let mut payload = serde_json::to_vec(message).map_err(|e| {
        tracing::error!("JSON encoding failed: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
    })?;
    payload.push(b'\n');
    writer.write_all(&payload).await?;
    writer.flush().await?;
    Ok(())
}
