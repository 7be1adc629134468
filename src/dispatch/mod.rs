//! Dispatch router — catalog lookup, validation, remote call, enveloping.
//!
//! Per invocation:
//! ```text
//! RECEIVED ─┬─ unknown tool ──────────────────────────────┐
//!           └─ VALIDATING ─┬─ VALIDATION_FAILED ──────────┤
//!                          └─ CALLING ─┬─ REMOTE_SUCCESS ─┼─→ ENVELOPED
//!                                      └─ REMOTE_FAILED ──┘
//! ```
//! Every path ends in exactly one [`ResultEnvelope`]. Panics raised while a
//! tool runs are caught here and enveloped as internal errors.

mod envelope;

pub use envelope::{ResultEnvelope, ToolFailure};

use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::time::Instant;

use futures::FutureExt;
use serde_json::{Map, Value};

use crate::client::BooksApi;
use crate::tools::{validate_arguments, ToolCall, ToolCatalog};
use crate::types::{Error, Result};

/// One inbound tool invocation. Discarded once its envelope is produced.
#[derive(Debug, Clone, PartialEq)]
pub struct InvocationRequest {
    pub tool_name: String,
    pub arguments: Map<String, Value>,
}

impl InvocationRequest {
    pub fn new(tool_name: impl Into<String>, arguments: Map<String, Value>) -> Self {
        Self {
            tool_name: tool_name.into(),
            arguments,
        }
    }
}

/// Routes invocations to a [`BooksApi`] implementation.
#[derive(Debug)]
pub struct ToolRouter<A> {
    catalog: ToolCatalog,
    api: A,
}

impl<A: BooksApi> ToolRouter<A> {
    pub fn new(api: A) -> Self {
        Self {
            catalog: ToolCatalog::new(),
            api,
        }
    }

    pub fn catalog(&self) -> &ToolCatalog {
        &self.catalog
    }

    /// Answer an "enumerate tools" request.
    pub fn list_tools(&self) -> Value {
        self.catalog.list_payload()
    }

    /// Run one invocation to completion. Never fails.
    pub async fn invoke(&self, request: &InvocationRequest) -> ResultEnvelope {
        let tool = request.tool_name.as_str();
        let started = Instant::now();

        let outcome = guarded(self.run(request)).await;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        match outcome {
            Ok(payload) => {
                tracing::info!(tool, elapsed_ms, "tool call succeeded");
                ResultEnvelope::Success(payload)
            }
            Err(err) => {
                tracing::warn!(tool, elapsed_ms, kind = err.kind(), error = %err, "tool call failed");
                ResultEnvelope::failure(tool, &err)
            }
        }
    }

    async fn run(&self, request: &InvocationRequest) -> Result<Value> {
        let definition = self
            .catalog
            .get(&request.tool_name)
            .ok_or_else(|| Error::unknown_tool(request.tool_name.as_str()))?;

        let args = validate_arguments(definition, &request.arguments)?;
        let call = ToolCall::from_args(&args)?;
        self.execute(call).await
    }

    /// Issue the single remote operation for a typed call.
    pub async fn execute(&self, call: ToolCall) -> Result<Value> {
        match call {
            ToolCall::GetBookshelves => self.api.get_bookshelves().await,
            ToolCall::GetBookshelfBooks { bookshelf_id } => {
                self.api.get_bookshelf_books(bookshelf_id).await
            }
            ToolCall::AddBookshelf { name } => self.api.add_bookshelf(name).await,
            ToolCall::RenameBookshelf { bookshelf_id, name } => {
                self.api.rename_bookshelf(bookshelf_id, name).await
            }
            ToolCall::AddBook(book) => self.api.add_book(book).await,
            ToolCall::MoveBook {
                book_id,
                bookshelf_id,
            } => self.api.move_book(book_id, bookshelf_id).await,
            ToolCall::RemoveBook {
                bookshelf_id,
                book_id,
            } => self.api.remove_book(bookshelf_id, book_id).await,
            ToolCall::ChangeBookCover {
                bookshelf_id,
                book_id,
                cover_url,
            } => {
                self.api
                    .change_book_cover(bookshelf_id, book_id, cover_url)
                    .await
            }
            ToolCall::GetReadingGoals => self.api.get_reading_goals().await,
            ToolCall::GetGoalProgress { goal_id } => self.api.get_goal_progress(goal_id).await,
            ToolCall::UpdateReadingGoal(update) => self.api.update_reading_goal(update).await,
        }
    }
}

/// Convert a panic inside `fut` into `Error::Internal`.
async fn guarded<F>(fut: F) -> Result<Value>
where
    F: Future<Output = Result<Value>>,
{
    AssertUnwindSafe(fut)
        .catch_unwind()
        .await
        .unwrap_or_else(|panic| Err(Error::internal(panic_message(panic.as_ref()))))
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    let detail = panic
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| panic.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string());
    format!("tool execution panicked: {}", detail)
}

// =============================================================================
// Tests
// =============================================================================
