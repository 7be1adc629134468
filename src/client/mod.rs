//! Remote resource client for the Micro.blog Books API.
//!
//! [`BooksApi`] has one operation per tool. Each call issues exactly one
//! HTTP request and is never retried; retry policy belongs to the caller.

mod books;

pub use books::BooksClient;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::tools::{GoalUpdate, NewBook};
use crate::types::{BookId, BookshelfId, GoalId, Result};

/// Operations against the remote bookshelf and reading-goal resources.
///
/// Read operations return the decoded response body; mutating operations
/// return an [`acknowledgment`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BooksApi: Send + Sync {
    async fn get_bookshelves(&self) -> Result<Value>;

    async fn get_bookshelf_books(&self, bookshelf_id: BookshelfId) -> Result<Value>;

    async fn add_bookshelf(&self, name: String) -> Result<Value>;

    async fn rename_bookshelf(&self, bookshelf_id: BookshelfId, name: String) -> Result<Value>;

    async fn add_book(&self, book: NewBook) -> Result<Value>;

    async fn move_book(&self, book_id: BookId, bookshelf_id: BookshelfId) -> Result<Value>;

    async fn remove_book(&self, bookshelf_id: BookshelfId, book_id: BookId) -> Result<Value>;

    async fn change_book_cover(
        &self,
        bookshelf_id: BookshelfId,
        book_id: BookId,
        cover_url: String,
    ) -> Result<Value>;

    async fn get_reading_goals(&self) -> Result<Value>;

    async fn get_goal_progress(&self, goal_id: GoalId) -> Result<Value>;

    async fn update_reading_goal(&self, update: GoalUpdate) -> Result<Value>;
}

/// `{success: true, message}` payload for endpoints without a useful body.
pub fn acknowledgment(message: impl Into<String>) -> Value {
    json!({
        "success": true,
        "message": message.into(),
    })
}
