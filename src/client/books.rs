//! HTTP implementation of [`BooksApi`] over `reqwest`.

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{Method, RequestBuilder, Url};
use serde_json::Value;

use super::{acknowledgment, BooksApi};
use crate::tools::{GoalUpdate, NewBook};
use crate::types::{ApiConfig, BookId, BookshelfId, Credential, Error, GoalId, Result};

/// Stateless-per-call client. Holds only immutable configuration and the
/// credential, so a shared reference is safe across concurrent calls.
#[derive(Debug, Clone)]
pub struct BooksClient {
    http: reqwest::Client,
    base_url: Url,
    credential: Credential,
}

impl BooksClient {
    pub fn new(config: &ApiConfig, credential: Credential) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| Error::config(format!("invalid base URL '{}': {}", config.base_url, e)))?;

        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| Error::config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url,
            credential,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| Error::internal(format!("invalid request path '{}': {}", path, e)))
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.http
            .request(method, url)
            .header(AUTHORIZATION, self.credential.bearer_header())
    }

    /// Send one request and return the body of a success response.
    async fn execute(&self, method: Method, path: &str, form: Option<&[(&str, String)]>) -> Result<String> {
        let url = self.url(path)?;
        tracing::debug!(%method, %url, "sending API request");

        let mut request = self.request(method, url.clone());
        if let Some(pairs) = form {
            request = request.form(pairs);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::network(url.as_str(), e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::network(url.as_str(), e.to_string()))?;
        tracing::debug!(status = status.as_u16(), %url, "API response");

        if !status.is_success() {
            return Err(Error::RemoteStatus {
                status: status.as_u16(),
                status_text: status_text(status),
                body: body.trim().to_string(),
            });
        }
        Ok(body)
    }

    async fn get_json(&self, path: &str) -> Result<Value> {
        let body = self.execute(Method::GET, path, None).await?;
        decode_body(&body)
    }

    async fn post_form(&self, path: &str, pairs: &[(&str, String)]) -> Result<()> {
        self.execute(Method::POST, path, Some(pairs)).await?;
        Ok(())
    }
}

fn status_text(status: reqwest::StatusCode) -> String {
    status
        .canonical_reason()
        .unwrap_or("Unknown Status")
        .to_string()
}

fn decode_body(body: &str) -> Result<Value> {
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_str(body)?)
}

#[async_trait]
impl BooksApi for BooksClient {
    async fn get_bookshelves(&self) -> Result<Value> {
        self.get_json("/books/bookshelves").await
    }

    async fn get_bookshelf_books(&self, bookshelf_id: BookshelfId) -> Result<Value> {
        self.get_json(&format!("/books/bookshelves/{}", bookshelf_id))
            .await
    }

    async fn add_bookshelf(&self, name: String) -> Result<Value> {
        self.post_form("/books/bookshelves", &[("name", name.clone())])
            .await?;
        Ok(acknowledgment(format!("Bookshelf '{}' created successfully", name)))
    }

    async fn rename_bookshelf(&self, bookshelf_id: BookshelfId, name: String) -> Result<Value> {
        self.post_form(
            &format!("/books/bookshelves/{}", bookshelf_id),
            &[("name", name.clone())],
        )
        .await?;
        Ok(acknowledgment(format!("Bookshelf renamed to '{}' successfully", name)))
    }

    async fn add_book(&self, book: NewBook) -> Result<Value> {
        let mut pairs = vec![
            ("title", book.title.clone()),
            ("author", book.author.clone()),
            ("bookshelf_id", book.bookshelf_id.to_string()),
        ];
        if let Some(isbn) = &book.isbn {
            pairs.push(("isbn", isbn.clone()));
        }
        if let Some(cover_url) = &book.cover_url {
            pairs.push(("cover_url", cover_url.clone()));
        }

        self.post_form("/books", &pairs).await?;
        Ok(acknowledgment(format!(
            "Book '{}' by {} added successfully",
            book.title, book.author
        )))
    }

    async fn move_book(&self, book_id: BookId, bookshelf_id: BookshelfId) -> Result<Value> {
        self.post_form(
            &format!("/books/bookshelves/{}/assign", bookshelf_id),
            &[("book_id", book_id.to_string())],
        )
        .await?;
        Ok(acknowledgment(format!(
            "Book moved to bookshelf {} successfully",
            bookshelf_id
        )))
    }

    async fn remove_book(&self, bookshelf_id: BookshelfId, book_id: BookId) -> Result<Value> {
        self.execute(
            Method::DELETE,
            &format!("/books/bookshelves/{}/remove/{}", bookshelf_id, book_id),
            None,
        )
        .await?;
        Ok(acknowledgment("Book removed from bookshelf successfully"))
    }

    async fn change_book_cover(
        &self,
        bookshelf_id: BookshelfId,
        book_id: BookId,
        cover_url: String,
    ) -> Result<Value> {
        self.post_form(
            &format!("/books/bookshelves/{}/cover/{}", bookshelf_id, book_id),
            &[("cover_url", cover_url)],
        )
        .await?;
        Ok(acknowledgment("Book cover updated successfully"))
    }

    async fn get_reading_goals(&self) -> Result<Value> {
        self.get_json("/books/goals").await
    }

    async fn get_goal_progress(&self, goal_id: GoalId) -> Result<Value> {
        self.get_json(&format!("/books/goals/{}", goal_id)).await
    }

    async fn update_reading_goal(&self, update: GoalUpdate) -> Result<Value> {
        let mut pairs = vec![("value", update.value.to_string())];
        if let Some(progress) = update.progress {
            pairs.push(("progress", progress.to_string()));
        }

        self.post_form(&format!("/books/goals/{}", update.goal_id), &pairs)
            .await?;
        Ok(acknowledgment("Reading goal updated successfully"))
    }
}
