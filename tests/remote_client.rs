//! Remote client integration tests — real HTTP against a local axum mock.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use pretty_assertions::assert_eq;
use serde_json::json;

use micro_books_mcp::client::{BooksApi, BooksClient};
use micro_books_mcp::tools::{GoalUpdate, NewBook};
use micro_books_mcp::types::{
    ApiConfig, BookId, BookshelfId, Credential, GoalId, GoalProgress, GoalTarget,
};
use micro_books_mcp::Error;

const TOKEN: &str = "test-token-123";

/// One request as seen by the mock.
#[derive(Debug, Clone)]
struct Captured {
    method: Method,
    path: String,
    authorization: Option<String>,
    user_agent: Option<String>,
    content_type: Option<String>,
    body: String,
}

#[derive(Debug, Clone, Default)]
struct MockState {
    captured: Arc<Mutex<Vec<Captured>>>,
}

impl MockState {
    fn requests(&self) -> Vec<Captured> {
        self.captured.lock().unwrap().clone()
    }
}

fn header_text(headers: &HeaderMap, name: header::HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

async fn record(
    State(state): State<MockState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    state.captured.lock().unwrap().push(Captured {
        method: method.clone(),
        path: uri.path().to_string(),
        authorization: header_text(&headers, header::AUTHORIZATION),
        user_agent: header_text(&headers, header::USER_AGENT),
        content_type: header_text(&headers, header::CONTENT_TYPE),
        body,
    });

    match (method, uri.path()) {
        (Method::GET, "/books/bookshelves") => {
            Json(json!([{"id": 1, "title": "Currently reading"}])).into_response()
        }
        (_, "/books/bookshelves/999") => {
            (StatusCode::NOT_FOUND, "Bookshelf not found\n").into_response()
        }
        (Method::GET, "/books/goals/5") => StatusCode::OK.into_response(),
        (Method::GET, "/books/goals/6") => (StatusCode::OK, "<html>").into_response(),
        (Method::GET, "/books/goals/7") => StatusCode::from_u16(599).unwrap().into_response(),
        _ => (StatusCode::OK, "ignored").into_response(),
    }
}

/// Spin up the mock on a random port.
async fn start_mock() -> (SocketAddr, MockState) {
    let state = MockState::default();
    let app = Router::new().fallback(record).with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (addr, state)
}

fn client_for(base_url: String) -> BooksClient {
    let config = ApiConfig {
        base_url,
        ..ApiConfig::default()
    };
    BooksClient::new(&config, Credential::new(TOKEN).unwrap()).unwrap()
}

async fn mock_client() -> (BooksClient, MockState) {
    let (addr, state) = start_mock().await;
    (client_for(format!("http://{}", addr)), state)
}

#[tokio::test]
async fn test_add_book_sends_form_with_headers() {
    let (client, state) = mock_client().await;

    let result = client
        .add_book(NewBook {
            title: "Dune".to_string(),
            author: "Herbert".to_string(),
            bookshelf_id: BookshelfId::new(3).unwrap(),
            isbn: None,
            cover_url: None,
        })
        .await
        .unwrap();

    assert_eq!(
        result,
        json!({"success": true, "message": "Book 'Dune' by Herbert added successfully"})
    );

    let requests = state.requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.method, Method::POST);
    assert_eq!(request.path, "/books");
    assert_eq!(request.body, "title=Dune&author=Herbert&bookshelf_id=3");
    assert_eq!(request.authorization.as_deref(), Some("Bearer test-token-123"));
    assert_eq!(
        request.content_type.as_deref(),
        Some("application/x-www-form-urlencoded")
    );
    assert!(request
        .user_agent
        .as_deref()
        .unwrap_or_default()
        .starts_with("Micro Books MCP Server/"));
}

#[tokio::test]
async fn test_form_values_are_url_encoded() {
    let (client, state) = mock_client().await;

    client
        .rename_bookshelf(BookshelfId::new(4).unwrap(), "Sci-Fi & Fantasy".to_string())
        .await
        .unwrap();

    let request = &state.requests()[0];
    assert_eq!(request.path, "/books/bookshelves/4");
    assert_eq!(request.body, "name=Sci-Fi+%26+Fantasy");
}

#[tokio::test]
async fn test_get_bookshelves_returns_body() {
    let (client, state) = mock_client().await;

    let shelves = client.get_bookshelves().await.unwrap();
    assert_eq!(shelves, json!([{"id": 1, "title": "Currently reading"}]));
    assert_eq!(state.requests()[0].method, Method::GET);
}

#[tokio::test]
async fn test_not_found_is_remote_status() {
    let (client, _state) = mock_client().await;

    let err = client
        .get_bookshelf_books(BookshelfId::new(999).unwrap())
        .await
        .unwrap_err();

    match &err {
        Error::RemoteStatus {
            status,
            status_text,
            body,
        } => {
            assert_eq!(*status, 404);
            assert_eq!(status_text, "Not Found");
            assert_eq!(body, "Bookshelf not found");
        }
        other => panic!("expected remote status, got {:?}", other),
    }
    assert_eq!(err.to_string(), "HTTP 404: Not Found - Bookshelf not found");
}

#[tokio::test]
async fn test_unregistered_status_has_readable_text() {
    let (client, _state) = mock_client().await;

    let err = client
        .get_goal_progress(GoalId::new(7).unwrap())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "HTTP 599: Unknown Status");
}

#[tokio::test]
async fn test_remove_book_uses_delete() {
    let (client, state) = mock_client().await;

    let result = client
        .remove_book(BookshelfId::new(2).unwrap(), BookId::new(17).unwrap())
        .await
        .unwrap();

    assert_eq!(result["message"], "Book removed from bookshelf successfully");
    let request = &state.requests()[0];
    assert_eq!(request.method, Method::DELETE);
    assert_eq!(request.path, "/books/bookshelves/2/remove/17");
}

#[tokio::test]
async fn test_move_book_posts_to_target_shelf() {
    let (client, state) = mock_client().await;

    client
        .move_book(BookId::new(17).unwrap(), BookshelfId::new(8).unwrap())
        .await
        .unwrap();

    let request = &state.requests()[0];
    assert_eq!(request.path, "/books/bookshelves/8/assign");
    assert_eq!(request.body, "book_id=17");
}

#[tokio::test]
async fn test_goal_update_forwards_zero_progress() {
    let (client, state) = mock_client().await;

    client
        .update_reading_goal(GoalUpdate {
            goal_id: GoalId::new(2).unwrap(),
            value: GoalTarget::new(30).unwrap(),
            progress: Some(GoalProgress::new(0).unwrap()),
        })
        .await
        .unwrap();

    let request = &state.requests()[0];
    assert_eq!(request.path, "/books/goals/2");
    assert_eq!(request.body, "value=30&progress=0");
}

#[tokio::test]
async fn test_empty_and_non_json_bodies() {
    let (client, _state) = mock_client().await;

    let empty = client.get_goal_progress(GoalId::new(5).unwrap()).await.unwrap();
    assert_eq!(empty, serde_json::Value::Null);

    let err = client
        .get_goal_progress(GoalId::new(6).unwrap())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), "serialization");
}

#[tokio::test]
async fn test_unreachable_host_is_network_error() {
    let client = client_for("http://127.0.0.1:1".to_string());

    let err = client.get_reading_goals().await.unwrap_err();
    assert_eq!(err.kind(), "network");
    assert!(
        err.to_string()
            .starts_with("Network error: Unable to connect to http://127.0.0.1:1/books/goals"),
        "{}",
        err
    );
    assert!(!err.to_string().contains(TOKEN));
}
