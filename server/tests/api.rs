use std::sync::Arc;

use axum::http::{self, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use todo_core::{MemoryStore, Todo, TodoManager};
use todo_server::error::ErrorBody;
use todo_server::{app, AppState};
use tower::ServiceExt;

fn test_app() -> Router {
    app(AppState::new(TodoManager::new(Arc::new(MemoryStore::new()))))
}

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes: bytes::Bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn get_request(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

async fn send(app: &Router, request: Request<String>) -> axum::response::Response {
    app.clone().oneshot(request).await.unwrap()
}

async fn create(app: &Router, body: &str) -> Todo {
    let resp = send(app, json_request("POST", "/todos", body)).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    body_json(resp).await
}

// --- pages ---

#[tokio::test]
async fn index_page() {
    let resp = send(&test_app(), get_request("/")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_text(resp).await, "Hello guys, welcome to Opolo Hub!");
}

#[tokio::test]
async fn about_page_accepts_query() {
    let resp = send(&test_app(), get_request("/about?from=home&x=1")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_text(resp).await, "This is the about page");
}

#[tokio::test]
async fn students_page_is_404() {
    let resp = send(&test_app(), get_request("/students")).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_text(resp).await, "Page Not Found");
}

// --- list ---

#[tokio::test]
async fn list_todos_empty() {
    let resp = send(&test_app(), get_request("/todos")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let todos: Vec<Todo> = body_json(resp).await;
    assert!(todos.is_empty());
}

// --- create ---

#[tokio::test]
async fn create_todo_returns_201_with_all_fields() {
    let app = test_app();
    let todo = create(
        &app,
        r#"{"title":"Plan the trip","content":"book hotel","tags":["travel","q3"],"author":"bob"}"#,
    )
    .await;

    assert_eq!(todo.title, "Plan the trip");
    assert_eq!(todo.content, "book hotel");
    assert_eq!(todo.tags, vec!["travel", "q3"]);
    assert_eq!(todo.author, "bob");
}

#[tokio::test]
async fn create_todo_missing_author_returns_400() {
    let app = test_app();
    let resp = send(&app, json_request("POST", "/todos", r#"{"title":"Buy milk"}"#)).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: ErrorBody = body_json(resp).await;
    assert_eq!(body, ErrorBody::new("Title and author are required"));

    let todos: Vec<Todo> = body_json(send(&app, get_request("/todos")).await).await;
    assert!(todos.is_empty());
}

#[tokio::test]
async fn create_todo_short_title_returns_400() {
    let resp = send(
        &test_app(),
        json_request("POST", "/todos", r#"{"title":"Hi","author":"alice"}"#),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: ErrorBody = body_json(resp).await;
    assert_eq!(body, ErrorBody::new("Title must be between 5 and 40 characters"));
}

#[tokio::test]
async fn create_todo_wrong_field_type_is_rejected() {
    let resp = send(
        &test_app(),
        json_request("POST", "/todos", r#"{"title":12345,"author":"alice"}"#),
    )
    .await;

    assert!(resp.status().is_client_error());
    let body: ErrorBody = body_json(resp).await;
    assert!(!body.message.is_empty());
}

#[tokio::test]
async fn create_todo_without_body_returns_400_required_fields() {
    let app = test_app();
    let request = Request::builder()
        .method("POST")
        .uri("/todos")
        .body(String::new())
        .unwrap();
    let resp = send(&app, request).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: ErrorBody = body_json(resp).await;
    assert_eq!(body, ErrorBody::new("Title and author are required"));
}

#[tokio::test]
async fn create_todo_malformed_json_returns_json_error() {
    let resp = send(
        &test_app(),
        json_request("POST", "/todos", r#"{"title":"Buy milk","#),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: ErrorBody = body_json(resp).await;
    assert!(!body.message.is_empty());
}

// --- get ---

#[tokio::test]
async fn get_todo_round_trips_created_record() {
    let app = test_app();
    let created = create(&app, r#"{"title":"Walk dog","author":"alice"}"#).await;

    let resp = send(&app, get_request(&format!("/todos/{}", created.id))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: Todo = body_json(resp).await;
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn get_todo_not_found() {
    let resp = send(
        &test_app(),
        get_request("/todos/00000000-0000-0000-0000-000000000000"),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- update ---

#[tokio::test]
async fn update_todo_not_found() {
    let resp = send(
        &test_app(),
        json_request(
            "PUT",
            "/todos/00000000-0000-0000-0000-000000000000",
            r#"{"title":"Nope nope"}"#,
        ),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: ErrorBody = body_json(resp).await;
    assert_eq!(body, ErrorBody::new("Todo not found"));
}

#[tokio::test]
async fn update_todo_malformed_id_is_not_found() {
    let resp = send(
        &test_app(),
        json_request("PUT", "/todos/not-a-uuid", r#"{"title":"Nope nope"}"#),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: ErrorBody = body_json(resp).await;
    assert_eq!(body.message, "Todo not found");
}

#[tokio::test]
async fn update_todo_ignores_author_and_tags() {
    let app = test_app();
    let created = create(
        &app,
        r#"{"title":"Walk dog","tags":["pets"],"author":"alice"}"#,
    )
    .await;

    let resp = send(
        &app,
        json_request(
            "PUT",
            &format!("/todos/{}", created.id),
            r#"{"author":"mallory","tags":[],"content":"around the block"}"#,
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Todo = body_json(resp).await;
    assert_eq!(updated.author, "alice");
    assert_eq!(updated.tags, vec!["pets"]);
    assert_eq!(updated.content, "around the block");
}

#[tokio::test]
async fn update_todo_empty_body_returns_unchanged_record() {
    let app = test_app();
    let created = create(&app, r#"{"title":"Walk dog","content":"park","author":"alice"}"#).await;

    let resp = send(&app, json_request("PUT", &format!("/todos/{}", created.id), "{}")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Todo = body_json(resp).await;
    assert_eq!(updated, created);
}

#[tokio::test]
async fn update_todo_without_body_returns_unchanged_record() {
    let app = test_app();
    let created = create(&app, r#"{"title":"Walk dog","content":"park","author":"alice"}"#).await;

    let request = Request::builder()
        .method("PUT")
        .uri(format!("/todos/{}", created.id))
        .body(String::new())
        .unwrap();
    let resp = send(&app, request).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Todo = body_json(resp).await;
    assert_eq!(updated, created);
}

// --- full lifecycle ---

#[tokio::test]
async fn create_list_update_lifecycle() {
    let app = test_app();

    // create
    let created = create(&app, r#"{"title":"Buy milk","author":"alice"}"#).await;
    assert_eq!(created.title, "Buy milk");
    assert_eq!(created.author, "alice");
    assert_eq!(created.content, "");
    assert!(created.tags.is_empty());
    let id = created.id;

    // list — exactly the one todo
    let resp = send(&app, get_request("/todos")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let todos: Vec<Todo> = body_json(resp).await;
    assert_eq!(todos, vec![created.clone()]);

    // update — partial: only content
    let resp = send(
        &app,
        json_request("PUT", &format!("/todos/{id}"), r#"{"content":"2 liters"}"#),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Todo = body_json(resp).await;
    assert_eq!(updated.title, "Buy milk"); // unchanged
    assert_eq!(updated.content, "2 liters");

    // update — a short title is accepted, length is only checked on create
    let resp = send(
        &app,
        json_request("PUT", &format!("/todos/{id}"), r#"{"title":"Hi"}"#),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Todo = body_json(resp).await;
    assert_eq!(updated.title, "Hi");
    assert_eq!(updated.content, "2 liters"); // unchanged from previous update
    assert_eq!(updated.id, id);

    // list reflects the stored state
    let todos: Vec<Todo> = body_json(send(&app, get_request("/todos")).await).await;
    assert_eq!(todos, vec![updated]);
}
