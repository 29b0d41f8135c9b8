//! HTTP Route Tests
//!
//! Drives the full router (CORS, request logging, `/api/v1` nesting)
//! in-process with `tower::ServiceExt::oneshot`.

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use junkboard::http_server::{HttpServer, ServerConfig};

// =============================================================================
// Helpers
// =============================================================================

fn app() -> Router {
    HttpServer::with_config(ServerConfig::default()).router()
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

struct Board {
    id: String,
    edit: String,
    public: String,
}

async fn create_board(app: &Router) -> Board {
    let (status, body) = send(app, Method::POST, "/api/v1/boards", Some(json!({"title": "Trip"}))).await;
    assert_eq!(status, StatusCode::CREATED);
    let board = &body["data"]["board"];
    Board {
        id: board["id"].as_str().unwrap().to_string(),
        edit: board["edit_token"].as_str().unwrap().to_string(),
        public: board["public_token"].as_str().unwrap().to_string(),
    }
}

async fn create_page(app: &Router, board: &Board, title: &str) -> String {
    let uri = format!("/api/v1/boards/{}/pages?edit_token={}", board.id, board.edit);
    let body = json!({"title": title, "date": "2024-01-15T12:00:00Z"});
    let (status, body) = send(app, Method::POST, &uri, Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    body["data"]["id"].as_str().unwrap().to_string()
}

async fn create_element(app: &Router, board: &Board, page_id: &str) -> String {
    let uri = format!(
        "/api/v1/boards/{}/pages/{}/elements?edit_token={}",
        board.id, page_id, board.edit
    );
    let body = json!({
        "kind": "text",
        "x": 0.0, "y": 0.0, "w": 120.0, "h": 40.0,
        "payload": {"text": "hello"}
    });
    let (status, body) = send(app, Method::POST, &uri, Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    body["data"]["id"].as_str().unwrap().to_string()
}

// =============================================================================
// Boards
// =============================================================================

#[tokio::test]
async fn test_create_board_returns_links() {
    let app = app();
    let (status, body) = send(&app, Method::POST, "/api/v1/boards", Some(json!({"title": "Trip"}))).await;

    assert_eq!(status, StatusCode::CREATED);
    let data = &body["data"];
    assert!(data["edit_url"].as_str().unwrap().contains("edit_token="));
    assert!(data["public_url"].as_str().unwrap().contains("public_token="));
    assert_eq!(data["board"]["skin"], "default");
    assert_eq!(data["board"]["pageCount"], 0);
}

#[tokio::test]
async fn test_create_board_rejects_bad_input() {
    let app = app();

    let (status, body) = send(&app, Method::POST, "/api/v1/boards", Some(json!({"title": ""}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], 422);

    let (status, _) = send(&app, Method::POST, "/api/v1/boards", Some(json!({"name": 3}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_token_lookup() {
    let app = app();
    let board = create_board(&app).await;

    let (status, body) = send(&app, Method::GET, &format!("/api/v1/boards/edit/{}", board.edit), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], board.id.as_str());
    assert_eq!(body["data"]["edit_token"], board.edit.as_str());

    let (status, body) = send(&app, Method::GET, &format!("/api/v1/boards/public/{}", board.public), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"].get("edit_token").is_none());

    let (status, _) = send(&app, Method::GET, &format!("/api/v1/boards/edit/{}", board.public), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_board_access_codes() {
    let app = app();
    let board = create_board(&app).await;
    let uri = format!("/api/v1/boards/{}", board.id);

    let (status, _) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, Method::GET, &format!("{}?public_token={}", uri, board.public), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, Method::DELETE, &format!("{}?public_token={}", uri, board.public), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 401);

    let missing = format!("/api/v1/boards/{}?edit_token={}", Uuid::new_v4(), board.edit);
    let (status, _) = send(&app, Method::GET, &missing, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::GET, "/api/v1/boards/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_board_update_and_delete() {
    let app = app();
    let board = create_board(&app).await;
    let uri = format!("/api/v1/boards/{}?edit_token={}", board.id, board.edit);

    let (status, body) = send(&app, Method::PUT, &uri, Some(json!({"skin": "wood"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["skin"], "wood");
    assert_eq!(body["data"]["title"], "Trip");

    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, _) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Pages and Elements
// =============================================================================

#[tokio::test]
async fn test_page_list_is_public() {
    let app = app();
    let board = create_board(&app).await;
    let first = create_page(&app, &board, "Day 1").await;
    create_page(&app, &board, "Day 2").await;

    let (status, body) = send(&app, Method::GET, &format!("/api/v1/boards/{}/pages", board.id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total"], 2);
    assert_eq!(body["data"]["pages"][0]["id"], first.as_str());
    assert_eq!(body["data"]["pages"][0]["order_idx"], 0);
}

#[tokio::test]
async fn test_page_move_via_update() {
    let app = app();
    let board = create_board(&app).await;
    let first = create_page(&app, &board, "Day 1").await;
    let second = create_page(&app, &board, "Day 2").await;

    let uri = format!("/api/v1/boards/{}/pages/{}?edit_token={}", board.id, first, board.edit);
    let body = json!({"title": "Day 1", "date": "2024-01-15T12:00:00Z", "order_idx": 10});
    let (status, body) = send(&app, Method::PUT, &uri, Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["order_idx"], 1);

    let (_, body) = send(&app, Method::GET, &format!("/api/v1/boards/{}/pages", board.id), None).await;
    assert_eq!(body["data"]["pages"][0]["id"], second.as_str());
}

#[tokio::test]
async fn test_create_page_without_token_is_unauthorized() {
    let app = app();
    let board = create_board(&app).await;

    let body = json!({"title": "Day 1", "date": "2024-01-15T12:00:00Z"});
    let uri = format!("/api/v1/boards/{}/pages", board.id);
    let (status, body) = send(&app, Method::POST, &uri, Some(body)).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"].is_string());
}

/// A refused caller gets 401 even when the request itself is malformed.
#[tokio::test]
async fn test_anonymous_malformed_mutations_are_unauthorized() {
    let app = app();
    let board = create_board(&app).await;
    let page = create_page(&app, &board, "Day 1").await;

    let pages = format!("/api/v1/boards/{}/pages", board.id);
    let (status, _) = send(&app, Method::POST, &pages, Some(json!({"title": "   "}))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, _) = send(&app, Method::POST, &pages, Some(json!("not an object"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let absent = format!("/api/v1/boards/{}/pages", Uuid::new_v4());
    let (status, _) = send(&app, Method::POST, &absent, Some(json!({"title": ""}))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let reorder = format!("/api/v1/boards/{}/pages/{}/elements/reorder", board.id, page);
    let (status, _) = send(&app, Method::PUT, &reorder, Some(json!({"elements": []}))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, _) = send(&app, Method::PUT, &reorder, Some(json!({"elements": "x"}))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let bad_page = format!("/api/v1/boards/{}/pages/not-a-uuid", board.id);
    let (status, _) = send(&app, Method::DELETE, &bad_page, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let patch = format!("/api/v1/boards/{}?public_token={}", board.id, board.public);
    let (status, _) = send(&app, Method::PUT, &patch, Some(json!({"skin": "marble"}))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // With the edit token the same input is reported as invalid
    let with_token = format!("{}?edit_token={}", bad_page, board.edit);
    let (status, _) = send(&app, Method::DELETE, &with_token, None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_unknown_element_kind_is_rejected() {
    let app = app();
    let board = create_board(&app).await;
    let page = create_page(&app, &board, "Day 1").await;

    let uri = format!(
        "/api/v1/boards/{}/pages/{}/elements?edit_token={}",
        board.id, page, board.edit
    );
    let body = json!({"kind": "video", "x": 0, "y": 0, "w": 1, "h": 1, "payload": {}});
    let (status, _) = send(&app, Method::POST, &uri, Some(body)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_reorder_elements() {
    let app = app();
    let board = create_board(&app).await;
    let page = create_page(&app, &board, "Day 1").await;
    let a = create_element(&app, &board, &page).await;
    let b = create_element(&app, &board, &page).await;

    let uri = format!(
        "/api/v1/boards/{}/pages/{}/elements/reorder?edit_token={}",
        board.id, page, board.edit
    );
    let body = json!({"elements": [{"id": a, "z": 1}, {"id": b, "z": 0}]});
    let (status, _) = send(&app, Method::PUT, &uri, Some(body)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let list = format!("/api/v1/boards/{}/pages/{}/elements", board.id, page);
    let (_, body) = send(&app, Method::GET, &list, None).await;
    assert_eq!(body["data"]["elements"][0]["id"], b.as_str());
    assert_eq!(body["data"]["elements"][1]["z"], 1);
}

#[tokio::test]
async fn test_reorder_with_foreign_element_conflicts() {
    let app = app();
    let board = create_board(&app).await;
    let page = create_page(&app, &board, "Day 1").await;
    let other = create_page(&app, &board, "Day 2").await;
    let a = create_element(&app, &board, &page).await;
    let stranger = create_element(&app, &board, &other).await;

    let uri = format!(
        "/api/v1/boards/{}/pages/{}/elements/reorder?edit_token={}",
        board.id, page, board.edit
    );
    let body = json!({"elements": [{"id": a, "z": 1}, {"id": stranger, "z": 0}]});
    let (status, body) = send(&app, Method::PUT, &uri, Some(body)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 409);

    let list = format!("/api/v1/boards/{}/pages/{}/elements", board.id, page);
    let (_, body) = send(&app, Method::GET, &list, None).await;
    assert_eq!(body["data"]["elements"][0]["z"], 0);
}

#[tokio::test]
async fn test_reorder_must_be_a_permutation() {
    let app = app();
    let board = create_board(&app).await;
    let page = create_page(&app, &board, "Day 1").await;
    let a = create_element(&app, &board, &page).await;
    let b = create_element(&app, &board, &page).await;

    let uri = format!(
        "/api/v1/boards/{}/pages/{}/elements/reorder?edit_token={}",
        board.id, page, board.edit
    );
    let body = json!({"elements": [{"id": a, "z": 0}, {"id": b, "z": 0}]});
    let (status, body) = send(&app, Method::PUT, &uri, Some(body)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], 422);

    let list = format!("/api/v1/boards/{}/pages/{}/elements", board.id, page);
    let (_, body) = send(&app, Method::GET, &list, None).await;
    assert_eq!(body["data"]["elements"][0]["id"], a.as_str());
    assert_eq!(body["data"]["elements"][1]["z"], 1);
}

// =============================================================================
// Recap, Health, Middleware
// =============================================================================

#[tokio::test]
async fn test_recap_route() {
    let app = app();
    let board = create_board(&app).await;
    create_page(&app, &board, "Day 1").await;

    let uri = format!("/api/v1/boards/{}/recap?filter=week&date=2024-01-17", board.id);
    let (status, body) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["filter"], "week");
    assert_eq!(body["data"]["page_count"], 1);

    let bad = format!("/api/v1/boards/{}/recap?filter=year", board.id);
    let (status, _) = send(&app, Method::GET, &bad, None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let bad = format!("/api/v1/boards/{}/recap?date=17-01-2024", board.id);
    let (status, _) = send(&app, Method::GET, &bad, None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let refused = format!(
        "/api/v1/boards/{}/recap?filter=year&public_token={}",
        board.id,
        Uuid::new_v4()
    );
    let (status, _) = send(&app, Method::GET, &refused, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_health() {
    let app = app();
    create_board(&app).await;

    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["boards"], 1);
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let app = app();

    let request = Request::builder()
        .uri("/health")
        .header("x-request-id", "req-42")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.headers()["x-request-id"], "req-42");

    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();
    let assigned = response.headers()["x-request-id"].to_str().unwrap();
    assert!(Uuid::parse_str(assigned).is_ok());
}
