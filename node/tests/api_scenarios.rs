use answer_node::api::{AnswerResponse, ErrorResponse, EventRequest, HistoryResponse, MessageResponse};
use answer_node::engine::Engine;
use answer_node::server::{build_router, App};
use answer_persistence::SqliteStore;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use tempfile::{tempdir, TempDir};
use tower::ServiceExt; // for oneshot

fn setup() -> (TempDir, App) {
    let dir = tempdir().unwrap();
    let store = SqliteStore::open(dir.path().join("test.db")).unwrap();
    let app = build_router(Engine::new(store).into_shared());
    (dir, app)
}

async fn post_event(app: &App, body: &EventRequest) -> (StatusCode, Vec<u8>) {
    let req = Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json;charset=UTF-8")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();
    send(app, req).await
}

async fn get(app: &App, uri: &str) -> (StatusCode, Vec<u8>) {
    let req = Request::builder().method("GET").uri(uri).body(Body::empty()).unwrap();
    send(app, req).await
}

async fn send(app: &App, req: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024).await.unwrap();
    (status, bytes.to_vec())
}

async fn run_script(app: &App, script: &[(&str, &str, &str)]) -> Vec<StatusCode> {
    let mut codes = Vec::new();
    for &(kind, key, value) in script {
        let body = EventRequest::new(kind, &[("key", key), ("value", value)]);
        codes.push(post_event(app, &body).await.0);
    }
    codes
}

#[tokio::test]
async fn test_empty_table() {
    let (_dir, app) = setup();
    let (status, body) = get(&app, "/key1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let err: ErrorResponse = serde_json::from_slice(&body).unwrap();
    assert!(!err.exception.is_empty());
}

// create → delete → create → update
#[tokio::test]
async fn test_create_delete_create_update_success() {
    let (_dir, app) = setup();
    let codes = run_script(
        &app,
        &[
            ("create", "key1", "value1"),
            ("delete", "key1", "value1"),
            ("create", "key1", "value1"),
            ("update", "key1", "value2"),
        ],
    )
    .await;
    assert_eq!(codes, vec![StatusCode::OK; 4]);

    let (status, body) = get(&app, "/key1").await;
    assert_eq!(status, StatusCode::OK);
    let resp: AnswerResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(resp.message, "success");
    assert_eq!(resp.answer.key, "key1");
    assert_eq!(resp.answer.value, "value2");
    assert!(resp.answer.active);
}

// create → update → delete → create → update
#[tokio::test]
async fn test_create_update_delete_create_update_success() {
    let (_dir, app) = setup();
    let codes = run_script(
        &app,
        &[
            ("create", "key1", "value1"),
            ("update", "key1", "value2"),
            ("delete", "key1", "value1"),
            ("create", "key1", "value1"),
            ("update", "key1", "value2"),
        ],
    )
    .await;
    assert_eq!(codes, vec![StatusCode::OK; 5]);
}

// create → delete → update
#[tokio::test]
async fn test_create_delete_update_fail() {
    let (_dir, app) = setup();
    let codes = run_script(
        &app,
        &[
            ("create", "key1", "value1"),
            ("delete", "key1", "value1"),
            ("update", "key1", "value2"),
        ],
    )
    .await;
    assert_eq!(codes, vec![StatusCode::OK, StatusCode::OK, StatusCode::BAD_REQUEST]);
}

// create → create
#[tokio::test]
async fn test_create_create_fail() {
    let (_dir, app) = setup();
    let codes = run_script(&app, &[("create", "key1", "value1"), ("create", "key1", "value1")]).await;
    assert_eq!(codes, vec![StatusCode::OK, StatusCode::BAD_REQUEST]);

    let (_, body) = post_event(&app, &EventRequest::new("create", &[("key", "key1"), ("value", "value1")])).await;
    let err: ErrorResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(err.exception, "answer with key already exists");
}

#[tokio::test]
async fn test_history_lists_accepted_events_in_order() {
    let (_dir, app) = setup();
    run_script(
        &app,
        &[
            ("create", "key1", "value1"),
            ("create", "key1", "value1"), // rejected
            ("update", "key1", "value2"),
            ("delete", "key1", "value1"),
        ],
    )
    .await;

    let (status, body) = get(&app, "/history/key1").await;
    assert_eq!(status, StatusCode::OK);
    let resp: HistoryResponse = serde_json::from_slice(&body).unwrap();
    let kinds: Vec<_> = resp.events.iter().map(|e| e.kind.as_str()).collect();
    assert_eq!(kinds, vec!["create", "update", "delete"]);
    assert!(resp.events.iter().all(|e| e.key == "key1"));

    let (status, body) = get(&app, "/history/unknown").await;
    assert_eq!(status, StatusCode::OK);
    let resp: HistoryResponse = serde_json::from_slice(&body).unwrap();
    assert!(resp.events.is_empty());
}

#[tokio::test]
async fn test_trailing_slash_is_trimmed() {
    let (_dir, app) = setup();
    run_script(&app, &[("create", "key1", "value1")]).await;

    let (status, _) = get(&app, "/key1/").await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = get(&app, "/history/key1/").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_bad_requests() {
    let (_dir, app) = setup();

    // Unsupported type
    let (status, body) = post_event(&app, &EventRequest::new("rename", &[("key", "key1")])).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let err: ErrorResponse = serde_json::from_slice(&body).unwrap();
    assert!(err.exception.contains("rename"));

    // Missing key
    let (status, _) = post_event(&app, &EventRequest::new("create", &[("value", "v")])).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Malformed JSON
    let req = Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(serde_json::from_slice::<ErrorResponse>(&body).is_ok());

    // Non-string value
    let req = Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from(r#"{"type":"create","data":{"key":"key1","value":3}}"#))
        .unwrap();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Nothing above reached storage.
    let (_, body) = get(&app, "/history/key1").await;
    let resp: HistoryResponse = serde_json::from_slice(&body).unwrap();
    assert!(resp.events.is_empty());
}

#[tokio::test]
async fn test_success_envelope() {
    let (_dir, app) = setup();
    let (status, body) =
        post_event(&app, &EventRequest::new("create", &[("key", "key1"), ("value", "value1")])).await;
    assert_eq!(status, StatusCode::OK);
    let resp: MessageResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(resp.message, "success");
}

#[tokio::test]
async fn test_metrics_endpoint_responds() {
    let (_dir, app) = setup();
    let (status, _) = get(&app, "/metrics").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_delete_without_value_is_rejected() {
    let (_dir, app) = setup();
    let codes = run_script(&app, &[("create", "key1", "value1"), ("update", "key1", "value2")]).await;
    assert_eq!(codes, vec![StatusCode::OK, StatusCode::OK]);

    let (status, body) = post_event(&app, &EventRequest::new("delete", &[("key", "key1")])).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let err: ErrorResponse = serde_json::from_slice(&body).unwrap();
    assert!(err.exception.contains("value"));

    let (status, body) = get(&app, "/key1").await;
    assert_eq!(status, StatusCode::OK);
    let resp: AnswerResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(resp.answer.value, "value2");
}

#[tokio::test]
async fn test_key_named_history_is_readable() {
    let (_dir, app) = setup();
    let codes = run_script(&app, &[("create", "history", "value1")]).await;
    assert_eq!(codes, vec![StatusCode::OK]);

    let (status, body) = get(&app, "/history").await;
    assert_eq!(status, StatusCode::OK);
    let resp: AnswerResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(resp.answer.key, "history");
    assert_eq!(resp.answer.value, "value1");
}
