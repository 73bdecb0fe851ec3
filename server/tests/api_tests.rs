use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use todo_board_lib::build_app;
use todo_board_lib::repository::{StoreHandle, StoreTarget};

fn memory_app() -> Router {
    build_app(StoreHandle::new(Some(StoreTarget::Memory)), None)
}

fn unconfigured_app() -> Router {
    build_app(StoreHandle::unconfigured(), None)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn create(app: &Router, title: &str, priority: i64) -> Value {
    let (status, body) = send(
        app,
        Method::POST,
        "/todos",
        Some(json!({ "title": title, "priority": priority })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body
}

fn titles(list: &Value) -> Vec<&str> {
    list.as_array()
        .unwrap()
        .iter()
        .map(|t| t["title"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn test_create_returns_defaults() {
    let app = memory_app();

    let (status, todo) = send(&app, Method::POST, "/todos", Some(json!({ "title": "  Buy milk  " }))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(todo["title"], "Buy milk");
    assert_eq!(todo["priority"], 3);
    assert_eq!(todo["completed"], false);
    assert_eq!(todo["notes"], "");
    assert_eq!(todo["media"], json!([]));
    assert_eq!(todo["order"], 0);
    assert!(todo["id"].is_string());
    assert!(todo["createdAt"].is_string());
    assert_eq!(todo["createdAt"], todo["updatedAt"]);

    let second = create(&app, "Walk dog", 3).await;
    assert_eq!(second["order"], 1);
}

#[tokio::test]
async fn test_create_rejects_invalid_input() {
    let app = memory_app();

    let (status, body) = send(&app, Method::POST, "/todos", Some(json!({ "title": "   " }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Title is required");

    let (status, _) = send(&app, Method::POST, "/todos", Some(json!({ "priority": 2 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let long = "x".repeat(61);
    let (status, _) = send(&app, Method::POST, "/todos", Some(json!({ "title": long }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, Method::POST, "/todos", Some(json!({ "title": "a", "priority": 6 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, list) = send(&app, Method::GET, "/todos", None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = memory_app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/todos")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_list_sorted_by_priority_then_order() {
    let app = memory_app();
    create(&app, "low", 1).await;
    create(&app, "high", 5).await;
    create(&app, "mid-a", 3).await;
    create(&app, "mid-b", 3).await;

    let (status, list) = send(&app, Method::GET, "/todos", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(titles(&list), vec!["high", "mid-a", "mid-b", "low"]);
}

#[tokio::test]
async fn test_update_applies_patch_and_ignores_order() {
    let app = memory_app();
    let todo = create(&app, "draft", 3).await;
    let uri = format!("/todos/{}", todo["id"].as_str().unwrap());

    let (status, updated) = send(
        &app,
        Method::PUT,
        &uri,
        Some(json!({
            "title": "final",
            "completed": true,
            "notes": "see thread",
            "media": ["https://example.com/a.png"],
            "order": 99
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "final");
    assert_eq!(updated["completed"], true);
    assert_eq!(updated["notes"], "see thread");
    assert_eq!(updated["media"], json!(["https://example.com/a.png"]));
    assert_eq!(updated["order"], todo["order"]);
    assert_eq!(updated["createdAt"], todo["createdAt"]);

    let (status, same) = send(&app, Method::PUT, &uri, Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(same["title"], "final");
}

#[tokio::test]
async fn test_update_errors() {
    let app = memory_app();
    let todo = create(&app, "keep", 3).await;
    let uri = format!("/todos/{}", todo["id"].as_str().unwrap());

    let (status, body) = send(
        &app,
        Method::PUT,
        "/todos/00000000-0000-4000-8000-000000000000",
        Some(json!({ "title": "x" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Todo not found");

    let (status, _) = send(&app, Method::PUT, "/todos/not-an-id", Some(json!({ "title": "x" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::PUT, &uri, Some(json!({ "priority": 0 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, list) = send(&app, Method::GET, "/todos", None).await;
    assert_eq!(list[0]["priority"], 3);
}

#[tokio::test]
async fn test_delete_twice() {
    let app = memory_app();
    let todo = create(&app, "gone", 3).await;
    let uri = format!("/todos/{}", todo["id"].as_str().unwrap());

    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Todo deleted successfully");

    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_reorder_assigns_positions() {
    let app = memory_app();
    let a = create(&app, "a", 3).await;
    let b = create(&app, "b", 3).await;
    let c = create(&app, "c", 3).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/todos/reorder",
        Some(json!({ "todos": [c, a, b] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Todos reordered successfully");
    assert_eq!(body["updated"], 3);
    assert!(body.get("failed").is_none());

    let (_, list) = send(&app, Method::GET, "/todos", None).await;
    assert_eq!(titles(&list), vec!["c", "a", "b"]);
}

#[tokio::test]
async fn test_reorder_requires_array() {
    let app = memory_app();

    for body in [json!({}), json!({ "todos": "a,b" }), json!([1, 2])] {
        let (status, resp) = send(&app, Method::POST, "/todos/reorder", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(resp["error"], "Todos array is required");
    }
}

#[tokio::test]
async fn test_reorder_partial_failure() {
    let app = memory_app();
    let a = create(&app, "a", 3).await;
    let b = create(&app, "b", 3).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/todos/reorder",
        Some(json!({ "todos": [
            b,
            { "id": "00000000-0000-4000-8000-000000000000" },
            a,
            { "title": "no id" }
        ] })),
    )
    .await;
    assert_eq!(status, StatusCode::MULTI_STATUS);
    assert_eq!(body["updated"], 2);

    let failed = body["failed"].as_array().unwrap();
    assert_eq!(failed.len(), 2);
    assert_eq!(failed[0]["index"], 1);
    assert_eq!(failed[1]["index"], 3);

    let (_, list) = send(&app, Method::GET, "/todos", None).await;
    assert_eq!(titles(&list), vec!["b", "a"]);
}

#[tokio::test]
async fn test_unconfigured_store_is_unavailable() {
    let app = unconfigured_app();
    let id = "00000000-0000-4000-8000-000000000000";

    let requests = [
        (Method::GET, "/todos".to_string(), None),
        (Method::POST, "/todos".to_string(), Some(json!({ "title": "a" }))),
        (Method::PUT, format!("/todos/{}", id), Some(json!({ "title": "a" }))),
        (Method::DELETE, format!("/todos/{}", id), None),
        (Method::POST, "/todos/reorder".to_string(), Some(json!({ "todos": [] }))),
    ];

    for (method, uri, body) in requests {
        let (status, resp) = send(&app, method, &uri, body).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE, "{}", uri);
        assert_eq!(resp["error"], "Database connection not available");
    }
}

#[tokio::test]
async fn test_validation_precedes_store_check() {
    let app = unconfigured_app();

    let (status, _) = send(&app, Method::POST, "/todos", Some(json!({ "title": "" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unconfigured_store_answers_before_id_or_patch_checks() {
    let app = unconfigured_app();
    let valid_id = uuid::Uuid::new_v4().to_string();

    let cases = [
        (Method::PUT, "/todos/not-an-id".to_string(), Some(json!({ "completed": true }))),
        (Method::DELETE, "/todos/not-an-id".to_string(), None),
        (Method::PUT, format!("/todos/{}", valid_id), Some(json!({ "priority": 0 }))),
    ];
    for (method, uri, body) in cases {
        let (status, body) = send(&app, method, &uri, body).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE, "{}", uri);
        assert_eq!(body["error"], "Database connection not available");
    }
}

#[tokio::test]
async fn test_reorder_repeated_id_counts_once() {
    let app = memory_app();
    let a = create(&app, "a", 3).await;
    let id = a["id"].as_str().unwrap();

    let body = json!({ "todos": [{ "id": id }, { "id": id }] });
    let (status, body) = send(&app, Method::POST, "/todos/reorder", Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["updated"], 1);
}
