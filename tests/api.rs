//! API tests: the full router against the in-memory store.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;
use testes_api::{app, AppState, MemoryTesteStore};
use tower::ServiceExt;

const BODY_LIMIT: usize = 64 * 1024;

fn router() -> axum::Router {
    app(AppState::new(Arc::new(MemoryTesteStore::new())), BODY_LIMIT)
}

async fn send(router: &axum::Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    let body = match body {
        Some(v) => Body::from(serde_json::to_vec(&v).unwrap()),
        None => Body::empty(),
    };
    let response = router
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn details(body: &Value) -> Vec<String> {
    body["error"]["details"]
        .as_array()
        .map(|a| a.iter().filter_map(|v| v.as_str().map(String::from)).collect())
        .unwrap_or_default()
}

async fn create_test1(router: &axum::Router) -> Value {
    let (status, body) = send(
        router,
        Method::POST,
        "/testes",
        Some(json!({ "uniqueValue": "Test1", "testValue": "Teste 1", "otherValue": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body
}

#[tokio::test]
async fn create_returns_record_with_id() {
    let router = router();
    let body = create_test1(&router).await;
    assert_eq!(body["uniqueValue"], "Test1");
    assert_eq!(body["testValue"], "Teste 1");
    assert_eq!(body["otherValue"], 1);
    assert!(body["id"].as_str().is_some_and(|s| !s.is_empty()));
}

#[tokio::test]
async fn duplicate_create_is_conflict() {
    let router = router();
    create_test1(&router).await;
    let (status, body) = send(
        &router,
        Method::POST,
        "/testes",
        Some(json!({ "uniqueValue": "Test1", "testValue": "other", "otherValue": 2 })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "conflict");
}

#[tokio::test]
async fn invalid_create_lists_every_violation() {
    let router = router();
    let (status, body) = send(
        &router,
        Method::POST,
        "/testes",
        Some(json!({ "uniqueValue": "Test1", "testValue": "   ", "otherValue": "3" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "validation_error");
    assert_eq!(
        details(&body),
        vec![
            "testValue should not be empty or contain only spaces",
            "otherValue must be a number"
        ]
    );

    let (_, list) = send(&router, Method::GET, "/testes", None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let router = router();
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/testes")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn missing_content_type_is_unsupported_media_type() {
    let router = router();
    let body = json!({ "uniqueValue": "Test1", "testValue": "Teste 1", "otherValue": 1 });
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/testes")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"]["code"], "unsupported_media_type");
}

#[tokio::test]
async fn oversized_body_is_payload_too_large() {
    let router = router();
    let padding = "x".repeat(BODY_LIMIT + 1);
    let body = json!({ "uniqueValue": "Test1", "testValue": padding, "otherValue": 1 });
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/testes")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);

    let (_, list) = send(&router, Method::GET, "/testes", None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn list_returns_records_in_insertion_order() {
    let router = router();
    let (_, empty) = send(&router, Method::GET, "/testes", None).await;
    assert_eq!(empty, json!([]));

    create_test1(&router).await;
    send(
        &router,
        Method::POST,
        "/testes",
        Some(json!({ "uniqueValue": "Test2", "testValue": "Teste 2", "otherValue": 2.5 })),
    )
    .await;

    let (status, list) = send(&router, Method::GET, "/testes", None).await;
    assert_eq!(status, StatusCode::OK);
    let keys: Vec<&str> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["uniqueValue"].as_str().unwrap())
        .collect();
    assert_eq!(keys, vec!["Test1", "Test2"]);
    assert_eq!(list[1]["otherValue"], 2.5);
}

#[tokio::test]
async fn get_by_key() {
    let router = router();
    let created = create_test1(&router).await;
    let (status, body) = send(&router, Method::GET, "/testes/Test1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, created);
}

#[tokio::test]
async fn missing_key_is_not_found_for_get_update_delete() {
    let router = router();
    for (method, body) in [
        (Method::GET, None),
        (Method::PATCH, Some(json!({ "testValue": "X" }))),
        (Method::DELETE, None),
    ] {
        let (status, resp) = send(&router, method, "/testes/missingKey", body).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(resp["error"]["code"], "not_found");
        assert!(resp["error"]["message"].as_str().unwrap().contains("missingKey"));
    }
}

#[tokio::test]
async fn partial_update_changes_only_given_fields() {
    let router = router();
    let created = create_test1(&router).await;
    let (status, body) = send(
        &router,
        Method::PATCH,
        "/testes/Test1",
        Some(json!({ "testValue": "X" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["testValue"], "X");
    assert_eq!(body["otherValue"], created["otherValue"]);
    assert_eq!(body["uniqueValue"], "Test1");
    assert_eq!(body["id"], created["id"]);
}

#[tokio::test]
async fn blank_update_is_rejected_and_record_unchanged() {
    let router = router();
    let created = create_test1(&router).await;
    let (status, body) = send(
        &router,
        Method::PATCH,
        "/testes/Test1",
        Some(json!({ "testValue": "  ", "otherValue": 9 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        details(&body),
        vec!["testValue should not be empty or contain only spaces"]
    );

    let (_, current) = send(&router, Method::GET, "/testes/Test1", None).await;
    assert_eq!(current, created);
}

#[tokio::test]
async fn update_cannot_change_unique_value() {
    let router = router();
    create_test1(&router).await;
    let (status, body) = send(
        &router,
        Method::PATCH,
        "/testes/Test1",
        Some(json!({ "uniqueValue": "Renamed" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(details(&body), vec!["property uniqueValue should not exist"]);

    let (status, _) = send(&router, Method::GET, "/testes/Renamed", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_returns_record_then_it_is_gone() {
    let router = router();
    let created = create_test1(&router).await;
    let (status, body) = send(&router, Method::DELETE, "/testes/Test1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, created);

    let (status, _) = send(&router, Method::GET, "/testes/Test1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn common_routes_respond() {
    let router = router();
    let (status, body) = send(&router, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, body) = send(&router, Method::GET, "/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["store"], "ok");

    let (status, body) = send(&router, Method::GET, "/version", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "testes-api");

    let (status, body) = send(&router, Method::GET, "/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/testes/{uniqueValue}"].is_object());
}
