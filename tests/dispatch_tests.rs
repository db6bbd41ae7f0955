// SPDX-License-Identifier: PMPL-1.0-or-later
//! Dispatch and upload tests against a local mock server.

use std::net::SocketAddr;

use axum::extract::Multipart;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};

use omnibase_client::{Client, Payload, PresignedPost, Value};

const TEST_KEY: &str = "test-key";

async fn dispatch_handler(
    headers: HeaderMap,
    Json(payload): Json<serde_json::Value>,
) -> (StatusCode, Json<serde_json::Value>) {
    if headers
        .get("X-OMNIBASE-ACCESS-KEY")
        .and_then(|v| v.to_str().ok())
        != Some(TEST_KEY)
    {
        return (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({"error": "invalid access key"})),
        );
    }
    match payload.get("action").and_then(|a| a.as_str()) {
        Some("doc.fetch") => (
            StatusCode::OK,
            Json(serde_json::json!({"data": {"id": 1}, "meta": {}})),
        ),
        Some("doc.dated") => (
            StatusCode::OK,
            Json(serde_json::json!({
                "data": {"created_at": "2022-08-13T22:45:03Z"},
                "meta": {}
            })),
        ),
        _ => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({"error": "not found"})),
        ),
    }
}

async fn upload_handler(mut multipart: Multipart) -> StatusCode {
    let mut saw_file = false;
    let mut saw_policy = false;
    while let Some(field) = multipart.next_field().await.unwrap() {
        match field.name() {
            Some("file") => saw_file = true,
            Some("policy") => saw_policy = true,
            _ => {}
        }
        let _ = field.bytes().await.unwrap();
    }
    if saw_file && saw_policy {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::BAD_REQUEST
    }
}

fn app() -> Router {
    Router::new()
        .route("/v1", post(dispatch_handler))
        .route("/upload", post(upload_handler))
}

async fn spawn_server() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app()).await.unwrap();
    });
    addr
}

fn client_for(addr: SocketAddr) -> Client {
    Client::new(&format!("http://{addr}/v1"), TEST_KEY).unwrap()
}

#[tokio::test]
async fn test_dispatch_success() {
    let addr = spawn_server().await;
    let client = client_for(addr);

    let res = client
        .dispatch(&Payload::new("doc.fetch").field("collection", "articles").into())
        .await;

    assert!(res.ok);
    assert_eq!(res.status_code, 200);
    assert_eq!(res.error, None);
    assert_eq!(res.data, Value::from(serde_json::json!({"id": 1})));
    assert_eq!(res.meta, Value::empty_object());
}

#[tokio::test]
async fn test_dispatch_failure_carries_error_and_status() {
    let addr = spawn_server().await;
    let client = client_for(addr);

    let res = client.dispatch(&Payload::new("doc.unknown").into()).await;

    assert!(!res.ok);
    assert_eq!(res.status_code, 404);
    assert_eq!(res.error.as_deref(), Some("not found"));
}

#[tokio::test]
async fn test_dispatch_promotes_timestamps_in_data() {
    let addr = spawn_server().await;
    let client = client_for(addr);

    let res = client.dispatch(&Payload::new("doc.dated").into()).await;

    assert!(res.ok);
    assert!(matches!(
        res.data.get("created_at"),
        Some(Value::DateTime(_))
    ));
}

#[tokio::test]
async fn test_missing_action_fails_before_any_network_call() {
    // Nothing listens here; a fast-failing payload check must not even try.
    let client = Client::new("http://127.0.0.1:9/unreachable", TEST_KEY).unwrap();

    let res = client
        .dispatch(&Value::from(serde_json::json!({"collection": "articles"})))
        .await;

    assert!(!res.ok);
    assert_eq!(res.status_code, 500);
    let error = res.error.unwrap();
    assert!(error.starts_with("EXCEPTION:"), "got {error:?}");
    assert!(error.contains("missing `action`"), "got {error:?}");
}

#[tokio::test]
async fn test_wrong_access_key_is_unauthorized() {
    let addr = spawn_server().await;
    let client = Client::new(&format!("http://{addr}/v1"), "wrong").unwrap();

    let res = client.dispatch(&Payload::new("doc.fetch").into()).await;

    assert!(!res.ok);
    assert_eq!(res.status_code, 401);
    assert_eq!(res.error.as_deref(), Some("invalid access key"));
}

#[tokio::test]
async fn test_transport_failure_becomes_exception_result() {
    let client = Client::new("http://127.0.0.1:9/unreachable", TEST_KEY).unwrap();

    let res = client.dispatch(&Payload::new("doc.fetch").into()).await;

    assert!(!res.ok);
    assert_eq!(res.status_code, 500);
    assert!(res.error.unwrap().starts_with("EXCEPTION:"));
}

#[tokio::test]
async fn test_presigned_upload() {
    let addr = spawn_server().await;
    let client = client_for(addr);

    let mut post = PresignedPost {
        url: format!("http://{addr}/upload"),
        fields: [("policy".to_owned(), "signed-policy".to_owned())]
            .into_iter()
            .collect(),
    };

    let res = client.upload(&post, "hello.txt", b"hello".to_vec()).await;
    assert!(res.ok, "upload failed: {:?}", res.error);

    // Dropping the required form field must surface as a failure result.
    post.fields.clear();
    let res = client.upload(&post, "hello.txt", b"hello".to_vec()).await;
    assert!(!res.ok);
    assert_eq!(res.status_code, 400);
}

#[test]
fn test_blocking_dispatch_and_upload() {
    // Serve from a runtime on a helper thread; the blocking client must
    // work without any ambient async context.
    let (tx, rx) = std::sync::mpsc::channel();
    std::thread::spawn(move || {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
            tx.send(listener.local_addr().unwrap()).unwrap();
            axum::serve(listener, app()).await.unwrap();
        });
    });
    let addr = rx.recv().unwrap();
    let client = client_for(addr);

    let res = client.dispatch_blocking(&Payload::new("doc.fetch").into());
    assert!(res.ok);
    assert_eq!(res.data, Value::from(serde_json::json!({"id": 1})));

    let res = client.dispatch_blocking(&Payload::new("doc.unknown").into());
    assert!(!res.ok);
    assert_eq!(res.status_code, 404);

    let post = PresignedPost {
        url: format!("http://{addr}/upload"),
        fields: [("policy".to_owned(), "signed-policy".to_owned())]
            .into_iter()
            .collect(),
    };
    let res = client.upload_blocking(&post, "hello.txt", b"hello".to_vec());
    assert!(res.ok, "upload failed: {:?}", res.error);
}
