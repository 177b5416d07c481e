use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use nt_core::{Article, ArticleId};
use nt_storage::InMemoryStorage;
use nt_web::{create_app, AppState};
use std::sync::Arc;
use tower::ServiceExt;

async fn send(app: &Router, method: Method, uri: &str, body: Option<String>) -> (StatusCode, Vec<u8>) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(body.map(Body::from).unwrap_or_else(Body::empty))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

fn payload(title: &str) -> String {
    serde_json::json!({
        "author": "a",
        "title": title,
        "summary": "s",
        "created_at": "2025-07-30T15:30:45Z",
        "source": "https://example.com",
        "tags": ["x"],
    })
    .to_string()
}

async fn list(app: &Router) -> Vec<Article> {
    let (status, body) = send(app, Method::GET, "/news", None).await;
    assert_eq!(status, StatusCode::OK);
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_news_lifecycle() {
    let app = create_app(AppState::new(Arc::new(InMemoryStorage::new())));
    assert!(list(&app).await.is_empty());

    let (status, body) = send(&app, Method::POST, "/news", Some(payload("first"))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body.is_empty());

    let articles = list(&app).await;
    assert_eq!(articles.len(), 1);
    let created = &articles[0];
    assert_eq!(created.title, "first");
    assert_eq!(created.tags, vec!["x".to_string()]);

    let uri = format!("/news/{}", created.id);
    let (status, body) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    let fetched: Article = serde_json::from_slice(&body).unwrap();
    assert_eq!(&fetched, created);

    let (status, body) = send(&app, Method::PUT, &uri, Some(payload("second"))).await;
    assert_eq!(status, StatusCode::OK);
    let updated: Article = serde_json::from_slice(&body).unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.title, "second");

    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_empty());

    // Not-found surfaces as a storage failure.
    let (status, _) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_source_returned_as_sent() {
    let app = create_app(AppState::new(Arc::new(InMemoryStorage::new())));
    let body = serde_json::json!({
        "author": "a",
        "title": "t",
        "summary": "s",
        "created_at": "2025-07-30T15:30:45Z",
        "source": "HTTPS://Example.COM",
        "tags": ["x"],
    })
    .to_string();

    let (status, _) = send(&app, Method::POST, "/news", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(list(&app).await[0].source, "HTTPS://Example.COM");

    let body = serde_json::json!({
        "author": "a",
        "title": "t",
        "summary": "s",
        "created_at": "2025-07-30T15:30:45Z",
        "source": "https:/example.com",
        "tags": ["x"],
    })
    .to_string();
    let (status, text) = send(&app, Method::POST, "/news", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(String::from_utf8(text).unwrap().starts_with("validation failed: source"));
}

#[tokio::test]
async fn test_unknown_id_is_server_error() {
    let app = create_app(AppState::new(Arc::new(InMemoryStorage::new())));
    let uri = format!("/news/{}", ArticleId::generate());

    let (status, _) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let (status, _) = send(&app, Method::PUT, &uri, Some(payload("ghost"))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(list(&app).await.is_empty());
}

#[tokio::test]
async fn test_rejected_payload_never_reaches_storage() {
    let storage = Arc::new(InMemoryStorage::new());
    let app = create_app(AppState::new(storage.clone()));

    let body = serde_json::json!({"author": "a", "title": "", "summary": "s"}).to_string();
    let (status, text) = send(&app, Method::POST, "/news", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(String::from_utf8(text).unwrap().starts_with("validation failed: title"));
    assert!(storage.is_empty().await);
}

#[tokio::test]
async fn test_concurrent_posts() {
    let storage = Arc::new(InMemoryStorage::new());
    let app = create_app(AppState::new(storage.clone()));

    let mut handles = Vec::new();
    for i in 0..8 {
        let app = app.clone();
        handles.push(tokio::spawn(async move {
            send(&app, Method::POST, "/news", Some(payload(&format!("article {}", i)))).await.0
        }));
    }
    for handle in handles {
        assert_eq!(handle.await.unwrap(), StatusCode::CREATED);
    }
    assert_eq!(storage.len().await, 8);
}
