use std::sync::Arc;

use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::{
    book::{
        service::BookService,
        store::{tests::book, BookStore, InMemoryBookStore, SqliteBookStore},
    },
    error::ErrorVerbosity,
    server::{app, ServerConfig},
    state::ApiState,
};

#[tokio::test]
async fn example_config_is_valid() {
    ServerConfig::from_config_file("config.example.yaml")
        .await
        .expect("Example config is not parsable");
}

fn book_one() -> Value {
    serde_json::to_value(book("0691161555")).unwrap()
}

fn book_two() -> Value {
    json!({
        "isbn": "0691161239",
        "amazon_url": "http://a.co/eobPtX2/bookTwo",
        "author": "Tom Harrison",
        "language": "english",
        "pages": 354,
        "publisher": "Harvard University Press",
        "title": "Train the brain for better memory",
        "year": 2020
    })
}

fn app_with_store(store: Arc<dyn BookStore>) -> Router {
    app(ApiState::new(ErrorVerbosity::Full, BookService::new(store)))
}

/// An app whose store already holds `book_one`.
fn seeded_app() -> Router {
    app_with_store(Arc::new(InMemoryBookStore::with_books([book("0691161555")])))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let body = match body {
        Some(body) => Body::from(body.to_string()),
        None => Body::empty(),
    };

    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(body)
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();

    let body = match bytes.is_empty() {
        true => Value::Null,
        false => serde_json::from_slice(&bytes).unwrap(),
    };

    (status, body)
}

#[tokio::test]
async fn get_all_books() {
    let app = seeded_app();

    let (status, body) = send(&app, Method::GET, "/books", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "books": [book_one()] }));
}

#[tokio::test]
async fn get_book_by_isbn() {
    let app = seeded_app();

    let (status, body) = send(&app, Method::GET, "/books/0691161555", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "book": book_one() }));
}

#[tokio::test]
async fn get_missing_book_is_not_found() {
    let app = seeded_app();

    let (status, body) = send(&app, Method::GET, "/books/0691161222", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error_type"], "NotFound");
}

#[tokio::test]
async fn get_with_malformed_isbn_is_bad_request() {
    let app = seeded_app();

    let (status, body) = send(&app, Method::GET, "/books/123123123", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_type"], "Validation");
    assert_eq!(body["error"]["validation_errors"][0]["field"], "isbn");
}

#[tokio::test]
async fn create_new_book() {
    let app = seeded_app();

    let (status, body) = send(&app, Method::POST, "/books", Some(book_two())).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({ "book": book_two() }));

    let (status, body) = send(&app, Method::GET, "/books/0691161239", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "book": book_two() }));
}

#[tokio::test]
async fn create_without_body_is_bad_request() {
    let app = seeded_app();

    let (status, body) = send(&app, Method::POST, "/books", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"]["validation_errors"],
        json!([{
            "field": "payload",
            "reason": "payload_missing",
            "message": "Payload missing"
        }])
    );
}

#[tokio::test]
async fn create_with_missing_data_is_bad_request() {
    let app = seeded_app();
    let partial = json!({ "isbn": "0691161111", "amazon_url": "http://google.com" });

    let (status, body) = send(&app, Method::POST, "/books", Some(partial)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"]["validation_errors"]
            .as_array()
            .map(|errors| errors.len()),
        Some(6)
    );

    let (status, _) = send(&app, Method::GET, "/books/0691161111", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn create_with_invalid_json_is_bad_request() {
    let app = seeded_app();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/books")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from("{\"isbn\": "))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_duplicate_is_conflict() {
    let app = seeded_app();

    let (status, body) = send(&app, Method::POST, "/books", Some(book_one())).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error_type"], "Conflict");
}

#[tokio::test]
async fn update_existing_book() {
    let app = seeded_app();
    let mut updated = book_one();
    updated["amazon_url"] = json!("http://a.co/eobPtX2/newLink");

    let (status, body) = send(&app, Method::PUT, "/books/0691161555", Some(updated.clone())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "book": updated }));
}

#[tokio::test]
async fn update_keeps_path_isbn() {
    let app = seeded_app();
    let mut updated = book_one();
    updated["isbn"] = json!("0691161239");
    updated["title"] = json!("Coding basics, second edition");

    let (status, body) = send(&app, Method::PUT, "/books/0691161555", Some(updated)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["book"]["isbn"], "0691161555");

    let (status, body) = send(&app, Method::GET, "/books/0691161555", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["book"]["title"], "Coding basics, second edition");

    let (status, _) = send(&app, Method::GET, "/books/0691161239", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_with_malformed_isbn_is_bad_request() {
    let app = seeded_app();

    let (status, _) = send(&app, Method::PUT, "/books/123123123", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_of_missing_book_is_not_found() {
    let app = seeded_app();

    let (status, _) = send(&app, Method::PUT, "/books/0691161222", Some(book_two())).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_with_missing_data_is_bad_request() {
    let app = seeded_app();

    let (status, _) = send(&app, Method::PUT, "/books/0691161555", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);

    let partial = json!({ "amazon_url": "http://google.com" });
    let (status, _) = send(&app, Method::PUT, "/books/0691161555", Some(partial)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = send(&app, Method::GET, "/books/0691161555", None).await;

    assert_eq!(body, json!({ "book": book_one() }));
}

#[tokio::test]
async fn delete_existing_book() {
    let app = seeded_app();

    let (status, body) = send(&app, Method::DELETE, "/books/0691161555", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Book deleted" }));

    let (status, _) = send(&app, Method::GET, "/books/0691161555", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, "/books/0691161555", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_with_malformed_isbn_is_bad_request() {
    let app = seeded_app();

    let (status, _) = send(&app, Method::DELETE, "/books/123123123", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let app = seeded_app();

    let (status, body) = send(&app, Method::GET, "/authors", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error_type"], "NotFound");
}

#[tokio::test]
async fn wrong_method_is_not_allowed() {
    let app = seeded_app();

    let (status, body) = send(&app, Method::PATCH, "/books/0691161555", None).await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body["error_type"], "MethodNotAllowed");
}

#[tokio::test]
async fn crud_round_trip_on_sqlite() {
    let store = SqliteBookStore::connect("sqlite::memory:").await.unwrap();
    let app = app_with_store(Arc::new(store));

    let (status, _) = send(&app, Method::POST, "/books", Some(book_two())).await;
    assert_eq!(status, StatusCode::CREATED);

    let mut updated = book_two();
    updated["pages"] = json!(360);
    let (status, body) = send(&app, Method::PUT, "/books/0691161239", Some(updated.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "book": updated }));

    let (status, body) = send(&app, Method::GET, "/books", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "books": [updated] }));

    let (status, _) = send(&app, Method::DELETE, "/books/0691161239", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, Method::GET, "/books", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "books": [] }));
}

#[tokio::test]
async fn openapi_document_is_served() {
    let app = seeded_app();

    let (status, body) = send(&app, Method::GET, "/api-docs/openapi.json", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/books/{isbn}"].is_object());
}
