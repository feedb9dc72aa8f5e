// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Telegraph client against a mock API

use serde_json::json;
use telegraph_mcp::content::Node;
use telegraph_mcp::telegraph::{
    CreateAccountRequest, CreatePageRequest, EditPageRequest, GetPageListRequest, GetPageRequest,
    GetViewsRequest, TelegraphClient,
};
use telegraph_mcp::{ApiError, TelegraphError};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn page_json(path: &str, title: &str) -> serde_json::Value {
    json!({
        "path": path,
        "url": format!("https://telegra.ph/{}", path),
        "title": title,
        "description": "",
        "views": 3
    })
}

async fn client(server: &MockServer) -> TelegraphClient {
    TelegraphClient::with_base_url(server.uri()).unwrap()
}

#[tokio::test]
async fn test_create_account() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/createAccount"))
        .and(body_partial_json(json!({"short_name": "Sandbox"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "result": {
                "short_name": "Sandbox",
                "author_name": "Anonymous",
                "access_token": "abc123",
                "auth_url": "https://edit.telegra.ph/auth/xyz"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let account = client(&server)
        .await
        .create_account(&CreateAccountRequest {
            short_name: "Sandbox".to_string(),
            author_name: Some("Anonymous".to_string()),
            author_url: None,
        })
        .await
        .unwrap();

    assert_eq!(account.access_token.as_deref(), Some("abc123"));
    assert_eq!(account.short_name.as_deref(), Some("Sandbox"));
}

#[tokio::test]
async fn test_ok_false_is_telegraph_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/createPage"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"ok": false, "error": "ACCESS_TOKEN_INVALID"})),
        )
        .mount(&server)
        .await;

    let err = client(&server)
        .await
        .create_page(&CreatePageRequest {
            access_token: "bad".to_string(),
            title: "Title".to_string(),
            author_name: None,
            author_url: None,
            content: vec![Node::text("hi")],
            return_content: false,
        })
        .await
        .unwrap_err();

    match err {
        TelegraphError::Api(ApiError::Telegraph(message)) => {
            assert_eq!(message, "ACCESS_TOKEN_INVALID")
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[tokio::test]
async fn test_http_error_is_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/getPageList"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    let err = client(&server)
        .await
        .get_page_list(&GetPageListRequest::new("token"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        TelegraphError::Api(ApiError::ServerError { status: 502, .. })
    ));
}

#[tokio::test]
async fn test_ok_without_result_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/getPage/Some-Page"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .mount(&server)
        .await;

    let err = client(&server)
        .await
        .get_page(&GetPageRequest {
            path: "Some-Page".to_string(),
            return_content: false,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, TelegraphError::Api(ApiError::InvalidResponse(_))));
}

#[tokio::test]
async fn test_path_methods_put_path_in_url() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/editPage/My-Page-01-02"))
        .and(body_partial_json(json!({"title": "New", "access_token": "t"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "result": page_json("My-Page-01-02", "New")
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/getViews/My-Page-01-02"))
        .and(body_partial_json(json!({"year": 2024})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"ok": true, "result": {"views": 42}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server).await;
    let page = client
        .edit_page(&EditPageRequest {
            path: "My-Page-01-02".to_string(),
            access_token: "t".to_string(),
            title: "New".to_string(),
            author_name: None,
            author_url: None,
            content: vec![Node::with_children("p", vec![Node::text("x")])],
            return_content: false,
        })
        .await
        .unwrap();
    assert_eq!(page.title, "New");

    let views = client
        .get_views(&GetViewsRequest {
            path: "My-Page-01-02".to_string(),
            year: Some(2024),
            ..GetViewsRequest::default()
        })
        .await
        .unwrap();
    assert_eq!(views.views, 42);
}

#[tokio::test]
async fn test_validation_happens_before_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = client(&server)
        .await
        .create_page(&CreatePageRequest {
            access_token: "t".to_string(),
            title: String::new(),
            author_name: None,
            author_url: None,
            content: vec![Node::text("x")],
            return_content: false,
        })
        .await
        .unwrap_err();
    assert!(err.is_invalid_input());
}

#[tokio::test]
async fn test_get_all_pages_follows_offset() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/getPageList"))
        .and(body_partial_json(json!({"offset": 0})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "result": {"total_count": 3, "pages": [page_json("A", "a"), page_json("B", "b")]}
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/getPageList"))
        .and(body_partial_json(json!({"offset": 2})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "result": {"total_count": 3, "pages": [page_json("C", "c")]}
        })))
        .mount(&server)
        .await;

    let pages = client(&server).await.get_all_pages("token").await.unwrap();
    let paths: Vec<&str> = pages.iter().map(|p| p.path.as_str()).collect();
    assert_eq!(paths, vec!["A", "B", "C"]);
}

#[tokio::test]
async fn test_upload_returns_absolute_url() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{"src": "/file/abc123.png"}])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("pixel.png");
    std::fs::write(&image, [0x89, b'P', b'N', b'G']).unwrap();

    let url = client(&server).await.upload_file(&image).await.unwrap();
    assert_eq!(url, format!("{}/file/abc123.png", server.uri()));
}

#[tokio::test]
async fn test_upload_error_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"error": "File type invalid"})),
        )
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("photo.jpg");
    std::fs::write(&image, b"jpeg").unwrap();

    let err = client(&server).await.upload_file(&image).await.unwrap_err();
    assert!(matches!(err, TelegraphError::Api(ApiError::Telegraph(ref m)) if m == "File type invalid"));
}

#[tokio::test]
async fn test_upload_rejects_unsupported_extension() {
    let dir = tempfile::tempdir().unwrap();
    let doc = dir.path().join("notes.txt");
    std::fs::write(&doc, b"hello").unwrap();

    let client = TelegraphClient::with_base_url("http://127.0.0.1:9").unwrap();
    let err = client.upload_file(&doc).await.unwrap_err();
    assert!(err.is_invalid_input());
}
