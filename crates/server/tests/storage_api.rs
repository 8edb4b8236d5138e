//! Router-level tests for the storage API

mod common;

use http::StatusCode;
use serde_json::json;

use common::{delete, get, multipart_upload, post_json, send, send_raw, test_router};

#[tokio::test]
async fn test_list_fresh_resource_is_empty() {
    let (router, _temp) = test_router();

    let (status, body) = send(&router, get("/api/v0/acme/storage/list?path=")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["currentPath"], "");
    assert_eq!(body["items"], json!([]));
}

#[tokio::test]
async fn test_list_missing_directory_is_404() {
    let (router, _temp) = test_router();

    let (status, body) = send(&router, get("/api/v0/acme/storage/list?path=nope")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not found");
}

#[tokio::test]
async fn test_traversal_is_403() {
    let (router, _temp) = test_router();

    for uri in [
        "/api/v0/acme/storage/list?path=..",
        "/api/v0/acme/storage/list?path=a%2F..%2Fb",
        "/api/v0/acme/storage/download?path=..%2Fother-tenant%2Fsecret.txt",
        "/api/v0/acme/storage/item?path=..",
    ] {
        let request = if uri.contains("/item") {
            delete(uri)
        } else {
            get(uri)
        };
        let (status, body) = send(&router, request).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "expected 403 for {uri}");
        assert_eq!(body["error"], "Access denied");
    }
}

#[tokio::test]
async fn test_upload_then_list_then_download() {
    let (router, _temp) = test_router();

    let (status, body) = send(
        &router,
        multipart_upload(
            "/api/v0/acme/storage/upload?path=docs",
            "hello.txt",
            b"hello locker",
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Files uploaded successfully");
    assert_eq!(body["files"][0]["filename"], "hello.txt");
    assert_eq!(body["files"][0]["path"], "docs/hello.txt");
    assert_eq!(body["files"][0]["type"], 1);

    let (status, body) = send(&router, get("/api/v0/acme/storage/list?path=docs")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"][0]["filename"], "hello.txt");
    assert_eq!(body["items"][0]["filenameWithoutExtension"], "hello");

    let (status, bytes, content_type) = send_raw(
        &router,
        get("/api/v0/acme/storage/download?path=docs%2Fhello.txt"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bytes, b"hello locker");
    assert_eq!(content_type.as_deref(), Some("text/plain"));
}

#[tokio::test]
async fn test_upload_without_files_is_400() {
    let (router, _temp) = test_router();

    // A multipart payload with no file fields at all.
    let body = "--locker-test-boundary--\r\n".to_string();
    let request = http::Request::builder()
        .method(http::Method::POST)
        .uri("/api/v0/acme/storage/upload?path=")
        .header(
            http::header::CONTENT_TYPE,
            "multipart/form-data; boundary=locker-test-boundary",
        )
        .body(axum::body::Body::from(body))
        .unwrap();

    let (status, body) = send(&router, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "no files provided");
}

#[tokio::test]
async fn test_zero_byte_upload_is_skipped() {
    let (router, _temp) = test_router();

    let (status, body) = send(
        &router,
        multipart_upload("/api/v0/acme/storage/upload?path=", "empty.bin", b""),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["files"], json!([]));

    let (_, body) = send(&router, get("/api/v0/acme/storage/list?path=")).await;
    assert_eq!(body["items"], json!([]));
}

#[tokio::test]
async fn test_create_folder_uniquifies() {
    let (router, _temp) = test_router();

    let (status, body) = send(
        &router,
        post_json(
            "/api/v0/acme/storage/folder?path=",
            json!({"name": "Reports"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["item"]["path"], "Reports");
    assert_eq!(body["item"]["type"], 0);

    let (_, body) = send(
        &router,
        post_json(
            "/api/v0/acme/storage/folder?path=",
            json!({"name": "Reports"}),
        ),
    )
    .await;
    assert_eq!(body["item"]["path"], "Reports (1)");
}

#[tokio::test]
async fn test_create_url_and_fetch_payload() {
    let (router, _temp) = test_router();

    let (status, body) = send(
        &router,
        post_json(
            "/api/v0/acme/storage/url?path=",
            json!({"name": "bookmark", "url": "https://example.com"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["item"]["filename"], "bookmark.url");
    assert_eq!(body["item"]["type"], 2);

    let (status, bytes, _) = send_raw(
        &router,
        get("/api/v0/acme/storage/download?path=bookmark.url"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bytes, b"[InternetShortcut]\r\nURL=https://example.com\r\n");
}

#[tokio::test]
async fn test_create_url_rejects_non_http_targets() {
    let (router, _temp) = test_router();

    for target in ["ftp://example.com", "not a url", "javascript:alert(1)"] {
        let (status, _) = send(
            &router,
            post_json(
                "/api/v0/acme/storage/url?path=",
                json!({"name": "bad", "url": target}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "expected 400 for {target}");
    }
}

#[tokio::test]
async fn test_delete_roundtrip() {
    let (router, _temp) = test_router();

    send(
        &router,
        multipart_upload("/api/v0/acme/storage/upload?path=docs", "a.txt", b"x"),
    )
    .await;

    let (status, body) = send(&router, delete("/api/v0/acme/storage/item?path=docs")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Item deleted successfully");

    let (status, _) = send(&router, delete("/api/v0/acme/storage/item?path=docs")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &router,
        get("/api/v0/acme/storage/download?path=docs%2Fa.txt"),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_requires_a_path() {
    let (router, _temp) = test_router();

    let (status, _) = send(&router, delete("/api/v0/acme/storage/item?path=")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_tenants_are_isolated() {
    let (router, _temp) = test_router();

    send(
        &router,
        multipart_upload("/api/v0/tenant-a/storage/upload?path=", "secret.txt", b"a"),
    )
    .await;

    // The other tenant's miss is indistinguishable from a plain 404.
    let (status, body) = send(
        &router,
        get("/api/v0/tenant-b/storage/download?path=secret.txt"),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not found");
}
