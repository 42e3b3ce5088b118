//! Custom fabrication requests submitted as multipart forms.

#![allow(clippy::unwrap_used)]

use facade_shop_integration_tests::TestServer;
use reqwest::StatusCode;
use reqwest::multipart::{Form, Part};

fn dimensions(width: &str, height: &str, depth: &str) -> Form {
    Form::new()
        .text("width", width.to_string())
        .text("height", height.to_string())
        .text("depth", depth.to_string())
}

#[tokio::test]
async fn test_missing_height_is_rejected() {
    let server = TestServer::storefront().await;

    let response = server
        .post_multipart("/custom-order", dimensions("198", "", "91"))
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let page = response.text().await.unwrap();
    assert!(page.contains("Заявка не отправлена"));
    assert!(page.contains("Заполните поля: высота"));
    assert!(!page.contains("Заявка отправлена"));
    // What was typed is shown again
    assert!(page.contains("value=\"198\""));
}

#[tokio::test]
async fn test_complete_request_is_acknowledged() {
    let server = TestServer::storefront().await;

    let response = server
        .post_multipart("/custom-order", dimensions("198", "72", "91"))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.url().path().ends_with("/custom-order"));
    assert!(response.text().await.unwrap().contains("Заявка отправлена"));
}

#[tokio::test]
async fn test_request_with_drawing_attached() {
    let server = TestServer::storefront().await;

    let drawing = Part::bytes(b"%PDF-1.4 sketch".to_vec())
        .file_name("sketch.pdf")
        .mime_str("application/pdf")
        .unwrap();
    let form = dimensions("60", "72", "56").part("attachment", drawing);

    let response = server.post_multipart("/custom-order", form).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.text().await.unwrap().contains("Заявка отправлена"));
}

#[tokio::test]
async fn test_unsupported_attachment_is_rejected() {
    let server = TestServer::storefront().await;

    let script = Part::bytes(b"echo hi".to_vec())
        .file_name("run.sh")
        .mime_str("text/x-shellscript")
        .unwrap();
    let form = dimensions("60", "72", "56").part("attachment", script);

    let response = server.post_multipart("/custom-order", form).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response.text().await.unwrap().contains("run.sh"));
}
