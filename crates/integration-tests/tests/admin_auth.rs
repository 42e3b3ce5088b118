//! Admin login, logout and route protection.

#![allow(clippy::unwrap_used)]

use axum::http::{StatusCode, header};
use facade_shop_integration_tests::{ADMIN_PASSWORD, TestServer, admin_app, body_text, get};

#[tokio::test]
async fn test_health_needs_no_login() {
    let response = get(admin_app(), "/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "ok");
}

#[tokio::test]
async fn test_protected_pages_redirect_to_login() {
    for path in [
        "/admin",
        "/admin/products",
        "/admin/orders",
        "/admin/analytics",
        "/admin/settings",
    ] {
        let response = get(admin_app(), path).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{path}");
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/admin/login",
            "{path}"
        );
    }
}

#[tokio::test]
async fn test_login_page_renders() {
    let response = get(admin_app(), "/admin/login").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("name=\"password\""));
}

#[tokio::test]
async fn test_wrong_password_is_refused() {
    let server = TestServer::admin().await;

    let response = server
        .post_form("/admin/login", &[("password", "not-the-password")])
        .await;
    assert_eq!(response.status(), reqwest::StatusCode::UNAUTHORIZED);
    assert!(response.text().await.unwrap().contains("Неверный пароль"));

    let response = server.get("/admin/products").await;
    assert!(response.url().path().ends_with("/admin/login"));
}

#[tokio::test]
async fn test_login_opens_dashboard() {
    let server = TestServer::admin().await;

    let response = server
        .post_form("/admin/login", &[("password", ADMIN_PASSWORD)])
        .await;
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert_eq!(response.url().path(), "/admin");

    let products = server.get("/admin/products").await;
    assert_eq!(products.status(), reqwest::StatusCode::OK);
    assert!(products.text().await.unwrap().contains("Классика с филёнкой"));
}

#[tokio::test]
async fn test_logout_ends_session() {
    let server = TestServer::admin_logged_in().await;

    let response = server.post_form("/admin/logout", &[]).await;
    assert!(response.url().path().ends_with("/admin/login"));

    let response = server.get("/admin").await;
    assert!(response.url().path().ends_with("/admin/login"));
}
