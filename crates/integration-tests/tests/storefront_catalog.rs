//! Storefront pages and the price quote endpoint, one request at a time.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use facade_shop_integration_tests::{body_text, get, storefront_app};
use serde_json::Value;

#[tokio::test]
async fn test_health() {
    let response = get(storefront_app(), "/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "ok");
}

#[tokio::test]
async fn test_home_page_renders() {
    let response = get(storefront_app(), "/").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("<html"));
}

#[tokio::test]
async fn test_catalog_lists_seed_facades() {
    let response = get(storefront_app(), "/catalog").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Классика с филёнкой"));
    assert!(body.contains("Зеркальная дверь купе"));
}

#[tokio::test]
async fn test_catalog_category_filter() {
    let response = get(storefront_app(), "/catalog?category=bathroom").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Влагостойкий МДФ"));
    assert!(!body.contains("Зеркальная дверь купе"));
}

#[tokio::test]
async fn test_product_page() {
    let response = get(storefront_app(), "/product/1").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Классика с филёнкой"));
}

#[tokio::test]
async fn test_unknown_product_is_not_found() {
    let response = get(storefront_app(), "/product/999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_path_is_not_found() {
    let response = get(storefront_app(), "/no-such-page").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_quote_scales_with_area_and_quantity() {
    let response = get(
        storefront_app(),
        "/product/1/quote?width=400&height=600&quantity=2",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(json["area_sqm"], "0.24");
    assert_eq!(json["price"], "2400");
    assert_eq!(json["display"], "2 400 ₽");
}

#[tokio::test]
async fn test_quote_defaults_to_one_piece() {
    let response = get(storefront_app(), "/product/1/quote?width=400&height=600").await;
    let json: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(json["price"], "1200");
}

#[tokio::test]
async fn test_quote_rejects_out_of_range_size() {
    let response = get(storefront_app(), "/product/1/quote?width=20&height=600").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_quote_rejects_zero_quantity() {
    let response = get(
        storefront_app(),
        "/product/1/quote?width=400&height=600&quantity=0",
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
