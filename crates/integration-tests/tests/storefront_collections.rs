//! Favorites and cart flows across several requests of one shopper.

#![allow(clippy::unwrap_used)]

use facade_shop_integration_tests::TestServer;
use reqwest::StatusCode;

#[tokio::test]
async fn test_favorite_is_remembered_between_requests() {
    let server = TestServer::storefront().await;

    let response = server
        .post_form("/favorites/add", &[("facade_id", "1")])
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let page = server.get_text("/favorites").await;
    assert!(page.contains("Классика с филёнкой"));
}

#[tokio::test]
async fn test_adding_a_favorite_twice_keeps_one_entry() {
    let server = TestServer::storefront().await;

    server.post_form("/favorites/add", &[("facade_id", "2")]).await;
    server.post_form("/favorites/add", &[("facade_id", "2")]).await;

    let page = server.get_text("/favorites").await;
    assert_eq!(page.matches("href=\"/product/2\"><img").count(), 1);
}

#[tokio::test]
async fn test_shoppers_do_not_share_collections() {
    let alice = TestServer::storefront().await;
    alice.post_form("/favorites/add", &[("facade_id", "1")]).await;

    // Same app state, fresh cookie jar
    let bob = reqwest::Client::builder().cookie_store(true).build().unwrap();
    let page = bob
        .get(alice.url("/favorites"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(!page.contains("Классика с филёнкой"));
}

#[tokio::test]
async fn test_add_configured_facade_to_cart() {
    let server = TestServer::storefront().await;

    let response = server
        .post_form(
            "/cart/add",
            &[
                ("facade_id", "1"),
                ("width", "400"),
                ("height", "600"),
                ("quantity", "2"),
                ("coating", "matte"),
                ("color", "white"),
            ],
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.url().path().ends_with("/cart"));

    let page = response.text().await.unwrap();
    assert!(page.contains("Классика с филёнкой"));
    assert!(page.contains("2 400 ₽"));
}

#[tokio::test]
async fn test_cart_rejects_unavailable_finish() {
    let server = TestServer::storefront().await;

    // Facade 1 is not offered in black
    let response = server
        .post_form(
            "/cart/add",
            &[
                ("facade_id", "1"),
                ("width", "400"),
                ("height", "600"),
                ("coating", "matte"),
                ("color", "black"),
            ],
        )
        .await;
    assert!(response.url().path().starts_with("/product/1"));

    let cart = server.get_text("/cart").await;
    assert!(!cart.contains("Классика с филёнкой"));
}

#[tokio::test]
async fn test_move_all_favorites_to_cart_uses_standard_size() {
    let server = TestServer::storefront().await;
    server.post_form("/favorites/add", &[("facade_id", "1")]).await;
    server.post_form("/favorites/add", &[("facade_id", "3")]).await;

    let response = server.post_form("/favorites/move-all", &[]).await;
    assert!(response.url().path().ends_with("/cart"));

    let cart = response.text().await.unwrap();
    assert!(cart.contains("Классика с филёнкой"));
    assert!(cart.contains("Базовый ЛДСП"));
    assert!(cart.contains("value=\"700\""));

    let favorites = server.get_text("/favorites").await;
    assert!(!favorites.contains("Классика с филёнкой"));
}

#[tokio::test]
async fn test_clear_cart() {
    let server = TestServer::storefront().await;
    server.post_form("/favorites/add", &[("facade_id", "1")]).await;
    server.post_form("/favorites/move", &[("facade_id", "1")]).await;
    assert!(server.get_text("/cart").await.contains("Классика с филёнкой"));

    server.post_form("/cart/clear", &[]).await;
    assert!(!server.get_text("/cart").await.contains("Классика с филёнкой"));
}

async fn add_to_cart(server: &TestServer, width: &str, height: &str, quantity: &str) {
    server
        .post_form(
            "/cart/add",
            &[
                ("facade_id", "1"),
                ("width", width),
                ("height", height),
                ("quantity", quantity),
                ("coating", "matte"),
                ("color", "white"),
            ],
        )
        .await;
}

#[tokio::test]
async fn test_update_quantity_rederives_line_price() {
    let server = TestServer::storefront().await;
    add_to_cart(&server, "400", "600", "1").await;

    let response = server
        .post_form(
            "/cart/update",
            &[("line_id", "1"), ("quantity", "3"), ("width", "400"), ("height", "600")],
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.url().path().ends_with("/cart"));

    let cart = response.text().await.unwrap();
    assert!(cart.contains("3 шт."));
    // 0.24 m² × 5000 × 3
    assert!(cart.contains("3 600 ₽"));
}

#[tokio::test]
async fn test_update_to_zero_quantity_removes_line() {
    let server = TestServer::storefront().await;
    add_to_cart(&server, "400", "600", "2").await;

    let response = server
        .post_form(
            "/cart/update",
            &[("line_id", "1"), ("quantity", "0"), ("width", "400"), ("height", "600")],
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let cart = server.get_text("/cart").await;
    assert!(!cart.contains("Классика с филёнкой"));
}

#[tokio::test]
async fn test_resize_onto_existing_line_merges_quantities() {
    let server = TestServer::storefront().await;
    add_to_cart(&server, "400", "600", "1").await;
    add_to_cart(&server, "500", "600", "2").await;

    let response = server
        .post_form(
            "/cart/update",
            &[("line_id", "1"), ("quantity", "1"), ("width", "500"), ("height", "600")],
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.url().path().ends_with("/cart"));

    let cart = response.text().await.unwrap();
    assert!(!cart.contains("name=\"line_id\" value=\"1\""));
    assert!(cart.contains("name=\"line_id\" value=\"2\""));
    assert!(cart.contains("3 шт."));
    // 0.3 m² × 5000 × 3
    assert!(cart.contains("4 500 ₽"));
}

#[tokio::test]
async fn test_update_above_line_limit_keeps_cart() {
    let server = TestServer::storefront().await;
    add_to_cart(&server, "400", "600", "2").await;

    let response = server
        .post_form(
            "/cart/update",
            &[("line_id", "1"), ("quantity", "1000"), ("width", "500"), ("height", "600")],
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let cart = response.text().await.unwrap();
    assert!(cart.contains("Не удалось обновить корзину"));
    assert!(cart.contains("2 шт."));
    assert!(cart.contains("value=\"400\""));
}
