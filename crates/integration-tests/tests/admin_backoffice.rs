//! Back-office changes made through the admin forms.

#![allow(clippy::unwrap_used)]

use facade_shop_integration_tests::TestServer;
use reqwest::StatusCode;

#[tokio::test]
async fn test_category_in_use_cannot_be_deleted() {
    let server = TestServer::admin_logged_in().await;

    let response = server.post_form("/admin/categories/1/delete", &[]).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.url().path().ends_with("/admin/categories"));

    let page = response.text().await.unwrap();
    assert!(page.contains("Категорию нельзя удалить"));
    assert!(page.contains("Кухни"));
}

#[tokio::test]
async fn test_empty_category_can_be_created_and_deleted() {
    let server = TestServer::admin_logged_in().await;

    let page = server
        .post_form(
            "/admin/categories",
            &[
                ("name", "Прихожие"),
                ("slug", "hallway"),
                ("description", ""),
            ],
        )
        .await
        .text()
        .await
        .unwrap();
    assert!(page.contains("Категория «Прихожие» создана"));

    // Seed categories are 1..=4
    let page = server
        .post_form("/admin/categories/5/delete", &[])
        .await
        .text()
        .await
        .unwrap();
    assert!(page.contains("Категория «Прихожие» удалена"));
}

#[tokio::test]
async fn test_duplicate_category_slug_is_refused() {
    let server = TestServer::admin_logged_in().await;

    let page = server
        .post_form(
            "/admin/categories",
            &[("name", "Ещё кухни"), ("slug", "kitchen"), ("description", "")],
        )
        .await
        .text()
        .await
        .unwrap();
    assert!(page.contains("Адрес «kitchen» уже занят"));
}

#[tokio::test]
async fn test_order_status_follows_lifecycle() {
    let server = TestServer::admin_logged_in().await;

    // Seed order 4 is new
    let page = server
        .post_form("/admin/orders/4/status", &[("status", "processing")])
        .await
        .text()
        .await
        .unwrap();
    assert!(page.contains("Статус заказа: В работе"));

    // Seed order 1 is already delivered
    let response = server
        .post_form("/admin/orders/1/status", &[("status", "new")])
        .await;
    assert!(response.url().path().ends_with("/admin/orders/1"));
    assert!(
        response
            .text()
            .await
            .unwrap()
            .contains("Нельзя перевести заказ в статус «Новый»")
    );
}

#[tokio::test]
async fn test_unknown_order_is_not_found() {
    let server = TestServer::admin_logged_in().await;
    let response = server.get("/admin/orders/999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_duplicate_discount_code_is_refused() {
    let server = TestServer::admin_logged_in().await;

    let page = server
        .post_form(
            "/admin/discounts",
            &[("code", "welcome5"), ("percent", "10"), ("expires_on", "")],
        )
        .await
        .text()
        .await
        .unwrap();
    assert!(page.contains("already exists"));

    let page = server
        .post_form(
            "/admin/discounts",
            &[("code", "autumn20"), ("percent", "20"), ("expires_on", "2031-11-30")],
        )
        .await
        .text()
        .await
        .unwrap();
    assert!(page.contains("Промокод AUTUMN20 создан"));
    assert!(page.contains("30.11.2031"));
}

#[tokio::test]
async fn test_settings_reject_bad_threshold() {
    let server = TestServer::admin_logged_in().await;

    let response = server
        .post_form(
            "/admin/settings",
            &[
                ("store_name", "Фасад Маркет"),
                ("phone", "+7 495 000-00-00"),
                ("email", "shop@example.ru"),
                ("address", ""),
                ("working_hours", ""),
                ("delivery_note", ""),
                ("free_delivery_threshold", "много"),
            ],
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(
        response
            .text()
            .await
            .unwrap()
            .contains("Порог бесплатной доставки должен быть числом")
    );
}

#[tokio::test]
async fn test_comment_moderation() {
    let server = TestServer::admin_logged_in().await;

    let pending = server.get_text("/admin/comments?show=pending").await;
    assert!(!pending.contains("Светлана"));
    let irina = pending.find("Ирина").unwrap();
    let guest = pending.find("Гость").unwrap();
    assert!(irina < guest, "newest pending comment comes first");

    server.post_form("/admin/comments/6/approve", &[]).await;
    let pending = server.get_text("/admin/comments?show=pending").await;
    assert!(!pending.contains("Ирина"));
    assert!(pending.contains("Гость"));
}
