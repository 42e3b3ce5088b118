//! Integration tests for Facade Shop.
//!
//! Both applications are built in-process from their library crates, so the
//! tests need no running servers or environment.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p facade-shop-integration-tests
//! ```
//!
//! # Helpers
//!
//! - [`storefront_app`] / [`admin_app`] - routers for single-request checks
//!   with `tower::ServiceExt::oneshot`
//! - [`TestServer`] - an app served on an ephemeral port with a cookie-keeping
//!   `reqwest` client, for flows that span several requests

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::net::SocketAddr;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response};
use secrecy::SecretString;
use tower::ServiceExt;

use facade_shop_admin::{config::AdminConfig, state::AppState as AdminState};
use facade_shop_storefront::{config::StorefrontConfig, state::AppState as StorefrontState};

/// Password the test admin logs in with.
pub const ADMIN_PASSWORD: &str = "t9#Lw2!vQz7@Rb4e";

/// Storefront router with the seed catalog.
#[must_use]
pub fn storefront_app() -> Router {
    let config = StorefrontConfig::new("http://localhost:3000");
    facade_shop_storefront::app(StorefrontState::new(config))
}

/// Admin router protected by [`ADMIN_PASSWORD`].
///
/// # Panics
///
/// Panics if the password cannot be hashed.
#[must_use]
#[allow(clippy::expect_used)]
pub fn admin_app() -> Router {
    let config = AdminConfig::new(
        "http://localhost:3001",
        SecretString::from(ADMIN_PASSWORD.to_string()),
    );
    let state = AdminState::new(config).expect("hash admin password");
    facade_shop_admin::app(state)
}

/// Send one GET request through a router.
///
/// # Panics
///
/// Panics if the request cannot be built or the router fails.
#[allow(clippy::expect_used)]
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("build request");
    app.oneshot(request).await.expect("router is infallible")
}

/// Read a response body as UTF-8.
///
/// # Panics
///
/// Panics if the body cannot be read or is not UTF-8.
#[allow(clippy::expect_used)]
pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}

/// An app served on `127.0.0.1` with a client that keeps cookies and
/// follows redirects.
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: reqwest::Client,
}

impl TestServer {
    /// Serve the storefront.
    pub async fn storefront() -> Self {
        Self::spawn(storefront_app()).await
    }

    /// Serve the admin.
    pub async fn admin() -> Self {
        Self::spawn(admin_app()).await
    }

    /// Serve the admin and log in.
    ///
    /// # Panics
    ///
    /// Panics if the login request fails.
    #[allow(clippy::expect_used)]
    pub async fn admin_logged_in() -> Self {
        let server = Self::admin().await;
        let response = server
            .post_form("/admin/login", &[("password", ADMIN_PASSWORD)])
            .await;
        assert!(response.status().is_success(), "admin login failed");
        server
    }

    /// Bind an ephemeral port and serve `app` in the background.
    ///
    /// # Panics
    ///
    /// Panics if the port cannot be bound or the client cannot be built.
    #[allow(clippy::expect_used)]
    pub async fn spawn(app: Router) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind test listener");
        let addr = listener.local_addr().expect("listener address");
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        let client = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .expect("build HTTP client");

        Self { addr, client }
    }

    /// Absolute URL for a path on this server.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// GET a path.
    ///
    /// # Panics
    ///
    /// Panics on a transport error.
    #[allow(clippy::expect_used)]
    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("GET request")
    }

    /// GET a path and return the body.
    ///
    /// # Panics
    ///
    /// Panics on a transport error.
    #[allow(clippy::expect_used)]
    pub async fn get_text(&self, path: &str) -> String {
        self.get(path).await.text().await.expect("response body")
    }

    /// POST an urlencoded form.
    ///
    /// # Panics
    ///
    /// Panics on a transport error.
    #[allow(clippy::expect_used)]
    pub async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .form(form)
            .send()
            .await
            .expect("POST request")
    }

    /// POST a multipart form.
    ///
    /// # Panics
    ///
    /// Panics on a transport error.
    #[allow(clippy::expect_used)]
    pub async fn post_multipart(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .multipart(form)
            .send()
            .await
            .expect("POST request")
    }
}
