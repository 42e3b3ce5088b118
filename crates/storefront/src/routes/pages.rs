//! Static page route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{http::StatusCode, response::IntoResponse};
use tracing::instrument;

use crate::filters;
use crate::middleware::PageContext;

/// About page template.
#[derive(Template, WebTemplate)]
#[template(path = "about.html")]
pub struct AboutTemplate {
    pub page: PageContext,
}

/// Contact page template. Details come from the site settings.
#[derive(Template, WebTemplate)]
#[template(path = "contact.html")]
pub struct ContactTemplate {
    pub page: PageContext,
}

/// Not-found page template.
#[derive(Template, WebTemplate)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate {
    pub page: PageContext,
}

/// Display the About page.
#[instrument(skip_all)]
pub async fn about(page: PageContext) -> impl IntoResponse {
    AboutTemplate { page }
}

/// Display the Contact page.
#[instrument(skip_all)]
pub async fn contact(page: PageContext) -> impl IntoResponse {
    ContactTemplate { page }
}

/// Fallback for unknown paths.
pub async fn not_found(page: PageContext) -> impl IntoResponse {
    (StatusCode::NOT_FOUND, NotFoundTemplate { page })
}
