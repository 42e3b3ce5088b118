//! Authentication route handlers for admin.
//!
//! A single shared password guards the back-office.

use askama::Template;
use axum::{
    Form, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::filters;
use crate::middleware::{OptionalAdminAuth, clear_current_admin, set_current_admin};
use crate::models::CurrentAdmin;
use crate::state::AppState;

use super::render;

/// Login page template.
#[derive(Template)]
#[template(path = "auth/login.html")]
struct LoginPageTemplate {
    error: Option<String>,
}

#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    password: String,
}

impl std::fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginForm")
            .field("password", &"[redacted]")
            .finish()
    }
}

/// Build the auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", get(login_page).post(login))
        .route("/logout", post(logout))
}

/// Render the login page.
///
/// GET /admin/login
async fn login_page(OptionalAdminAuth(admin): OptionalAdminAuth) -> Response {
    if admin.is_some() {
        return Redirect::to("/admin").into_response();
    }
    render(&LoginPageTemplate { error: None }).into_response()
}

/// Check the password and open a session.
///
/// POST /admin/login
#[instrument(skip(state, session, form))]
async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    if !state.verify_password(&form.password) {
        tracing::warn!("Admin login failed");
        let page = render(&LoginPageTemplate {
            error: Some("Неверный пароль".to_string()),
        });
        return Ok((StatusCode::UNAUTHORIZED, page).into_response());
    }

    set_current_admin(&session, &CurrentAdmin::now()).await?;
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some("admin".to_string()),
            ..Default::default()
        }));
    });
    tracing::info!("Admin logged in");
    Ok(Redirect::to("/admin").into_response())
}

/// Logout and clear session.
///
/// POST /admin/logout
async fn logout(session: Session) -> impl IntoResponse {
    if let Err(e) = clear_current_admin(&session).await {
        tracing::warn!(error = %e, "Failed to clear admin session");
    }
    sentry::configure_scope(|scope| scope.set_user(None));

    Redirect::to("/admin/login")
}
