//! Authentication route handlers.
//!
//! Handles login, registration and logout against the in-memory user
//! directory. Failures come back to the form as notices.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{Result, clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::middleware::{PageContext, clear_current_user, set_current_user};
use crate::models::Notice;
use crate::services::auth::AuthError;
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Registration form data.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub page: PageContext,
}

/// Register page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub page: PageContext,
}

// =============================================================================
// Login Routes
// =============================================================================

/// Display the login page. Logged-in users go straight to their account.
pub async fn login_page(page: PageContext) -> axum::response::Response {
    if page.user.is_some() {
        return Redirect::to("/account").into_response();
    }
    LoginTemplate { page }.into_response()
}

/// Handle login form submission.
#[instrument(skip(state, session, form), fields(email = %form.email))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Redirect> {
    match state.users().login(&form.email, &form.password).await {
        Ok(user) => {
            set_current_user(&session, &user).await?;
            set_sentry_user(&user.id, Some(user.email.as_str()));
            tracing::info!(user_id = %user.id, "User logged in");
            Ok(Redirect::to("/account"))
        }
        Err(AuthError::InvalidCredentials) => {
            tracing::warn!("Login failed");
            Notice::destructive("Не удалось войти", "Неверный email или пароль")
                .push(&session)
                .await?;
            Ok(Redirect::to("/login"))
        }
        Err(e) => Err(e.into()),
    }
}

// =============================================================================
// Registration Routes
// =============================================================================

/// Display the registration page.
pub async fn register_page(page: PageContext) -> axum::response::Response {
    if page.user.is_some() {
        return Redirect::to("/account").into_response();
    }
    RegisterTemplate { page }.into_response()
}

/// Handle registration form submission. A new account is logged in at once.
#[instrument(skip(state, session, form), fields(email = %form.email))]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> Result<Redirect> {
    if form.password != form.password_confirm {
        Notice::destructive("Регистрация не выполнена", "Пароли не совпадают")
            .push(&session)
            .await?;
        return Ok(Redirect::to("/register"));
    }

    match state
        .users()
        .register(&form.name, &form.email, &form.password)
        .await
    {
        Ok(user) => {
            set_current_user(&session, &user).await?;
            set_sentry_user(&user.id, Some(user.email.as_str()));
            Notice::normal("Добро пожаловать", user.name)
                .push(&session)
                .await?;
            Ok(Redirect::to("/account"))
        }
        Err(AuthError::PasswordHash) => Err(AuthError::PasswordHash.into()),
        Err(e) => {
            Notice::destructive("Регистрация не выполнена", register_message(&e))
                .push(&session)
                .await?;
            Ok(Redirect::to("/register"))
        }
    }
}

fn register_message(error: &AuthError) -> String {
    match error {
        AuthError::UserAlreadyExists => "Пользователь с таким email уже зарегистрирован".to_string(),
        AuthError::MissingName => "Укажите имя".to_string(),
        AuthError::InvalidEmail(_) => "Проверьте email".to_string(),
        AuthError::WeakPassword(reason) => reason.clone(),
        AuthError::InvalidCredentials | AuthError::PasswordHash => error.to_string(),
    }
}

// =============================================================================
// Logout
// =============================================================================

/// Log out. The cart and favorites stay with the browser session.
#[instrument(skip_all)]
pub async fn logout(session: Session) -> Result<Redirect> {
    clear_current_user(&session).await?;
    clear_sentry_user();
    Ok(Redirect::to("/"))
}
