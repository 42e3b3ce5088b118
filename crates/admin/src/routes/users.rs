//! Registered user management.

use askama::Template;
use axum::{
    Form, Router,
    extract::{Path, State},
    response::{Html, Redirect},
    routing::{get, post},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use facade_shop_core::{UserAccount, UserId, UserRole};

use crate::{
    components::{DataTableConfig, data_table::users_table_config},
    error::{AppError, Result},
    filters,
    middleware::RequireAdminAuth,
    models::Flash,
    state::AppState,
};

use super::{redirect_with, render};

const USERS_PATH: &str = "/admin/users";

/// Build the users router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(index))
        .route("/users/{id}/role", post(change_role))
        .route("/users/{id}/block", post(toggle_blocked))
}

const fn role_label(role: UserRole) -> &'static str {
    match role {
        UserRole::Customer => "Покупатель",
        UserRole::Manager => "Менеджер",
        UserRole::Admin => "Администратор",
    }
}

#[derive(Debug, Clone)]
pub struct RoleOption {
    pub value: String,
    pub label: &'static str,
    pub selected: bool,
}

#[derive(Debug, Clone)]
pub struct UserRow {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub registered: String,
    pub roles: Vec<RoleOption>,
    pub blocked: bool,
}

impl From<&UserAccount> for UserRow {
    fn from(user: &UserAccount) -> Self {
        Self {
            id: user.id.as_i32(),
            name: user.name.clone(),
            email: user.email.to_string(),
            registered: user.registered_at.format("%d.%m.%Y").to_string(),
            roles: UserRole::ALL
                .iter()
                .map(|role| RoleOption {
                    value: role.to_string(),
                    label: role_label(*role),
                    selected: *role == user.role,
                })
                .collect(),
            blocked: user.blocked,
        }
    }
}

#[derive(Template)]
#[template(path = "users/index.html")]
pub struct UsersTemplate {
    pub current_path: &'static str,
    pub flash: Option<Flash>,
    pub table: DataTableConfig,
    pub users: Vec<UserRow>,
}

#[derive(Debug, Deserialize)]
pub struct RoleForm {
    pub role: String,
}

fn not_found(id: UserId) -> AppError {
    AppError::NotFound(format!("user {id}"))
}

#[instrument(skip_all)]
pub async fn index(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
) -> Result<Html<String>> {
    let flash = Flash::take(&session).await?;
    let users = state.users().read().await.iter().map(UserRow::from).collect();

    Ok(render(&UsersTemplate {
        current_path: USERS_PATH,
        flash,
        table: users_table_config(),
        users,
    }))
}

#[instrument(skip(state, session))]
pub async fn change_role(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<UserId>,
    Form(form): Form<RoleForm>,
) -> Result<Redirect> {
    let role: UserRole = form.role.parse().map_err(AppError::BadRequest)?;

    let name = {
        let mut users = state.users().write().await;
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| not_found(id))?;
        user.role = role;
        user.name.clone()
    };

    tracing::info!(user_id = %id, %role, "User role changed");
    redirect_with(
        &session,
        Flash::success(format!("{name}: роль «{}»", role_label(role))),
        USERS_PATH,
    )
    .await
}

#[instrument(skip(state, session))]
pub async fn toggle_blocked(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<UserId>,
) -> Result<Redirect> {
    let (name, blocked) = {
        let mut users = state.users().write().await;
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| not_found(id))?;
        user.blocked = !user.blocked;
        (user.name.clone(), user.blocked)
    };

    tracing::info!(user_id = %id, blocked, "User access changed");
    let message = if blocked {
        format!("{name} заблокирован")
    } else {
        format!("{name} разблокирован")
    };
    redirect_with(&session, Flash::success(message), USERS_PATH).await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use facade_shop_core::content::seed_users;

    use super::*;

    #[test]
    fn test_user_row_marks_current_role() {
        let users = seed_users();
        let manager = users.iter().find(|u| u.role == UserRole::Manager).unwrap();
        let row = UserRow::from(manager);
        let selected: Vec<_> = row.roles.iter().filter(|r| r.selected).collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected.first().unwrap().value, "manager");
    }
}
