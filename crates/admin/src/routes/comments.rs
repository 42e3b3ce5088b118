//! Product comment moderation.

use askama::Template;
use axum::{
    Router,
    extract::{Path, Query, State},
    response::{Html, Redirect},
    routing::{get, post},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use facade_shop_core::{Catalog, Comment, CommentId};

use crate::{
    components::{DataTableConfig, data_table::comments_table_config},
    error::{AppError, Result},
    filters,
    middleware::RequireAdminAuth,
    models::Flash,
    state::AppState,
};

use super::{redirect_with, render};

const COMMENTS_PATH: &str = "/admin/comments";

/// Build the comments router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/comments", get(index))
        .route("/comments/{id}/approve", post(approve))
        .route("/comments/{id}/delete", post(delete))
}

#[derive(Debug, Default, Deserialize)]
pub struct CommentsQuery {
    pub show: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CommentRow {
    pub id: i32,
    pub author: String,
    pub facade: String,
    pub facade_id: i32,
    pub text: String,
    pub rating: u8,
    pub created: String,
    pub approved: bool,
}

impl CommentRow {
    fn new(catalog: &Catalog, comment: &Comment) -> Self {
        Self {
            id: comment.id.as_i32(),
            author: comment.author.clone(),
            facade: catalog
                .facade(comment.facade_id)
                .map_or_else(|| "(удалён)".to_string(), |f| f.name.clone()),
            facade_id: comment.facade_id.as_i32(),
            text: comment.text.clone(),
            rating: comment.rating,
            created: comment.created_at.format("%d.%m.%Y").to_string(),
            approved: comment.approved,
        }
    }
}

#[derive(Template)]
#[template(path = "comments/index.html")]
pub struct CommentsTemplate {
    pub current_path: &'static str,
    pub flash: Option<Flash>,
    pub table: DataTableConfig,
    pub comments: Vec<CommentRow>,
    pub pending: usize,
}

#[instrument(skip(state, session))]
pub async fn index(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<CommentsQuery>,
) -> Result<Html<String>> {
    let flash = Flash::take(&session).await?;
    let pending_only = query.show.as_deref() == Some("pending");

    let catalog = state.catalog().read().await;
    let comments = state.comments().read().await;
    let mut visible: Vec<&Comment> = comments
        .iter()
        .filter(|c| !pending_only || !c.approved)
        .collect();
    // Unapproved first, newest first within each group
    visible.sort_by(|a, b| {
        a.approved
            .cmp(&b.approved)
            .then_with(|| b.created_at.cmp(&a.created_at))
    });

    let template = CommentsTemplate {
        current_path: COMMENTS_PATH,
        flash,
        table: comments_table_config(pending_only),
        comments: visible
            .into_iter()
            .map(|c| CommentRow::new(&catalog, c))
            .collect(),
        pending: comments.iter().filter(|c| !c.approved).count(),
    };
    drop(comments);
    drop(catalog);

    Ok(render(&template))
}

#[instrument(skip(state, session))]
pub async fn approve(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<CommentId>,
) -> Result<Redirect> {
    {
        let mut comments = state.comments().write().await;
        let comment = comments
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| AppError::NotFound(format!("comment {id}")))?;
        comment.approved = true;
    }

    tracing::info!(comment_id = %id, "Comment approved");
    redirect_with(&session, Flash::success("Отзыв опубликован"), COMMENTS_PATH).await
}

#[instrument(skip(state, session))]
pub async fn delete(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<CommentId>,
) -> Result<Redirect> {
    {
        let mut comments = state.comments().write().await;
        let before = comments.len();
        comments.retain(|c| c.id != id);
        if comments.len() == before {
            return Err(AppError::NotFound(format!("comment {id}")));
        }
    }

    tracing::info!(comment_id = %id, "Comment deleted");
    redirect_with(&session, Flash::success("Отзыв удалён"), COMMENTS_PATH).await
}
