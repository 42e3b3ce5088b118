//! Category management route handlers.

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

use facade_shop_core::catalog::CatalogError;
use facade_shop_core::CategoryId;

use crate::{
    components::{DataTableConfig, data_table::categories_table_config},
    error::Result,
    filters,
    middleware::RequireAdminAuth,
    models::Flash,
    state::AppState,
};

use super::{redirect_with, render};

const CATEGORIES_PATH: &str = "/admin/categories";

/// Build the categories router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/categories", get(index).post(create))
        .route("/categories/{id}", post(rename))
        .route("/categories/{id}/delete", post(delete))
}

#[derive(Debug, Clone)]
pub struct CategoryRow {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub facades: usize,
}

#[derive(Template)]
#[template(path = "categories/index.html")]
pub struct CategoriesTemplate {
    pub current_path: &'static str,
    pub flash: Option<Flash>,
    pub table: DataTableConfig,
    pub categories: Vec<CategoryRow>,
}

#[derive(Debug, Deserialize)]
pub struct NewCategoryForm {
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct RenameCategoryForm {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// User-facing reason a category change was refused.
fn describe(err: &CatalogError) -> String {
    match err {
        CatalogError::CategoryInUse { count, .. } => {
            format!("Категорию нельзя удалить: в ней фасадов: {count}")
        }
        CatalogError::DuplicateSlug(slug) => format!("Адрес «{slug}» уже занят"),
        other => other.to_string(),
    }
}

#[instrument(skip_all)]
pub async fn index(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
) -> Result<Html<String>> {
    let flash = Flash::take(&session).await?;
    let catalog = state.catalog().read().await;
    let categories = catalog
        .categories()
        .iter()
        .map(|c| CategoryRow {
            id: c.id.as_i32(),
            name: c.name.clone(),
            slug: c.slug.clone(),
            description: c.description.clone(),
            facades: catalog.count_in_category(c.id),
        })
        .collect();
    drop(catalog);

    Ok(render(&CategoriesTemplate {
        current_path: CATEGORIES_PATH,
        flash,
        table: categories_table_config(),
        categories,
    }))
}

#[instrument(skip(state, session))]
pub async fn create(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<NewCategoryForm>,
) -> Result<Redirect> {
    let slug = form.slug.trim();
    let result = state
        .catalog()
        .write()
        .await
        .insert_category(&form.name, slug, &form.description);

    let flash = match result {
        Ok(id) => {
            tracing::info!(category_id = %id, slug, "Category created");
            Flash::success(format!("Категория «{}» создана", form.name.trim()))
        }
        Err(err) => Flash::error(describe(&err)),
    };
    redirect_with(&session, flash, CATEGORIES_PATH).await
}

#[instrument(skip(state, session))]
pub async fn rename(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<CategoryId>,
    Form(form): Form<RenameCategoryForm>,
) -> Result<Redirect> {
    let result = state
        .catalog()
        .write()
        .await
        .rename_category(id, &form.name, &form.description);

    let flash = match result {
        Ok(()) => {
            tracing::info!(category_id = %id, "Category renamed");
            Flash::success("Категория сохранена")
        }
        Err(CatalogError::CategoryNotFound(id)) => {
            return Err(CatalogError::CategoryNotFound(id).into());
        }
        Err(err) => Flash::error(describe(&err)),
    };
    redirect_with(&session, flash, CATEGORIES_PATH).await
}

#[instrument(skip(state, session))]
pub async fn delete(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<CategoryId>,
) -> Result<Redirect> {
    let result = state.catalog().write().await.remove_category(id);

    let flash = match result {
        Ok(category) => {
            tracing::info!(category_id = %id, slug = %category.slug, "Category deleted");
            Flash::success(format!("Категория «{}» удалена", category.name))
        }
        Err(CatalogError::CategoryNotFound(id)) => {
            return Err(CatalogError::CategoryNotFound(id).into());
        }
        Err(err) => {
            tracing::warn!(category_id = %id, error = %err, "Category delete refused");
            Flash::error(describe(&err))
        }
    };
    redirect_with(&session, flash, CATEGORIES_PATH).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_in_use() {
        let message = describe(&CatalogError::CategoryInUse {
            id: CategoryId::new(1),
            count: 4,
        });
        assert!(message.contains('4'));
    }
}
