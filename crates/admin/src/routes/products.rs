//! Facade management route handlers.

use askama::Template;
use axum::{
    Form, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use facade_shop_core::catalog::{CatalogError, FacadeDraft};
use facade_shop_core::{
    Catalog, CatalogQuery, CategoryId, Coating, Color, Facade, FacadeId, Material,
};

use crate::{
    components::{DataTableConfig, data_table::products_table_config},
    error::{AppError, Result},
    filters,
    middleware::RequireAdminAuth,
    models::Flash,
    state::AppState,
};

use super::{redirect_with, render};

const PRODUCTS_PATH: &str = "/admin/products";

/// Build the products router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/products", get(index).post(create))
        .route("/products/new", get(new_product))
        .route("/products/{id}", post(update))
        .route("/products/{id}/edit", get(edit))
        .route("/products/{id}/delete", post(delete))
        .route("/products/{id}/featured", post(toggle_featured))
        .route("/products/{id}/stock", post(toggle_in_stock))
}

/// List filters. Empty values mean "no filter".
#[derive(Debug, Default, Deserialize)]
pub struct ProductsQuery {
    pub q: Option<String>,
    pub category: Option<String>,
}

impl ProductsQuery {
    fn search(&self) -> Option<&str> {
        self.q.as_deref().map(str::trim).filter(|q| !q.is_empty())
    }

    fn category(&self) -> Option<&str> {
        self.category.as_deref().filter(|c| !c.is_empty())
    }

    fn to_catalog_query(&self) -> CatalogQuery {
        CatalogQuery {
            category: self.category().map(ToString::to_string),
            q: self.search().map(ToString::to_string),
            ..CatalogQuery::default()
        }
    }
}

/// One row of the products table.
#[derive(Debug, Clone)]
pub struct ProductRow {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub category: String,
    pub material: &'static str,
    pub price: String,
    pub in_stock: bool,
    pub featured: bool,
}

impl ProductRow {
    fn new(catalog: &Catalog, facade: &Facade) -> Self {
        Self {
            id: facade.id.as_i32(),
            name: facade.name.clone(),
            slug: facade.slug.clone(),
            category: catalog
                .category(facade.category_id)
                .map(|c| c.name.clone())
                .unwrap_or_default(),
            material: facade.material.label(),
            price: facade.price_per_sqm.display(),
            in_stock: facade.in_stock,
            featured: facade.featured,
        }
    }
}

/// Products list page template.
#[derive(Template)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub current_path: &'static str,
    pub flash: Option<Flash>,
    pub table: DataTableConfig,
    pub products: Vec<ProductRow>,
    pub total: usize,
}

/// Raw facade form as submitted.
///
/// Coatings and colors are checkbox groups, so the body is read as ordered
/// key/value pairs rather than a struct.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductForm {
    pub name: String,
    pub slug: String,
    pub category_id: String,
    pub material: String,
    pub coatings: Vec<String>,
    pub colors: Vec<String>,
    pub thickness_mm: String,
    pub price_per_sqm: String,
    pub in_stock: bool,
    pub featured: bool,
    pub image: String,
    pub description: String,
}

impl ProductForm {
    /// Collect the submitted fields. Unknown keys are ignored.
    #[must_use]
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut form = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "name" => form.name = value,
                "slug" => form.slug = value.trim().to_string(),
                "category_id" => form.category_id = value,
                "material" => form.material = value,
                "coatings" => form.coatings.push(value),
                "colors" => form.colors.push(value),
                "thickness_mm" => form.thickness_mm = value,
                "price_per_sqm" => form.price_per_sqm = value,
                "in_stock" => form.in_stock = true,
                "featured" => form.featured = true,
                "image" => form.image = value.trim().to_string(),
                "description" => form.description = value,
                _ => {}
            }
        }
        form
    }

    /// Prefill the form from an existing facade.
    #[must_use]
    pub fn from_facade(facade: &Facade) -> Self {
        Self {
            name: facade.name.clone(),
            slug: facade.slug.clone(),
            category_id: facade.category_id.to_string(),
            material: facade.material.slug().to_string(),
            coatings: facade.coatings.iter().map(|c| c.slug().to_string()).collect(),
            colors: facade.colors.iter().map(|c| c.slug().to_string()).collect(),
            thickness_mm: facade.thickness_mm.to_string(),
            price_per_sqm: facade.price_per_sqm.amount.to_string(),
            in_stock: facade.in_stock,
            featured: facade.featured,
            image: facade.image.clone(),
            description: facade.description.clone(),
        }
    }

    /// Parse the typed fields. Business rules are checked by the catalog.
    ///
    /// # Errors
    ///
    /// Returns a message naming the first field that does not parse.
    pub fn to_draft(&self) -> std::result::Result<FacadeDraft, String> {
        let category_id = self
            .category_id
            .parse::<CategoryId>()
            .map_err(|_| "Выберите категорию".to_string())?;
        let material = self
            .material
            .parse::<Material>()
            .map_err(|_| "Выберите материал".to_string())?;
        let coatings = self
            .coatings
            .iter()
            .map(|c| c.parse::<Coating>())
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| format!("Покрытие: {e}"))?;
        let colors = self
            .colors
            .iter()
            .map(|c| c.parse::<Color>())
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| format!("Цвет: {e}"))?;
        let thickness_mm = self
            .thickness_mm
            .trim()
            .parse::<u16>()
            .map_err(|_| "Толщина должна быть целым числом миллиметров".to_string())?;
        let price_per_sqm = self
            .price_per_sqm
            .trim()
            .replace(',', ".")
            .parse::<Decimal>()
            .map_err(|_| "Цена за м² должна быть числом".to_string())?;

        Ok(FacadeDraft {
            name: self.name.clone(),
            slug: self.slug.clone(),
            category_id,
            material,
            coatings,
            colors,
            thickness_mm,
            price_per_sqm,
            in_stock: self.in_stock,
            featured: self.featured,
            image: self.image.clone(),
            description: self.description.trim().to_string(),
        })
    }
}

/// A select option or checkbox on the facade form.
#[derive(Debug, Clone)]
pub struct ChoiceView {
    pub value: String,
    pub label: String,
    pub checked: bool,
}

/// A color checkbox with its swatch.
#[derive(Debug, Clone)]
pub struct ColorChoiceView {
    pub value: &'static str,
    pub label: &'static str,
    pub hex: &'static str,
    pub checked: bool,
}

/// Facade create/edit form template.
#[derive(Template)]
#[template(path = "products/form.html")]
pub struct ProductFormTemplate {
    pub current_path: &'static str,
    pub flash: Option<Flash>,
    pub heading: String,
    pub action: String,
    pub error: Option<String>,
    pub form: ProductForm,
    pub categories: Vec<ChoiceView>,
    pub materials: Vec<ChoiceView>,
    pub coatings: Vec<ChoiceView>,
    pub colors: Vec<ColorChoiceView>,
}

impl ProductFormTemplate {
    fn new(catalog: &Catalog, heading: String, action: String, form: ProductForm) -> Self {
        let categories = catalog
            .categories()
            .iter()
            .map(|c| ChoiceView {
                value: c.id.to_string(),
                label: c.name.clone(),
                checked: form.category_id == c.id.to_string(),
            })
            .collect();
        let materials = Material::ALL
            .iter()
            .map(|m| ChoiceView {
                value: m.slug().to_string(),
                label: m.label().to_string(),
                checked: form.material == m.slug(),
            })
            .collect();
        let coatings = Coating::ALL
            .iter()
            .map(|c| ChoiceView {
                value: c.slug().to_string(),
                label: c.label().to_string(),
                checked: form.coatings.iter().any(|v| v == c.slug()),
            })
            .collect();
        let colors = Color::ALL
            .iter()
            .map(|c| ColorChoiceView {
                value: c.slug(),
                label: c.label(),
                hex: c.hex(),
                checked: form.colors.iter().any(|v| v == c.slug()),
            })
            .collect();

        Self {
            current_path: PRODUCTS_PATH,
            flash: None,
            heading,
            action,
            error: None,
            form,
            categories,
            materials,
            coatings,
            colors,
        }
    }

    fn with_error(mut self, error: String) -> Self {
        self.error = Some(error);
        self
    }
}

/// Re-render the form with a validation message.
fn rejected(template: ProductFormTemplate, error: String) -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        render(&template.with_error(error)),
    )
        .into_response()
}

/// Products list page handler.
#[instrument(skip(state, session))]
pub async fn index(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<ProductsQuery>,
) -> Result<Html<String>> {
    let flash = Flash::take(&session).await?;
    let catalog = state.catalog().read().await;

    let products: Vec<ProductRow> = catalog
        .search(&query.to_catalog_query())
        .into_iter()
        .map(|facade| ProductRow::new(&catalog, facade))
        .collect();

    let template = ProductsIndexTemplate {
        current_path: PRODUCTS_PATH,
        flash,
        table: products_table_config(catalog.categories(), query.search(), query.category()),
        total: catalog.facades().len(),
        products,
    };
    drop(catalog);

    Ok(render(&template))
}

/// New facade form handler.
#[instrument(skip_all)]
pub async fn new_product(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Html<String> {
    let catalog = state.catalog().read().await;
    let form = ProductForm {
        in_stock: true,
        ..ProductForm::default()
    };
    render(&ProductFormTemplate::new(
        &catalog,
        "Новый фасад".to_string(),
        PRODUCTS_PATH.to_string(),
        form,
    ))
}

/// Create facade handler.
#[instrument(skip(state, session, pairs))]
pub async fn create(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response> {
    let form = ProductForm::from_pairs(pairs);
    let mut catalog = state.catalog().write().await;

    let result = form
        .to_draft()
        .and_then(|draft| catalog.insert_facade(draft).map_err(|e| e.to_string()));

    match result {
        Ok(id) => {
            drop(catalog);
            tracing::info!(facade_id = %id, slug = %form.slug, "Facade created");
            let flash = Flash::success(format!("Фасад «{}» добавлен", form.name.trim()));
            Ok(redirect_with(&session, flash, PRODUCTS_PATH)
                .await?
                .into_response())
        }
        Err(error) => {
            let template = ProductFormTemplate::new(
                &catalog,
                "Новый фасад".to_string(),
                PRODUCTS_PATH.to_string(),
                form,
            );
            drop(catalog);
            Ok(rejected(template, error))
        }
    }
}

/// Edit facade form handler.
#[instrument(skip(state))]
pub async fn edit(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<FacadeId>,
) -> Result<Html<String>> {
    let catalog = state.catalog().read().await;
    let facade = catalog
        .facade(id)
        .ok_or(AppError::Catalog(CatalogError::FacadeNotFound(id)))?;

    let template = ProductFormTemplate::new(
        &catalog,
        format!("Редактирование: {}", facade.name),
        format!("{PRODUCTS_PATH}/{id}"),
        ProductForm::from_facade(facade),
    );
    drop(catalog);

    Ok(render(&template))
}

/// Update facade handler.
#[instrument(skip(state, session, pairs))]
pub async fn update(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<FacadeId>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response> {
    let form = ProductForm::from_pairs(pairs);
    let mut catalog = state.catalog().write().await;
    if catalog.facade(id).is_none() {
        return Err(CatalogError::FacadeNotFound(id).into());
    }

    let result = form
        .to_draft()
        .and_then(|draft| catalog.update_facade(id, draft).map_err(|e| e.to_string()));

    match result {
        Ok(()) => {
            drop(catalog);
            tracing::info!(facade_id = %id, "Facade updated");
            let flash = Flash::success(format!("Фасад «{}» сохранён", form.name.trim()));
            Ok(redirect_with(&session, flash, PRODUCTS_PATH)
                .await?
                .into_response())
        }
        Err(error) => {
            let template = ProductFormTemplate::new(
                &catalog,
                format!("Редактирование: {}", form.name),
                format!("{PRODUCTS_PATH}/{id}"),
                form,
            );
            drop(catalog);
            Ok(rejected(template, error))
        }
    }
}

/// Delete facade handler.
#[instrument(skip(state, session))]
pub async fn delete(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<FacadeId>,
) -> Result<Redirect> {
    let removed = state.catalog().write().await.remove_facade(id)?;
    tracing::info!(facade_id = %id, slug = %removed.slug, "Facade deleted");

    redirect_with(
        &session,
        Flash::success(format!("Фасад «{}» удалён", removed.name)),
        PRODUCTS_PATH,
    )
    .await
}

/// Toggle the featured flag.
#[instrument(skip(state, session))]
pub async fn toggle_featured(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<FacadeId>,
) -> Result<Redirect> {
    let featured = state.catalog().write().await.toggle_featured(id)?;
    tracing::info!(facade_id = %id, featured, "Facade featured flag changed");

    let message = if featured {
        "Фасад показан на главной"
    } else {
        "Фасад убран с главной"
    };
    redirect_with(&session, Flash::success(message), PRODUCTS_PATH).await
}

/// Toggle the in-stock flag.
#[instrument(skip(state, session))]
pub async fn toggle_in_stock(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<FacadeId>,
) -> Result<Redirect> {
    let in_stock = state.catalog().write().await.toggle_in_stock(id)?;
    tracing::info!(facade_id = %id, in_stock, "Facade stock flag changed");

    let message = if in_stock {
        "Фасад в наличии"
    } else {
        "Фасад под заказ"
    };
    redirect_with(&session, Flash::success(message), PRODUCTS_PATH).await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_form_collects_checkbox_groups() {
        let form = ProductForm::from_pairs(pairs(&[
            ("name", "Прага"),
            ("slug", "praga"),
            ("category_id", "1"),
            ("material", "mdf"),
            ("coatings", "matte"),
            ("coatings", "glossy"),
            ("colors", "white"),
            ("thickness_mm", "19"),
            ("price_per_sqm", "5400,50"),
            ("in_stock", "on"),
        ]));
        assert_eq!(form.coatings, vec!["matte", "glossy"]);
        assert!(form.in_stock);
        assert!(!form.featured);

        let draft = form.to_draft().unwrap();
        assert_eq!(draft.coatings, vec![Coating::Matte, Coating::Glossy]);
        assert_eq!(draft.price_per_sqm, Decimal::new(540_050, 2));
        assert_eq!(draft.category_id, CategoryId::new(1));
    }

    #[test]
    fn test_form_reports_unparsable_fields() {
        let mut form = ProductForm::from_pairs(pairs(&[
            ("category_id", "1"),
            ("material", "mdf"),
            ("thickness_mm", "толстый"),
            ("price_per_sqm", "100"),
        ]));
        assert!(form.to_draft().unwrap_err().contains("Толщина"));

        form.material = "granite".to_string();
        assert!(form.to_draft().unwrap_err().contains("материал"));
    }

    #[test]
    fn test_form_roundtrips_existing_facade() {
        let catalog = Catalog::seed();
        let facade = catalog.facade(FacadeId::new(1)).unwrap();
        let draft = ProductForm::from_facade(facade).to_draft().unwrap();
        assert_eq!(draft.slug, facade.slug);
        assert_eq!(draft.colors, facade.colors);
        assert_eq!(draft.price_per_sqm, facade.price_per_sqm.amount);
    }

    #[test]
    fn test_products_query_ignores_empty_values() {
        let query = ProductsQuery {
            q: Some("  ".to_string()),
            category: Some(String::new()),
        };
        assert_eq!(query.to_catalog_query(), CatalogQuery::default());
    }
}
