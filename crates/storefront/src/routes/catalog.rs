//! Catalog listing with filters and sorting.

use std::collections::HashSet;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use facade_shop_core::{CatalogQuery, Coating, Color, FacadeId, Material, SortOrder};
use tracing::instrument;

use crate::filters;
use crate::middleware::{CurrentShopper, PageContext};
use crate::state::AppState;
use crate::views::{FacadeCard, OptionView, SwatchView};

/// Values echoed back into the filter form.
pub struct FilterForm {
    pub categories: Vec<OptionView>,
    pub materials: Vec<OptionView>,
    pub coatings: Vec<OptionView>,
    pub colors: Vec<SwatchView>,
    pub sorts: Vec<OptionView>,
    pub in_stock: bool,
    pub min_price: String,
    pub max_price: String,
    pub q: String,
}

impl FilterForm {
    fn new(state: &AppState, query: &CatalogQuery) -> Self {
        let sort = query.sort.unwrap_or_default();
        Self {
            categories: state
                .catalog()
                .categories()
                .iter()
                .map(|c| {
                    OptionView::new(
                        c.slug.clone(),
                        c.name.clone(),
                        query.category.as_deref() == Some(c.slug.as_str()),
                    )
                })
                .collect(),
            materials: Material::ALL
                .iter()
                .map(|m| OptionView::new(m.slug(), m.label(), query.material == Some(*m)))
                .collect(),
            coatings: Coating::ALL
                .iter()
                .map(|c| OptionView::new(c.slug(), c.label(), query.coating == Some(*c)))
                .collect(),
            colors: Color::ALL
                .iter()
                .map(|c| SwatchView::new(*c, query.color == Some(*c)))
                .collect(),
            sorts: SortOrder::ALL
                .iter()
                .map(|s| OptionView::new(s.slug(), s.label(), sort == *s))
                .collect(),
            in_stock: query.in_stock,
            min_price: query.min_price.map(|p| p.to_string()).unwrap_or_default(),
            max_price: query.max_price.map(|p| p.to_string()).unwrap_or_default(),
            q: query.q.clone().unwrap_or_default(),
        }
    }
}

/// Catalog page template.
#[derive(Template, WebTemplate)]
#[template(path = "catalog.html")]
pub struct CatalogTemplate {
    pub page: PageContext,
    pub title: String,
    pub facades: Vec<FacadeCard>,
    pub form: FilterForm,
    pub filtered: bool,
}

/// Display the catalog.
#[instrument(skip(state, shopper, page))]
pub async fn index(
    State(state): State<AppState>,
    CurrentShopper(shopper): CurrentShopper,
    page: PageContext,
    Query(query): Query<CatalogQuery>,
) -> impl IntoResponse {
    let catalog = state.catalog();
    let favorites: HashSet<FacadeId> =
        shopper.with_favorites(|favorites| favorites.items().iter().map(|item| item.id).collect());

    let title = query
        .category
        .as_deref()
        .and_then(|slug| catalog.category_by_slug(slug))
        .map_or_else(|| "Каталог фасадов".to_string(), |c| c.name.clone());

    let facades = FacadeCard::list(catalog, catalog.search(&query), &favorites);
    tracing::debug!(results = facades.len(), "Catalog search");

    CatalogTemplate {
        page,
        title,
        facades,
        form: FilterForm::new(&state, &query),
        filtered: query.is_filtered(),
    }
}
