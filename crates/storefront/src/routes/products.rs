//! Product page and price quotes.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use facade_shop_core::content::approved_comments;
use facade_shop_core::pricing::{SIZE_PRESETS, STANDARD_PRESET};
use facade_shop_core::{Comment, Dimensions, FacadeId, calculate_price};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::{CurrentShopper, PageContext};
use crate::state::AppState;
use crate::views::{OptionView, SwatchView, per_sqm};

/// Calculator input, from the quote endpoint or the product page's own form.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct QuoteParams {
    pub width: u32,
    pub height: u32,
    pub quantity: Option<u32>,
}

/// Body of `GET /product/{id}/quote`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteResponse {
    pub area_sqm: String,
    pub price: String,
    pub display: String,
}

/// Optional calculator values on the product page.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct CalculatorQuery {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub quantity: Option<u32>,
}

/// A size preset button.
#[derive(Clone)]
pub struct PresetView {
    pub name: &'static str,
    pub width: u32,
    pub height: u32,
}

/// An approved review.
#[derive(Clone)]
pub struct CommentView {
    pub author: String,
    pub text: String,
    pub stars: String,
    pub date: String,
}

impl From<&Comment> for CommentView {
    fn from(comment: &Comment) -> Self {
        let filled = usize::from(comment.rating.min(5));
        Self {
            author: comment.author.clone(),
            text: comment.text.clone(),
            stars: format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled)),
            date: comment.created_at.format("%d.%m.%Y").to_string(),
        }
    }
}

/// Everything the product page shows about the facade.
pub struct FacadeDetail {
    pub id: i32,
    pub name: String,
    pub image: String,
    pub description: String,
    pub category: String,
    pub category_slug: String,
    pub material: &'static str,
    pub thickness_mm: u16,
    pub price: String,
    pub rating: String,
    pub reviews: u32,
    pub in_stock: bool,
}

/// Product page template.
#[derive(Template, WebTemplate)]
#[template(path = "product.html")]
pub struct ProductTemplate {
    pub page: PageContext,
    pub facade: FacadeDetail,
    pub presets: Vec<PresetView>,
    pub coatings: Vec<OptionView>,
    pub colors: Vec<SwatchView>,
    pub comments: Vec<CommentView>,
    pub is_favorite: bool,
    pub width: u32,
    pub height: u32,
    pub quantity: u32,
    /// Calculated price for the size above, or the reason it can't be made.
    pub quote: std::result::Result<String, String>,
}

/// Display a facade.
#[instrument(skip(state, shopper, page))]
pub async fn show(
    State(state): State<AppState>,
    CurrentShopper(shopper): CurrentShopper,
    page: PageContext,
    Path(id): Path<FacadeId>,
    Query(calculator): Query<CalculatorQuery>,
) -> Result<impl IntoResponse> {
    let catalog = state.catalog();
    let facade = catalog
        .facade(id)
        .ok_or_else(|| AppError::NotFound(format!("facade {id}")))?;
    let category = catalog.category(facade.category_id);

    let width = calculator.width.unwrap_or(STANDARD_PRESET.width_mm);
    let height = calculator.height.unwrap_or(STANDARD_PRESET.height_mm);
    let quantity = calculator.quantity.unwrap_or(1);
    let quote = Dimensions::new(width, height)
        .and_then(|dimensions| calculate_price(facade, dimensions, quantity))
        .map(|price| price.display())
        .map_err(|e| e.to_string());

    Ok(ProductTemplate {
        page,
        facade: FacadeDetail {
            id: facade.id.as_i32(),
            name: facade.name.clone(),
            image: facade.image.clone(),
            description: facade.description.clone(),
            category: category.map(|c| c.name.clone()).unwrap_or_default(),
            category_slug: category.map(|c| c.slug.clone()).unwrap_or_default(),
            material: facade.material.label(),
            thickness_mm: facade.thickness_mm,
            price: per_sqm(facade),
            rating: facade.rating.score.to_string(),
            reviews: facade.rating.reviews,
            in_stock: facade.in_stock,
        },
        presets: SIZE_PRESETS
            .iter()
            .map(|preset| PresetView {
                name: preset.name,
                width: preset.width_mm,
                height: preset.height_mm,
            })
            .collect(),
        coatings: facade
            .coatings
            .iter()
            .enumerate()
            .map(|(i, c)| OptionView::new(c.slug(), c.label(), i == 0))
            .collect(),
        colors: facade
            .colors
            .iter()
            .enumerate()
            .map(|(i, c)| SwatchView::new(*c, i == 0))
            .collect(),
        comments: approved_comments(state.comments(), id)
            .into_iter()
            .map(CommentView::from)
            .collect(),
        is_favorite: shopper.with_favorites(|favorites| favorites.is_favorite(id)),
        width,
        height,
        quantity,
        quote,
    })
}

/// Price a facade at a given size and quantity.
#[instrument(skip(state))]
pub async fn quote(
    State(state): State<AppState>,
    Path(id): Path<FacadeId>,
    Query(params): Query<QuoteParams>,
) -> Result<Json<QuoteResponse>> {
    let facade = state
        .catalog()
        .facade(id)
        .ok_or_else(|| AppError::NotFound(format!("facade {id}")))?;
    let dimensions = Dimensions::new(params.width, params.height)?;
    let price = calculate_price(facade, dimensions, params.quantity.unwrap_or(1))?;

    Ok(Json(QuoteResponse {
        area_sqm: dimensions.area_sqm().to_string(),
        price: price.amount.to_string(),
        display: price.display(),
    }))
}
