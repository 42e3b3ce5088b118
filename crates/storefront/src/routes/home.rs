//! Home page route handler.

use std::collections::HashSet;

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use facade_shop_core::content::latest_news;
use facade_shop_core::{FacadeId, NewsArticle};
use tracing::instrument;

use crate::filters;
use crate::middleware::{CurrentShopper, PageContext};
use crate::state::AppState;
use crate::views::FacadeCard;

/// News on the home page.
const HOME_NEWS: usize = 3;

/// A category tile.
#[derive(Clone)]
pub struct CategoryTile {
    pub slug: String,
    pub name: String,
    pub description: String,
    pub count: usize,
}

/// A news teaser.
#[derive(Clone)]
pub struct NewsTeaser {
    pub id: i32,
    pub title: String,
    pub summary: String,
    pub date: String,
}

impl From<&NewsArticle> for NewsTeaser {
    fn from(article: &NewsArticle) -> Self {
        Self {
            id: article.id.as_i32(),
            title: article.title.clone(),
            summary: article.summary.clone(),
            date: article.published_on.format("%d.%m.%Y").to_string(),
        }
    }
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub page: PageContext,
    pub featured: Vec<FacadeCard>,
    pub categories: Vec<CategoryTile>,
    pub news: Vec<NewsTeaser>,
}

/// Display the home page.
#[instrument(skip_all)]
pub async fn home(
    State(state): State<AppState>,
    CurrentShopper(shopper): CurrentShopper,
    page: PageContext,
) -> impl IntoResponse {
    let catalog = state.catalog();
    let favorites: HashSet<FacadeId> =
        shopper.with_favorites(|favorites| favorites.items().iter().map(|item| item.id).collect());

    let categories = catalog
        .categories()
        .iter()
        .map(|category| CategoryTile {
            slug: category.slug.clone(),
            name: category.name.clone(),
            description: category.description.clone(),
            count: catalog.count_in_category(category.id),
        })
        .collect();

    HomeTemplate {
        page,
        featured: FacadeCard::list(catalog, catalog.featured(), &favorites),
        categories,
        news: latest_news(state.news(), HOME_NEWS)
            .into_iter()
            .map(NewsTeaser::from)
            .collect(),
    }
}
