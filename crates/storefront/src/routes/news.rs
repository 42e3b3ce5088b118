//! News list and articles.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use comrak::{Options, markdown_to_html};
use facade_shop_core::content::latest_news;
use facade_shop_core::{NewsArticle, NewsId};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::PageContext;
use crate::routes::home::NewsTeaser;
use crate::state::AppState;

/// News list template.
#[derive(Template, WebTemplate)]
#[template(path = "news/index.html")]
pub struct NewsIndexTemplate {
    pub page: PageContext,
    pub articles: Vec<NewsTeaser>,
}

/// Article template.
#[derive(Template, WebTemplate)]
#[template(path = "news/show.html")]
pub struct NewsShowTemplate {
    pub page: PageContext,
    pub title: String,
    pub date: String,
    /// Rendered from markdown; raw HTML in the source is escaped.
    pub body_html: String,
}

/// Render an article body. comrak's defaults escape raw HTML.
fn render_body(article: &NewsArticle) -> String {
    markdown_to_html(&article.body, &Options::default())
}

/// Display all articles, newest first.
#[instrument(skip_all)]
pub async fn index(State(state): State<AppState>, page: PageContext) -> impl IntoResponse {
    let news = state.news();
    NewsIndexTemplate {
        page,
        articles: latest_news(news, news.len())
            .into_iter()
            .map(NewsTeaser::from)
            .collect(),
    }
}

/// Display one article.
///
/// # Errors
///
/// Returns 404 for an unknown ID.
#[instrument(skip(state, page))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<NewsId>,
    page: PageContext,
) -> Result<impl IntoResponse> {
    let article = state
        .news()
        .iter()
        .find(|article| article.id == id)
        .ok_or_else(|| AppError::NotFound(format!("news {id}")))?;

    Ok(NewsShowTemplate {
        page,
        title: article.title.clone(),
        date: article.published_on.format("%d.%m.%Y").to_string(),
        body_html: render_body(article),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use facade_shop_core::content::seed_news;

    use super::*;

    #[test]
    fn test_render_body() {
        let mut article = seed_news().into_iter().next().unwrap();
        article.body = "**Новинка**\n\n<script>alert(1)</script>".to_string();
        let html = render_body(&article);
        assert!(html.contains("<strong>Новинка</strong>"));
        assert!(!html.contains("<script>"));
    }
}
