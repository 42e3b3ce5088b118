//! News article management.

use askama::Template;
use axum::{
    Form, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use facade_shop_core::content::NewsDraft;
use facade_shop_core::{NewsArticle, NewsId};

use crate::{
    components::{DataTableConfig, data_table::news_table_config},
    error::{AppError, Result},
    filters::{self, render_markdown},
    middleware::RequireAdminAuth,
    models::Flash,
    state::AppState,
};

use super::{redirect_with, render};

const NEWS_PATH: &str = "/admin/news";

/// Build the news router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/news", get(index).post(create))
        .route("/news/new", get(new_article))
        .route("/news/{id}", post(update))
        .route("/news/{id}/edit", get(edit))
        .route("/news/{id}/delete", post(delete))
}

/// Article form as submitted. The date input sends an empty string when unset.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewsForm {
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub published_on: String,
}

impl NewsForm {
    fn from_article(article: &NewsArticle) -> Self {
        Self {
            slug: article.slug.clone(),
            title: article.title.clone(),
            summary: article.summary.clone(),
            body: article.body.clone(),
            published_on: article.published_on.format("%Y-%m-%d").to_string(),
        }
    }

    /// Validate into an article with the given ID.
    ///
    /// # Errors
    ///
    /// Returns a message for a malformed date, a slug used by another
    /// article, or a missing title/body.
    fn into_article(
        self,
        id: NewsId,
        existing: &[NewsArticle],
        today: NaiveDate,
    ) -> std::result::Result<NewsArticle, String> {
        let published_on = match self.published_on.trim() {
            "" => None,
            date => Some(
                NaiveDate::parse_from_str(date, "%Y-%m-%d")
                    .map_err(|_| format!("Некорректная дата «{date}»"))?,
            ),
        };
        let slug = self.slug.trim();
        if existing.iter().any(|a| a.slug == slug && a.id != id) {
            return Err(format!("Адрес «{slug}» уже занят"));
        }

        NewsDraft {
            slug: self.slug,
            title: self.title,
            summary: self.summary,
            body: self.body,
            published_on,
        }
        .into_article(id, today)
        .map_err(|e| e.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct NewsRow {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub published: String,
}

#[derive(Template)]
#[template(path = "news/index.html")]
pub struct NewsIndexTemplate {
    pub current_path: &'static str,
    pub flash: Option<Flash>,
    pub table: DataTableConfig,
    pub articles: Vec<NewsRow>,
}

#[derive(Template)]
#[template(path = "news/form.html")]
pub struct NewsFormTemplate {
    pub current_path: &'static str,
    pub flash: Option<Flash>,
    pub heading: String,
    pub action: String,
    pub error: Option<String>,
    pub form: NewsForm,
    /// Rendered body, shown when editing.
    pub preview: Option<String>,
}

impl NewsFormTemplate {
    fn new(heading: String, action: String, form: NewsForm) -> Self {
        let preview = (!form.body.trim().is_empty()).then(|| render_markdown(&form.body));
        Self {
            current_path: NEWS_PATH,
            flash: None,
            heading,
            action,
            error: None,
            form,
            preview,
        }
    }
}

fn rejected(mut template: NewsFormTemplate, error: String) -> Response {
    template.error = Some(error);
    (StatusCode::UNPROCESSABLE_ENTITY, render(&template)).into_response()
}

#[instrument(skip_all)]
pub async fn index(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
) -> Result<Html<String>> {
    let flash = Flash::take(&session).await?;
    let articles: Vec<NewsRow> = {
        let news = state.news().read().await;
        let mut sorted: Vec<&NewsArticle> = news.iter().collect();
        sorted.sort_by(|a, b| b.published_on.cmp(&a.published_on));
        sorted
            .into_iter()
            .map(|a| NewsRow {
                id: a.id.as_i32(),
                title: a.title.clone(),
                slug: a.slug.clone(),
                published: a.published_on.format("%d.%m.%Y").to_string(),
            })
            .collect()
    };

    Ok(render(&NewsIndexTemplate {
        current_path: NEWS_PATH,
        flash,
        table: news_table_config(),
        articles,
    }))
}

#[instrument(skip_all)]
pub async fn new_article(RequireAdminAuth(_admin): RequireAdminAuth) -> Html<String> {
    render(&NewsFormTemplate::new(
        "Новая статья".to_string(),
        NEWS_PATH.to_string(),
        NewsForm::default(),
    ))
}

#[instrument(skip(state, session, form))]
pub async fn create(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<NewsForm>,
) -> Result<Response> {
    let today = Utc::now().date_naive();
    let result = {
        let mut news = state.news().write().await;
        let id = news
            .iter()
            .map(|a| a.id)
            .max()
            .map_or(NewsId::new(1), |id| id.next());
        form.clone().into_article(id, &news, today).map(|article| {
            let title = article.title.clone();
            news.push(article);
            (id, title)
        })
    };

    match result {
        Ok((id, title)) => {
            tracing::info!(news_id = %id, "News article created");
            let flash = Flash::success(format!("Статья «{title}» опубликована"));
            Ok(redirect_with(&session, flash, NEWS_PATH).await?.into_response())
        }
        Err(error) => Ok(rejected(
            NewsFormTemplate::new("Новая статья".to_string(), NEWS_PATH.to_string(), form),
            error,
        )),
    }
}

#[instrument(skip(state))]
pub async fn edit(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<NewsId>,
) -> Result<Html<String>> {
    let form = state
        .news()
        .read()
        .await
        .iter()
        .find(|a| a.id == id)
        .map(NewsForm::from_article)
        .ok_or_else(|| AppError::NotFound(format!("news {id}")))?;

    Ok(render(&NewsFormTemplate::new(
        format!("Редактирование: {}", form.title),
        format!("{NEWS_PATH}/{id}"),
        form,
    )))
}

#[instrument(skip(state, session, form))]
pub async fn update(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<NewsId>,
    Form(form): Form<NewsForm>,
) -> Result<Response> {
    let today = Utc::now().date_naive();
    let result = {
        let mut news = state.news().write().await;
        if !news.iter().any(|a| a.id == id) {
            return Err(AppError::NotFound(format!("news {id}")));
        }
        form.clone().into_article(id, &news, today).map(|article| {
            if let Some(slot) = news.iter_mut().find(|a| a.id == id) {
                *slot = article;
            }
        })
    };

    match result {
        Ok(()) => {
            tracing::info!(news_id = %id, "News article updated");
            Ok(
                redirect_with(&session, Flash::success("Статья сохранена"), NEWS_PATH)
                    .await?
                    .into_response(),
            )
        }
        Err(error) => Ok(rejected(
            NewsFormTemplate::new(
                format!("Редактирование: {}", form.title),
                format!("{NEWS_PATH}/{id}"),
                form,
            ),
            error,
        )),
    }
}

#[instrument(skip(state, session))]
pub async fn delete(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<NewsId>,
) -> Result<Redirect> {
    {
        let mut news = state.news().write().await;
        let before = news.len();
        news.retain(|a| a.id != id);
        if news.len() == before {
            return Err(AppError::NotFound(format!("news {id}")));
        }
    }

    tracing::info!(news_id = %id, "News article deleted");
    redirect_with(&session, Flash::success("Статья удалена"), NEWS_PATH).await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use facade_shop_core::content::seed_news;

    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    fn form(slug: &str) -> NewsForm {
        NewsForm {
            slug: slug.to_string(),
            title: "Новые цвета".to_string(),
            summary: String::new(),
            body: "Добавили **шалфей**.".to_string(),
            published_on: String::new(),
        }
    }

    #[test]
    fn test_empty_date_defaults_to_today() {
        let article = form("new-colors")
            .into_article(NewsId::new(10), &[], today())
            .unwrap();
        assert_eq!(article.published_on, today());
    }

    #[test]
    fn test_bad_date_is_rejected() {
        let mut input = form("new-colors");
        input.published_on = "18.10.2026".to_string();
        assert!(input.into_article(NewsId::new(10), &[], today()).is_err());
    }

    #[test]
    fn test_slug_taken_by_other_article() {
        let news = seed_news();
        let taken = news.first().unwrap();
        let err = form(&taken.slug)
            .into_article(NewsId::new(99), &news, today())
            .unwrap_err();
        assert!(err.contains(&taken.slug));

        // Keeping its own slug is fine
        assert!(form(&taken.slug).into_article(taken.id, &news, today()).is_ok());
    }
}
