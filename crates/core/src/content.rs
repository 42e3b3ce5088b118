//! Site content: news, product comments, user accounts and store settings.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::validate_slug;
use crate::types::{CommentId, Email, FacadeId, NewsId, Price, UserId, UserRole};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ContentError {
    #[error("{0} is required")]
    Required(&'static str),
    #[error("{0}")]
    InvalidSlug(String),
    #[error("rating must be between 1 and 5, got {0}")]
    RatingOutOfRange(u8),
    #[error("free delivery threshold must not be negative")]
    NegativeThreshold,
}

fn required(field: &'static str, value: &str) -> Result<String, ContentError> {
    let value = value.trim();
    if value.is_empty() {
        Err(ContentError::Required(field))
    } else {
        Ok(value.to_owned())
    }
}

// =============================================================================
// News
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsArticle {
    pub id: NewsId,
    pub slug: String,
    pub title: String,
    pub summary: String,
    /// Markdown source; rendered to HTML by the site.
    pub body: String,
    pub published_on: NaiveDate,
}

/// Back-office form input for an article.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewsDraft {
    pub slug: String,
    pub title: String,
    pub summary: String,
    pub body: String,
    pub published_on: Option<NaiveDate>,
}

impl NewsDraft {
    /// Validate into an article, defaulting the date to `today`.
    ///
    /// # Errors
    ///
    /// Title and body are required; the slug must be a valid slug.
    pub fn into_article(self, id: NewsId, today: NaiveDate) -> Result<NewsArticle, ContentError> {
        let slug = self.slug.trim().to_owned();
        validate_slug(&slug).map_err(ContentError::InvalidSlug)?;
        Ok(NewsArticle {
            id,
            slug,
            title: required("title", &self.title)?,
            summary: self.summary.trim().to_owned(),
            body: required("body", &self.body)?,
            published_on: self.published_on.unwrap_or(today),
        })
    }
}

/// Articles newest first.
#[must_use]
pub fn latest_news(news: &[NewsArticle], limit: usize) -> Vec<&NewsArticle> {
    let mut sorted: Vec<&NewsArticle> = news.iter().collect();
    sorted.sort_by(|a, b| b.published_on.cmp(&a.published_on).then(b.id.cmp(&a.id)));
    sorted.truncate(limit);
    sorted
}

#[must_use]
pub fn seed_news() -> Vec<NewsArticle> {
    let rows: [(&str, &str, &str, &str, (i32, u32, u32)); 3] = [
        (
            "super-matte-collection",
            "Новая коллекция суперматовых фасадов",
            "Шесть новых оттенков с покрытием soft-touch.",
            "Мы расширили палитру **суперматовых** фасадов.\n\n\
             - антрацит\n- шалфей\n- терракота\n\n\
             Покрытие не оставляет отпечатков и легко моется.",
            (2026, 9, 15),
        ),
        (
            "custom-sizes",
            "Фасады по вашим размерам",
            "Изготавливаем фасады от 50 до 3000 мм по любой стороне.",
            "Укажите ширину и высоту на странице товара, и калькулятор \
             сразу покажет стоимость.\n\nДля нестандартных форм воспользуйтесь \
             [формой индивидуального заказа](/custom-order).",
            (2026, 8, 20),
        ),
        (
            "showroom-open",
            "Открыт шоурум на Профсоюзной",
            "Приходите посмотреть образцы покрытий вживую.",
            "В шоуруме представлены все материалы и **15 цветов** палитры.\n\n\
             Работаем ежедневно с 10:00 до 20:00.",
            (2026, 7, 1),
        ),
    ];
    rows.into_iter()
        .zip(1..)
        .filter_map(|((slug, title, summary, body, (y, m, d)), id)| {
            Some(NewsArticle {
                id: NewsId::new(id),
                slug: slug.to_owned(),
                title: title.to_owned(),
                summary: summary.to_owned(),
                body: body.to_owned(),
                published_on: NaiveDate::from_ymd_opt(y, m, d)?,
            })
        })
        .collect()
}

// =============================================================================
// Comments
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub facade_id: FacadeId,
    pub author: String,
    pub text: String,
    /// 1 to 5 stars.
    pub rating: u8,
    pub approved: bool,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// A new, unapproved comment.
    ///
    /// # Errors
    ///
    /// Author and text are required; rating must be 1..=5.
    pub fn new(
        id: CommentId,
        facade_id: FacadeId,
        author: &str,
        text: &str,
        rating: u8,
        created_at: DateTime<Utc>,
    ) -> Result<Self, ContentError> {
        if !(1..=5).contains(&rating) {
            return Err(ContentError::RatingOutOfRange(rating));
        }
        Ok(Self {
            id,
            facade_id,
            author: required("author", author)?,
            text: required("text", text)?,
            rating,
            approved: false,
            created_at,
        })
    }
}

/// Approved comments for one facade, newest first.
#[must_use]
pub fn approved_comments(comments: &[Comment], facade_id: FacadeId) -> Vec<&Comment> {
    let mut approved: Vec<&Comment> = comments
        .iter()
        .filter(|comment| comment.approved && comment.facade_id == facade_id)
        .collect();
    approved.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    approved
}

#[must_use]
pub fn seed_comments() -> Vec<Comment> {
    let rows: [(i32, &str, &str, u8, bool, i64); 6] = [
        (1, "Светлана", "Заказывали на кухню, цвет слоновой кости точно как на фото.", 5, true, 1_786_000_000),
        (1, "Дмитрий", "Филёнка аккуратная, но доставка заняла две недели.", 4, true, 1_786_500_000),
        (2, "Ольга", "Глянец графит смотрится дорого. Отпечатков почти не видно.", 5, true, 1_787_000_000),
        (4, "Артём", "Массив дуба, запах дерева до сих пор!", 5, true, 1_787_500_000),
        (5, "Гость", "Купите дешёвые фасады на моём сайте", 1, false, 1_788_000_000),
        (3, "Ирина", "Для шкафа в детскую самое то по цене.", 4, false, 1_788_500_000),
    ];
    rows.into_iter()
        .zip(1..)
        .filter_map(|((facade, author, text, rating, approved, at), id)| {
            Some(Comment {
                id: CommentId::new(id),
                facade_id: FacadeId::new(facade),
                author: author.to_owned(),
                text: text.to_owned(),
                rating,
                approved,
                created_at: DateTime::from_timestamp(at, 0)?,
            })
        })
        .collect()
}

// =============================================================================
// Users
// =============================================================================

/// A registered site user as the back-office sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    pub role: UserRole,
    pub blocked: bool,
    pub registered_at: DateTime<Utc>,
}

#[must_use]
pub fn seed_users() -> Vec<UserAccount> {
    let rows: [(&str, &str, UserRole, bool, i64); 5] = [
        ("Анна Смирнова", "anna@example.ru", UserRole::Customer, false, 1_780_000_000),
        ("Игорь Петров", "igor@example.ru", UserRole::Customer, false, 1_781_000_000),
        ("Мария Козлова", "maria@example.ru", UserRole::Manager, false, 1_782_000_000),
        ("Спам Бот", "bot@spam.example", UserRole::Customer, true, 1_783_000_000),
        ("Администратор", "admin@facade-shop.ru", UserRole::Admin, false, 1_779_000_000),
    ];
    rows.into_iter()
        .zip(1..)
        .filter_map(|((name, email, role, blocked, at), id)| {
            Some(UserAccount {
                id: UserId::new(id),
                name: name.to_owned(),
                email: Email::parse(email).ok()?,
                role,
                blocked,
                registered_at: DateTime::from_timestamp(at, 0)?,
            })
        })
        .collect()
}

// =============================================================================
// Settings
// =============================================================================

/// Store-wide contact details and delivery terms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteSettings {
    pub store_name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub working_hours: String,
    pub delivery_note: String,
    /// Orders at or above this subtotal ship for free.
    pub free_delivery_threshold: Price,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            store_name: "Фасад Маркет".to_owned(),
            phone: "+7 495 123-45-67".to_owned(),
            email: "info@facade-shop.ru".to_owned(),
            address: "Москва, ул. Профсоюзная, 56".to_owned(),
            working_hours: "Ежедневно 10:00–20:00".to_owned(),
            delivery_note: "Доставка по Москве от 2 дней, по России транспортной компанией."
                .to_owned(),
            free_delivery_threshold: Price::rub(Decimal::new(50_000, 0)),
        }
    }
}

/// Back-office form input for [`SiteSettings`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SettingsForm {
    pub store_name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub working_hours: String,
    pub delivery_note: String,
    pub free_delivery_threshold: Decimal,
}

impl SettingsForm {
    /// # Errors
    ///
    /// Store name, phone and email are required; the threshold must not be
    /// negative.
    pub fn into_settings(self) -> Result<SiteSettings, ContentError> {
        if self.free_delivery_threshold.is_sign_negative() {
            return Err(ContentError::NegativeThreshold);
        }
        Ok(SiteSettings {
            store_name: required("store name", &self.store_name)?,
            phone: required("phone", &self.phone)?,
            email: required("email", &self.email)?,
            address: self.address.trim().to_owned(),
            working_hours: self.working_hours.trim().to_owned(),
            delivery_note: self.delivery_note.trim().to_owned(),
            free_delivery_threshold: Price::rub(self.free_delivery_threshold),
        })
    }
}

impl SiteSettings {
    /// Whether `subtotal` qualifies for free delivery.
    #[must_use]
    pub fn free_delivery(&self, subtotal: Price) -> bool {
        subtotal.amount >= self.free_delivery_threshold.amount
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_news_draft_validation() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 1).unwrap();
        let draft = NewsDraft {
            slug: "autumn-sale".to_owned(),
            title: " Осенняя распродажа ".to_owned(),
            summary: String::new(),
            body: "Скидки **до 30%**".to_owned(),
            published_on: None,
        };
        let article = draft.clone().into_article(NewsId::new(9), today).unwrap();
        assert_eq!(article.title, "Осенняя распродажа");
        assert_eq!(article.published_on, today);

        let no_title = NewsDraft {
            title: "  ".to_owned(),
            ..draft.clone()
        };
        assert_eq!(
            no_title.into_article(NewsId::new(9), today),
            Err(ContentError::Required("title"))
        );

        let bad_slug = NewsDraft {
            slug: "Autumn Sale".to_owned(),
            ..draft
        };
        assert!(matches!(
            bad_slug.into_article(NewsId::new(9), today),
            Err(ContentError::InvalidSlug(_))
        ));
    }

    #[test]
    fn test_latest_news_is_newest_first() {
        let news = seed_news();
        let latest = latest_news(&news, 2);
        assert_eq!(latest.len(), 2);
        assert_eq!(latest[0].slug, "super-matte-collection");
        assert!(latest[0].published_on >= latest[1].published_on);
    }

    #[test]
    fn test_approved_comments_only() {
        let comments = seed_comments();
        let shown = approved_comments(&comments, FacadeId::new(1));
        assert_eq!(shown.len(), 2);
        assert!(shown[0].created_at >= shown[1].created_at);
        assert!(approved_comments(&comments, FacadeId::new(5)).is_empty());
    }

    #[test]
    fn test_comment_rating_range() {
        let now = Utc::now();
        assert_eq!(
            Comment::new(CommentId::new(1), FacadeId::new(1), "A", "B", 6, now),
            Err(ContentError::RatingOutOfRange(6))
        );
        let comment = Comment::new(CommentId::new(1), FacadeId::new(1), "A", "B", 5, now).unwrap();
        assert!(!comment.approved);
    }

    #[test]
    fn test_seed_users_parse() {
        let users = seed_users();
        assert_eq!(users.len(), 5);
        assert!(users.iter().any(|user| user.blocked));
    }

    #[test]
    fn test_settings_form() {
        let form = SettingsForm {
            store_name: "Shop".to_owned(),
            phone: "1".to_owned(),
            email: "a@b.ru".to_owned(),
            free_delivery_threshold: Decimal::new(-1, 0),
            ..SettingsForm::default()
        };
        assert_eq!(
            form.clone().into_settings(),
            Err(ContentError::NegativeThreshold)
        );
        let settings = SettingsForm {
            free_delivery_threshold: Decimal::new(1000, 0),
            ..form
        }
        .into_settings()
        .unwrap();
        assert!(settings.free_delivery(Price::rub(Decimal::new(1000, 0))));
        assert!(!settings.free_delivery(Price::rub(Decimal::new(999, 0))));
    }
}
