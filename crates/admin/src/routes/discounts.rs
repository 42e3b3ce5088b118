//! Discount management route handlers.

use askama::Template;
use axum::{
    Form, Router,
    extract::{Path, State},
    response::{Html, Redirect},
    routing::{get, post},
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use facade_shop_core::{Discount, DiscountError, DiscountId};

use crate::{
    components::{DataTableConfig, data_table::discounts_table_config},
    error::{AppError, Result},
    filters,
    middleware::RequireAdminAuth,
    models::Flash,
    state::AppState,
};

use super::{redirect_with, render};

const DISCOUNTS_PATH: &str = "/admin/discounts";

/// Build the discounts router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/discounts", get(index).post(create))
        .route("/discounts/{id}/toggle", post(toggle))
        .route("/discounts/{id}/delete", post(delete))
}

/// Discount view for templates.
#[derive(Debug, Clone)]
pub struct DiscountView {
    pub id: i32,
    pub code: String,
    pub percent: u8,
    pub expires: String,
    pub status: &'static str,
    pub status_class: &'static str,
    pub active: bool,
}

impl DiscountView {
    fn new(discount: &Discount, now: DateTime<Utc>) -> Self {
        let (status, status_class) = if discount.is_usable(now) {
            ("Действует", "badge badge--success")
        } else if discount.active {
            ("Истёк", "badge badge--muted")
        } else {
            ("Выключен", "badge badge--muted")
        };

        Self {
            id: discount.id.as_i32(),
            code: discount.code.clone(),
            percent: discount.percent,
            expires: discount
                .expires_at
                .map_or_else(|| "—".to_string(), |at| at.format("%d.%m.%Y").to_string()),
            status,
            status_class,
            active: discount.active,
        }
    }
}

/// Discounts list page template.
#[derive(Template)]
#[template(path = "discounts/index.html")]
pub struct DiscountsIndexTemplate {
    pub current_path: &'static str,
    pub flash: Option<Flash>,
    pub table: DataTableConfig,
    pub discounts: Vec<DiscountView>,
}

/// Form input for creating discounts.
#[derive(Debug, Deserialize)]
pub struct DiscountFormInput {
    pub code: String,
    pub percent: String,
    /// `YYYY-MM-DD`; the code works through the end of that day (UTC).
    #[serde(default)]
    pub expires_on: String,
}

/// Validate the form and build a discount that does not clash with `existing`.
fn build_discount(
    input: &DiscountFormInput,
    existing: &[Discount],
) -> std::result::Result<Discount, String> {
    let percent = input
        .percent
        .trim()
        .parse::<u8>()
        .map_err(|_| "Скидка должна быть целым числом процентов".to_string())?;
    let expires_at = match input.expires_on.trim() {
        "" => None,
        date => Some(
            NaiveDate::parse_from_str(date, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(23, 59, 59))
                .map(|dt| dt.and_utc())
                .ok_or_else(|| format!("Некорректная дата «{date}»"))?,
        ),
    };

    let id = existing
        .iter()
        .map(|d| d.id)
        .max()
        .map_or(DiscountId::new(1), |id| id.next());
    let discount =
        Discount::new(id, &input.code, percent, expires_at).map_err(|e| e.to_string())?;

    if existing.iter().any(|d| d.matches(&discount.code)) {
        return Err(DiscountError::DuplicateCode(discount.code).to_string());
    }
    Ok(discount)
}

fn not_found(id: DiscountId) -> AppError {
    AppError::NotFound(format!("discount {id}"))
}

/// Discounts list page handler.
#[instrument(skip_all)]
pub async fn index(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
) -> Result<Html<String>> {
    let flash = Flash::take(&session).await?;
    let now = Utc::now();
    let discounts = state
        .discounts()
        .read()
        .await
        .iter()
        .map(|d| DiscountView::new(d, now))
        .collect();

    Ok(render(&DiscountsIndexTemplate {
        current_path: DISCOUNTS_PATH,
        flash,
        table: discounts_table_config(),
        discounts,
    }))
}

/// Create discount handler.
#[instrument(skip(state, session))]
pub async fn create(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Form(input): Form<DiscountFormInput>,
) -> Result<Redirect> {
    let result = {
        let mut discounts = state.discounts().write().await;
        build_discount(&input, &discounts).map(|discount| {
            let code = discount.code.clone();
            discounts.push(discount);
            code
        })
    };

    let flash = match result {
        Ok(code) => {
            tracing::info!(code = %code, "Discount created");
            Flash::success(format!("Промокод {code} создан"))
        }
        Err(error) => {
            tracing::warn!(code = %input.code, error = %error, "Failed to create discount");
            Flash::error(error)
        }
    };
    redirect_with(&session, flash, DISCOUNTS_PATH).await
}

/// Activate or deactivate a promo code.
#[instrument(skip(state, session))]
pub async fn toggle(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<DiscountId>,
) -> Result<Redirect> {
    let (code, active) = {
        let mut discounts = state.discounts().write().await;
        let discount = discounts
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| not_found(id))?;
        discount.active = !discount.active;
        (discount.code.clone(), discount.active)
    };

    tracing::info!(discount_id = %id, active, "Discount toggled");
    let message = if active {
        format!("Промокод {code} включён")
    } else {
        format!("Промокод {code} выключен")
    };
    redirect_with(&session, Flash::success(message), DISCOUNTS_PATH).await
}

/// Delete a promo code.
#[instrument(skip(state, session))]
pub async fn delete(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<DiscountId>,
) -> Result<Redirect> {
    let code = {
        let mut discounts = state.discounts().write().await;
        let index = discounts
            .iter()
            .position(|d| d.id == id)
            .ok_or_else(|| not_found(id))?;
        discounts.remove(index).code
    };

    tracing::info!(discount_id = %id, code = %code, "Discount deleted");
    redirect_with(
        &session,
        Flash::success(format!("Промокод {code} удалён")),
        DISCOUNTS_PATH,
    )
    .await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use facade_shop_core::discount::seed_discounts;

    use super::*;

    fn input(code: &str, percent: &str, expires_on: &str) -> DiscountFormInput {
        DiscountFormInput {
            code: code.to_string(),
            percent: percent.to_string(),
            expires_on: expires_on.to_string(),
        }
    }

    #[test]
    fn test_build_discount_assigns_next_id() {
        let existing = seed_discounts();
        let discount = build_discount(&input("autumn20", "20", "2026-11-30"), &existing).unwrap();
        assert_eq!(discount.code, "AUTUMN20");
        assert_eq!(discount.id.as_i32(), 4);
        assert_eq!(
            discount.expires_at.unwrap().format("%Y-%m-%d %H:%M").to_string(),
            "2026-11-30 23:59"
        );
    }

    #[test]
    fn test_duplicate_code_is_rejected_case_insensitively() {
        let existing = seed_discounts();
        let err = build_discount(&input("welcome5", "5", ""), &existing).unwrap_err();
        assert!(err.contains("WELCOME5"));
    }

    #[test]
    fn test_invalid_percent_and_date() {
        let existing = seed_discounts();
        assert!(build_discount(&input("BIG", "95", ""), &existing).is_err());
        assert!(build_discount(&input("BIG", "ten", ""), &existing).is_err());
        assert!(build_discount(&input("BIG", "10", "30.11.2026"), &existing).is_err());
    }
}
