//! Store settings page.

use askama::Template;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use facade_shop_core::SiteSettings;
use facade_shop_core::content::SettingsForm;

use crate::{error::Result, filters, middleware::RequireAdminAuth, models::Flash, state::AppState};

use super::{redirect_with, render};

const SETTINGS_PATH: &str = "/admin/settings";

/// Settings form as submitted; the threshold is parsed here so a typo
/// re-renders the form instead of failing extraction.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SettingsInput {
    #[serde(default)]
    pub store_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub working_hours: String,
    #[serde(default)]
    pub delivery_note: String,
    #[serde(default)]
    pub free_delivery_threshold: String,
}

impl From<&SiteSettings> for SettingsInput {
    fn from(settings: &SiteSettings) -> Self {
        Self {
            store_name: settings.store_name.clone(),
            phone: settings.phone.clone(),
            email: settings.email.clone(),
            address: settings.address.clone(),
            working_hours: settings.working_hours.clone(),
            delivery_note: settings.delivery_note.clone(),
            free_delivery_threshold: settings.free_delivery_threshold.amount.to_string(),
        }
    }
}

impl SettingsInput {
    fn into_settings(self) -> std::result::Result<SiteSettings, String> {
        let free_delivery_threshold = self
            .free_delivery_threshold
            .trim()
            .replace(' ', "")
            .parse::<Decimal>()
            .map_err(|_| "Порог бесплатной доставки должен быть числом".to_string())?;

        SettingsForm {
            store_name: self.store_name,
            phone: self.phone,
            email: self.email,
            address: self.address,
            working_hours: self.working_hours,
            delivery_note: self.delivery_note,
            free_delivery_threshold,
        }
        .into_settings()
        .map_err(|e| e.to_string())
    }
}

#[derive(Template)]
#[template(path = "settings.html")]
pub struct SettingsTemplate {
    pub current_path: &'static str,
    pub flash: Option<Flash>,
    pub error: Option<String>,
    pub form: SettingsInput,
}

/// Settings page handler.
#[instrument(skip_all)]
pub async fn show(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
) -> Result<Html<String>> {
    let flash = Flash::take(&session).await?;
    let form = SettingsInput::from(&*state.settings().read().await);

    Ok(render(&SettingsTemplate {
        current_path: SETTINGS_PATH,
        flash,
        error: None,
        form,
    }))
}

/// Update settings handler.
#[instrument(skip(state, session))]
pub async fn update(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Form(input): Form<SettingsInput>,
) -> Result<Response> {
    match input.clone().into_settings() {
        Ok(settings) => {
            *state.settings().write().await = settings;
            tracing::info!("Store settings updated");
            Ok(
                redirect_with(&session, Flash::success("Настройки сохранены"), SETTINGS_PATH)
                    .await?
                    .into_response(),
            )
        }
        Err(error) => {
            let template = SettingsTemplate {
                current_path: SETTINGS_PATH,
                flash: None,
                error: Some(error),
                form: input,
            };
            Ok((StatusCode::UNPROCESSABLE_ENTITY, render(&template)).into_response())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_roundtrip_through_form() {
        let defaults = SiteSettings::default();
        let settings = SettingsInput::from(&defaults).into_settings().unwrap();
        assert_eq!(settings, defaults);
    }

    #[test]
    fn test_threshold_accepts_grouped_digits() {
        let mut input = SettingsInput::from(&SiteSettings::default());
        input.free_delivery_threshold = "75 000".to_string();
        let settings = input.into_settings().unwrap();
        assert_eq!(settings.free_delivery_threshold.amount, Decimal::new(75_000, 0));
    }

    #[test]
    fn test_missing_phone_is_rejected() {
        let mut input = SettingsInput::from(&SiteSettings::default());
        input.phone = "  ".to_string();
        assert!(input.into_settings().is_err());
    }
}
