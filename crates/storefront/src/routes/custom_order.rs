//! Custom fabrication request form.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use chrono::Utc;
use facade_shop_core::custom_order::{ALLOWED_EXTENSIONS, Attachment};
use facade_shop_core::{CustomOrderError, CustomOrderForm, CustomOrderReceipt};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::PageContext;
use crate::models::Notice;
use crate::state::AppState;

/// Custom order page template.
#[derive(Template, WebTemplate)]
#[template(path = "custom_order.html")]
pub struct CustomOrderTemplate {
    pub page: PageContext,
    pub form: CustomOrderForm,
    /// Value of the file input's `accept` attribute.
    pub accept: String,
    pub max_upload_mb: u64,
}

impl CustomOrderTemplate {
    fn new(state: &AppState, page: PageContext, form: CustomOrderForm) -> Self {
        Self {
            page,
            form,
            accept: ALLOWED_EXTENSIONS
                .iter()
                .map(|ext| format!(".{ext}"))
                .collect::<Vec<_>>()
                .join(","),
            max_upload_mb: state.config().max_upload_bytes / (1024 * 1024),
        }
    }
}

/// Display the empty form.
#[instrument(skip_all)]
pub async fn show(State(state): State<AppState>, page: PageContext) -> impl IntoResponse {
    CustomOrderTemplate::new(&state, page, CustomOrderForm::default())
}

/// Accept a request.
///
/// A valid request is logged, kept in the inbox and acknowledged with a
/// reference. An invalid one re-renders the form with what was typed and a
/// destructive notice.
#[instrument(skip_all)]
pub async fn submit(
    State(state): State<AppState>,
    session: Session,
    mut page: PageContext,
    multipart: Multipart,
) -> Result<Response> {
    let (form, attachment) = read_form(multipart, state.config().max_upload_bytes).await?;

    let request = match attachment.and_then(|attachment| form.clone().validate(attachment)) {
        Ok(request) => request,
        Err(e) => {
            tracing::debug!(error = %e, "Custom order rejected");
            page.notices
                .push(Notice::destructive("Заявка не отправлена", describe(&e)));
            let template = CustomOrderTemplate::new(&state, page, form);
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, template).into_response());
        }
    };

    let receipt = CustomOrderReceipt::new(request, Utc::now());
    tracing::info!(
        reference = %receipt.reference,
        width = %receipt.request.width,
        height = %receipt.request.height,
        depth = %receipt.request.depth,
        attachment = receipt.request.attachment.as_ref().map(|a| a.file_name.as_str()),
        "Custom order received"
    );
    Notice::normal(
        "Заявка отправлена",
        format!(
            "Номер заявки {}. Менеджер свяжется с вами для уточнения деталей.",
            receipt.short_reference()
        ),
    )
    .push(&session)
    .await?;
    state.custom_orders().write().await.push(receipt);

    Ok(Redirect::to("/custom-order").into_response())
}

/// Collect the text fields and the attachment reference.
///
/// The attachment's own check result is returned separately so the typed
/// dimensions can still be shown again when the file is refused.
async fn read_form(
    mut multipart: Multipart,
    max_bytes: u64,
) -> Result<(
    CustomOrderForm,
    std::result::Result<Option<Attachment>, CustomOrderError>,
)> {
    let mut form = CustomOrderForm::default();
    let mut attachment = Ok(None);

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.body_text()))?
    {
        match field.name() {
            Some("width") => form.width = text(field).await?,
            Some("height") => form.height = text(field).await?,
            Some("depth") => form.depth = text(field).await?,
            Some("attachment") => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.body_text()))?;
                // Browsers send an empty part when no file was chosen
                if !file_name.is_empty() {
                    let size = u64::try_from(data.len()).unwrap_or(u64::MAX);
                    attachment =
                        Attachment::check(&file_name, &content_type, size, max_bytes).map(Some);
                }
            }
            _ => {}
        }
    }

    Ok((form, attachment))
}

async fn text(field: axum::extract::multipart::Field<'_>) -> Result<String> {
    field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(e.body_text()))
}

fn describe(error: &CustomOrderError) -> String {
    match error {
        CustomOrderError::MissingFields(fields) => {
            let labels: Vec<&str> = fields
                .iter()
                .map(|field| match *field {
                    "width" => "ширина",
                    "height" => "высота",
                    "depth" => "глубина",
                    other => other,
                })
                .collect();
            format!("Заполните поля: {}", labels.join(", "))
        }
        CustomOrderError::UnsupportedFileType(name) => format!(
            "Файл {name} не подходит. Допустимые форматы: {}",
            ALLOWED_EXTENSIONS.join(", ")
        ),
        CustomOrderError::AttachmentTooLarge { max, .. } => {
            format!("Файл больше {} МБ", max / (1024 * 1024))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_missing_fields() {
        let error = CustomOrderError::MissingFields(vec!["height", "depth"]);
        assert_eq!(describe(&error), "Заполните поля: высота, глубина");
    }
}
