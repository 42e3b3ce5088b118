//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry before
//! responding to the client. All route handlers should return `Result<T, AppError>`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use facade_shop_core::catalog::CatalogError;
use facade_shop_core::content::ContentError;
use facade_shop_core::{DiscountError, OrderError};
use thiserror::Error;

/// Application-level error type for admin.
#[derive(Debug, Error)]
pub enum AppError {
    /// Catalog lookup or mutation failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Order lookup or status change failed.
    #[error("Order error: {0}")]
    Order(#[from] OrderError),

    /// Promo code validation failed.
    #[error("Discount error: {0}")]
    Discount(#[from] DiscountError),

    /// News, comment or settings validation failed.
    #[error("Content error: {0}")]
    Content(#[from] ContentError),

    /// Session store read or write failed.
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Authentication required.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    fn is_server_error(&self) -> bool {
        matches!(self, Self::Session(_) | Self::Internal(_))
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::Catalog(CatalogError::FacadeNotFound(_) | CatalogError::CategoryNotFound(_))
            | Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Catalog(CatalogError::CategoryInUse { .. } | CatalogError::DuplicateSlug(_))
            | Self::Order(OrderError::InvalidTransition { .. })
            | Self::Discount(DiscountError::DuplicateCode(_)) => StatusCode::CONFLICT,
            Self::Catalog(_)
            | Self::Order(_)
            | Self::Discount(_)
            | Self::Content(_)
            | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Session(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if self.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Session(_) | Self::Internal(_) => "Internal server error".to_string(),
            Self::Catalog(err) => err.to_string(),
            Self::Order(err) => err.to_string(),
            Self::Discount(err) => err.to_string(),
            Self::Content(err) => err.to_string(),
            _ => self.to_string(),
        };

        (self.status(), message).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use facade_shop_core::{CategoryId, FacadeId, OrderStatus};

    use super::*;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("order 7".to_string());
        assert_eq!(err.to_string(), "Not found: order 7");
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            get_status(AppError::Catalog(CatalogError::FacadeNotFound(FacadeId::new(
                99
            )))),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Catalog(CatalogError::CategoryInUse {
                id: CategoryId::new(1),
                count: 3
            })),
            StatusCode::CONFLICT
        );
        assert_eq!(
            get_status(AppError::Order(OrderError::InvalidTransition {
                from: OrderStatus::Delivered,
                to: OrderStatus::New
            })),
            StatusCode::CONFLICT
        );
        assert_eq!(
            get_status(AppError::Discount(DiscountError::PercentOutOfRange(95))),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Unauthorized("login".to_string())),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            get_status(AppError::Internal("boom".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
