//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry before
//! responding to the client. All route handlers should return `Result<T, AppError>`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::catalog::CatalogError;
use crate::session::ActionError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Catalog API operation failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// A cart command could not be understood.
    #[error("Invalid cart action: {0}")]
    Action(#[from] ActionError),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Catalog(CatalogError::NotFound(_)) => StatusCode::NOT_FOUND,
            Self::Catalog(CatalogError::RateLimited(_)) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Catalog(_) => StatusCode::BAD_GATEWAY,
            Self::Action(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Capture server errors to Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        // Don't expose upstream error details to clients
        let message = match &self {
            Self::Catalog(CatalogError::NotFound(what)) => format!("Not found: {what}"),
            Self::Catalog(_) => "Catalog unavailable, please try again later".to_string(),
            _ => self.to_string(),
        };

        (status, message).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Add a breadcrumb for cart activity.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of user actions
/// leading up to an error.
pub fn add_breadcrumb(category: &str, message: &str) {
    sentry::add_breadcrumb(sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::BadRequest("product id must be a number".to_string());
        assert_eq!(err.to_string(), "Bad request: product id must be a number");

        let err = AppError::Action(ActionError::ConfirmationRequired);
        assert_eq!(
            err.to_string(),
            "Invalid cart action: clearing the cart must be confirmed"
        );
    }

    #[test]
    fn test_client_error_status_codes() {
        assert_eq!(
            get_status(AppError::BadRequest("test".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Action(ActionError::Unknown("checkout".to_string()))),
            StatusCode::BAD_REQUEST
        );
    }

    #[tokio::test]
    async fn test_catalog_details_hidden_from_clients() {
        let err: AppError = CatalogError::Status {
            status: 500,
            body: "stack trace".to_string(),
        }
        .into();
        let body = axum::body::to_bytes(err.into_response().into_body(), usize::MAX)
            .await
            .unwrap_or_default();
        assert_eq!(body, "Catalog unavailable, please try again later");
    }

    #[test]
    fn test_catalog_error_status_codes() {
        assert_eq!(
            get_status(CatalogError::NotFound("product 9".to_string()).into()),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(CatalogError::RateLimited(5).into()),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            get_status(
                CatalogError::Status {
                    status: 500,
                    body: String::new()
                }
                .into()
            ),
            StatusCode::BAD_GATEWAY
        );
    }
}
