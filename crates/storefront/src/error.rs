//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry before
//! responding to the client. All route handlers return `Result<T, AppError>`.
//!
//! Responses carry a JSON body of the shape `{"detail": "..."}`, matching
//! the error shape of the remote services, so the frontend can treat local
//! and proxied failures uniformly.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::clients::accounts::AccountsError;
use crate::clients::catalog::CatalogError;
use crate::clients::payments::PaymentError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Catalog service operation failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Accounts service operation failed.
    #[error("Accounts error: {0}")]
    Accounts(#[from] AccountsError),

    /// Payment gateway operation failed.
    #[error("Payment error: {0}")]
    Payment(#[from] PaymentError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// User is not authenticated.
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
    /// Whether this error indicates a server-side or upstream failure
    /// worth capturing, as opposed to an expected client-driven outcome.
    fn is_server_error(&self) -> bool {
        match self {
            Self::Internal(_) => true,
            Self::Catalog(err) => !matches!(err, CatalogError::NotFound(_)),
            Self::Accounts(err) => matches!(err, AccountsError::Http(_)),
            Self::Payment(err) => !matches!(err, PaymentError::InvalidAmount(_)),
            Self::NotFound(_) | Self::Unauthorized(_) | Self::BadRequest(_) => false,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let (status, detail) = match &self {
            Self::Catalog(err) => match err {
                CatalogError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
                CatalogError::Http(_) | CatalogError::Api { .. } => {
                    (StatusCode::BAD_GATEWAY, "Something went wrong".to_string())
                }
            },
            Self::Accounts(err) => match err {
                // The remote validation message is shown verbatim
                AccountsError::Rejected { status, detail } => (
                    StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_REQUEST),
                    detail.clone(),
                ),
                AccountsError::Http(_) => {
                    (StatusCode::BAD_GATEWAY, "Something went wrong".to_string())
                }
            },
            Self::Payment(err) => match err {
                PaymentError::InvalidAmount(_) => {
                    (StatusCode::BAD_REQUEST, "Invalid amount".to_string())
                }
                PaymentError::Http(_) | PaymentError::Api { .. } => (
                    StatusCode::BAD_GATEWAY,
                    "Failed to initiate payment".to_string(),
                ),
            },
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            Self::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Self::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Set the Sentry user context from an email address.
///
/// Call this after successful authentication to associate errors with users.
pub fn set_sentry_user(email: &str) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            email: Some(email.to_string()),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context.
///
/// Call this on logout to stop associating errors with the user.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
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
        let err = AppError::NotFound("product mandala-7".to_string());
        assert_eq!(err.to_string(), "Not found: product mandala-7");

        let err = AppError::BadRequest("invalid input".to_string());
        assert_eq!(err.to_string(), "Bad request: invalid input");
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            get_status(AppError::NotFound("test".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Unauthorized("test".to_string())),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            get_status(AppError::BadRequest("test".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Internal("test".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_catalog_not_found_is_404() {
        let err = AppError::Catalog(CatalogError::NotFound("Product not found: x".to_string()));
        assert_eq!(get_status(err), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_remote_rejection_propagates_status() {
        let err = AppError::Accounts(AccountsError::Rejected {
            status: 401,
            detail: "Invalid email or password".to_string(),
        });
        assert_eq!(get_status(err), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_invalid_payment_amount_is_400() {
        let err = AppError::Payment(PaymentError::InvalidAmount(-5));
        assert_eq!(get_status(err), StatusCode::BAD_REQUEST);
    }
}
