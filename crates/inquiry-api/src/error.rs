//! HTTP error response conversion
//!
//! Handlers return `Result<impl IntoResponse, HttpAppError>`; every failure
//! renders as `{"success": false, "error": <client message>}` with the status
//! taken from [`ErrorMetadata`].

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use inquiry_core::models::ContactFailure;
use inquiry_core::{AppError, ErrorMetadata, LogLevel};
use inquiry_storage::StoreError;

/// Wrapper type for AppError to implement IntoResponse
/// This is necessary because of Rust's orphan rules - we can't implement
/// IntoResponse (external trait) for AppError (external type from inquiry-core)
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<StoreError> for HttpAppError {
    fn from(err: StoreError) -> Self {
        HttpAppError(err.into())
    }
}

fn log_error(error: &AppError) {
    let code = error.error_code();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, code = code, "Request rejected");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, code = code, "Request failed");
        }
        LogLevel::Error => {
            tracing::error!(
                error = %error.detailed_message(),
                code = code,
                "Request failed"
            );
        }
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.0;

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        // Sensitive errors only ever expose the generic message
        (status, Json(ContactFailure::new(app_error.client_message()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inquiry_core::{ValidationFailure, INTERNAL_ERROR_MESSAGE, METHOD_NOT_ALLOWED_MESSAGE};

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_validation_error_renders_400_with_message() {
        let response = HttpAppError(ValidationFailure::InvalidEmail.into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({
                "success": false,
                "error": "Please enter a valid email address."
            })
        );
    }

    #[tokio::test]
    async fn test_method_not_allowed_renders_405() {
        let response = HttpAppError(AppError::MethodNotAllowed("GET".into())).into_response();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(
            body_json(response).await["error"],
            METHOD_NOT_ALLOWED_MESSAGE
        );
    }

    #[tokio::test]
    async fn test_store_error_hides_details() {
        let err: HttpAppError = StoreError::Connection("10.0.0.3:6379 refused".into()).into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], INTERNAL_ERROR_MESSAGE);
        assert!(!body.to_string().contains("10.0.0.3"));
    }
}
