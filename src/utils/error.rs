use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

use crate::database::StoreError;

#[derive(Debug, Error)]
pub enum AppError {
    /// No credential, or a credential that is not a bearer token.
    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    /// Valid credential, wrong identity or insufficient role. Also used for
    /// tokens that fail verification.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Store(#[from] StoreError),

    #[error("Failed to decode document: {0}")]
    Decode(#[from] mongodb::bson::de::Error),

    #[error("Failed to encode document: {0}")]
    Encode(#[from] mongodb::bson::ser::Error),

    #[error("Failed to sign token: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("Failed to hash password: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Store(_)
            | AppError::Decode(_)
            | AppError::Encode(_)
            | AppError::Token(_)
            | AppError::PasswordHash(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        // Server-side detail stays in the logs
        let message = if status.is_server_error() {
            log::error!("❌ {}", self);
            "Internal server error".to_string()
        } else {
            log::warn!("⚠️  {}", self);
            self.to_string()
        };

        HttpResponse::build(status).json(serde_json::json!({
            "success": false,
            "error": message
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::Unauthenticated("x".into()).status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::Forbidden("x".into()).status_code(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::NotFound("x".into()).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::Store(StoreError::UnsupportedOperator("$gt".into())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[actix_web::test]
    async fn test_server_errors_hide_detail() {
        let response = AppError::Internal("connection reset".into()).error_response();
        let body = actix_web::body::to_bytes(response.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "Internal server error");
    }
}
