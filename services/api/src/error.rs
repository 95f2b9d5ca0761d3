use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::domain::validation::ValidationErrors;

/// API error variants.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("validation failed")]
    Validation(ValidationErrors),
    #[error("not found")]
    NotFound,
    #[error("save error")]
    SaveFailed,
    #[error("id mismatch")]
    IdMismatch,
    #[error("registration failed")]
    RegistrationFailed(Vec<String>),
    #[error("account locked")]
    AccountLocked,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION",
            Self::NotFound => "NOT_FOUND",
            Self::SaveFailed => "SAVE_ERROR",
            Self::IdMismatch => "ID_MISMATCH",
            Self::RegistrationFailed(_) => "REGISTRATION_FAILED",
            Self::AccountLocked => "ACCOUNT_LOCKED",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::NotFound => return StatusCode::NOT_FOUND.into_response(),
            Self::SaveFailed
            | Self::IdMismatch
            | Self::RegistrationFailed(_)
            | Self::AccountLocked
            | Self::InvalidCredentials => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if let Self::Internal(ref e) = self {
            tracing::error!(error = ?e, kind = "INTERNAL", "internal error");
        }
        let mut body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        match self {
            Self::Validation(errors) => body["errors"] = serde_json::json!(errors),
            Self::RegistrationFailed(errors) => body["errors"] = serde_json::json!(errors),
            _ => {}
        }
        (status, axum::Json(body)).into_response()
    }
}
