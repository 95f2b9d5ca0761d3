use axum::Json;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::de::DeserializeOwned;

/// JSON request body that must be present and non-null.
///
/// Unlike [`axum::Json`], every rejection (missing content type, malformed
/// JSON, wrong shape, literal `null`) answers `400 Bad Request` with the
/// common `{kind, message}` error body. Field-level rules are checked by the
/// handler afterwards.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

#[derive(Debug, thiserror::Error)]
pub enum BodyRejection {
    #[error("request body is required")]
    Missing,
    #[error("{0}")]
    Invalid(String),
}

impl IntoResponse for BodyRejection {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "kind": "INVALID_BODY",
            "message": self.to_string(),
        });
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = BodyRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Option<T>>::from_request(req, state)
            .await
            .map_err(|rejection| BodyRejection::Invalid(rejection.body_text()))?;
        value.map(Self).ok_or(BodyRejection::Missing)
    }
}
