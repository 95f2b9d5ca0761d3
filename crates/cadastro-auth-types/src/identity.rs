//! Bearer-token identity extractor.

use std::sync::Arc;

use axum::extract::{FromRef, FromRequestParts};
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Bearer};
use http::StatusCode;
use http::request::Parts;

use crate::token::{JwtSettings, TokenInfo, validate_access_token};

/// Caller identity taken from `Authorization: Bearer <jwt>`.
///
/// Returns 401 if the header is absent or the token does not validate against
/// the [`JwtSettings`] found in the router state.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub TokenInfo);

/// Synchronous part shared with [`crate::policy::Authorized`].
pub(crate) fn authenticate(parts: &Parts, settings: &JwtSettings) -> Result<TokenInfo, StatusCode> {
    let Authorization(bearer) = parts
        .headers
        .typed_get::<Authorization<Bearer>>()
        .ok_or(StatusCode::UNAUTHORIZED)?;
    validate_access_token(bearer.token(), settings).map_err(|e| {
        tracing::debug!(error = %e, "bearer token rejected");
        StatusCode::UNAUTHORIZED
    })
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
    Arc<JwtSettings>: FromRef<S>,
{
    type Rejection = StatusCode;

    // Extract synchronously and return a 'static future; an `async fn` here
    // would capture the `parts` lifetime (E0195 on axum-core 0.5).
    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let settings = Arc::<JwtSettings>::from_ref(state);
        let result = authenticate(parts, &settings).map(Self);
        async move { result }
    }
}
