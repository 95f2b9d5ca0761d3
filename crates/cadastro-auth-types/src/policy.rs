//! Claim-based authorization policies.

use std::marker::PhantomData;
use std::sync::Arc;

use axum::extract::{FromRef, FromRequestParts};
use http::StatusCode;
use http::request::Parts;

use crate::identity::authenticate;
use crate::token::{JwtSettings, TokenInfo};

/// A named policy satisfied by a token carrying a given claim.
pub trait ClaimPolicy: Send + Sync + 'static {
    const NAME: &'static str;
    const CLAIM_TYPE: &'static str;
    /// `None` accepts any value of [`Self::CLAIM_TYPE`].
    const CLAIM_VALUE: Option<&'static str> = None;

    fn is_satisfied_by(info: &TokenInfo) -> bool {
        info.has_claim(Self::CLAIM_TYPE, Self::CLAIM_VALUE)
    }
}

/// Caller identity that satisfied policy `P`.
///
/// 401 without a valid bearer token, 403 when the token lacks the claim.
#[derive(Debug, Clone)]
pub struct Authorized<P> {
    pub user: TokenInfo,
    _policy: PhantomData<P>,
}

impl<P> Authorized<P> {
    pub fn into_inner(self) -> TokenInfo {
        self.user
    }
}

impl<S, P> FromRequestParts<S> for Authorized<P>
where
    S: Send + Sync,
    P: ClaimPolicy,
    Arc<JwtSettings>: FromRef<S>,
{
    type Rejection = StatusCode;

    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let settings = Arc::<JwtSettings>::from_ref(state);
        let result = authenticate(parts, &settings).and_then(|user| {
            if P::is_satisfied_by(&user) {
                Ok(Self {
                    user,
                    _policy: PhantomData,
                })
            } else {
                tracing::debug!(policy = P::NAME, user_id = %user.user_id, "policy not satisfied");
                Err(StatusCode::FORBIDDEN)
            }
        });
        async move { result }
    }
}
