//! JWT settings, claims payload and access-token validation.

use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Signing and validation settings shared by the token issuer and every
/// extractor that checks bearer tokens.
#[derive(Debug, Clone)]
pub struct JwtSettings {
    /// HMAC secret for HS256.
    pub secret: String,
    /// `iss` claim written on issue and required on validation.
    pub issuer: String,
    /// `aud` claim written on issue and required on validation.
    pub audience: String,
    /// Token lifetime in hours.
    pub expiration_hours: u64,
}

impl JwtSettings {
    pub fn expires_in_secs(&self) -> u64 {
        self.expiration_hours * 3600
    }
}

/// A `(type, value)` authorization attribute carried inside the token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimEntry {
    #[serde(rename = "type")]
    pub claim_type: String,
    pub value: String,
}

impl ClaimEntry {
    pub fn new(claim_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            claim_type: claim_type.into(),
            value: value.into(),
        }
    }
}

/// JWT claims payload.
///
/// | Field | Meaning |
/// |-------|---------|
/// | `sub` | user id (UUID string) |
/// | `email` | user email |
/// | `jti` | unique token id |
/// | `iat` / `nbf` / `exp` | seconds since epoch |
/// | `iss` / `aud` | from [`JwtSettings`] |
/// | `roles` | user roles |
/// | `claims` | user claims other than roles |
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String,
    pub email: String,
    pub jti: String,
    pub iat: u64,
    pub nbf: u64,
    pub exp: u64,
    pub iss: String,
    pub aud: String,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub claims: Vec<ClaimEntry>,
}

/// Identity extracted from a validated access token.
#[derive(Debug, Clone)]
pub struct TokenInfo {
    pub user_id: Uuid,
    pub email: String,
    pub roles: Vec<String>,
    pub claims: Vec<ClaimEntry>,
}

impl TokenInfo {
    /// True if the token carries a claim of `claim_type`, with `value` if given.
    pub fn has_claim(&self, claim_type: &str, value: Option<&str>) -> bool {
        self.claims
            .iter()
            .any(|c| c.claim_type == claim_type && value.is_none_or(|v| c.value == v))
    }
}

/// Errors returned by [`validate_access_token`].
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("token not valid for this issuer or audience")]
    WrongAudience,
    #[error("malformed token")]
    Malformed,
}

/// Validation: HS256, `exp` and `nbf` checked with the default 60s leeway,
/// `iss`/`aud` must match the settings.
fn validation(settings: &JwtSettings) -> Validation {
    let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.validate_exp = true;
    validation.validate_nbf = true;
    validation.set_issuer(&[settings.issuer.as_str()]);
    validation.set_audience(&[settings.audience.as_str()]);
    validation.set_required_spec_claims(&["exp", "sub", "iss", "aud"]);
    validation
}

/// Validate a bearer token value, returning the caller identity.
pub fn validate_access_token(token: &str, settings: &JwtSettings) -> Result<TokenInfo, AuthError> {
    let data = decode::<JwtClaims>(
        token,
        &DecodingKey::from_secret(settings.secret.as_bytes()),
        &validation(settings),
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidSignature => AuthError::InvalidSignature,
        jsonwebtoken::errors::ErrorKind::InvalidIssuer
        | jsonwebtoken::errors::ErrorKind::InvalidAudience => AuthError::WrongAudience,
        _ => AuthError::Malformed,
    })?;

    let claims = data.claims;
    let user_id = claims
        .sub
        .parse::<Uuid>()
        .map_err(|_| AuthError::Malformed)?;
    Ok(TokenInfo {
        user_id,
        email: claims.email,
        roles: claims.roles,
        claims: claims.claims,
    })
}
