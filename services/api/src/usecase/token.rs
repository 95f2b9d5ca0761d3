use chrono::Utc;
use jsonwebtoken::{EncodingKey, Header, encode};
use serde::Serialize;
use uuid::Uuid;

use cadastro_auth_types::token::{ClaimEntry, JwtClaims, JwtSettings};

use crate::domain::types::{User, UserClaim};
use crate::error::ApiError;

/// Token response returned by registration and login.
#[derive(Debug, Clone, Serialize)]
pub struct AuthToken {
    pub access_token: String,
    /// Seconds until `access_token` expires.
    pub expires_in: u64,
    pub user_token: UserToken,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserToken {
    pub id: Uuid,
    pub email: String,
    /// User claims followed by roles (`type = "role"`).
    pub claims: Vec<ClaimEntry>,
}

fn now_secs() -> u64 {
    u64::try_from(Utc::now().timestamp()).unwrap_or_default()
}

fn to_entry(claim: &UserClaim) -> ClaimEntry {
    ClaimEntry::new(claim.claim_type.clone(), claim.claim_value.clone())
}

/// Sign an access token for `user` carrying its claims and roles.
pub fn issue_token(
    user: &User,
    claims: &[UserClaim],
    settings: &JwtSettings,
) -> Result<AuthToken, ApiError> {
    let (roles, others): (Vec<&UserClaim>, Vec<&UserClaim>) =
        claims.iter().partition(|c| c.is_role());

    let now = now_secs();
    let expires_in = settings.expires_in_secs();
    let payload = JwtClaims {
        sub: user.id.to_string(),
        email: user.email.clone(),
        jti: Uuid::new_v4().to_string(),
        iat: now,
        nbf: now,
        exp: now + expires_in,
        iss: settings.issuer.clone(),
        aud: settings.audience.clone(),
        roles: roles.iter().map(|c| c.claim_value.clone()).collect(),
        claims: others.iter().copied().map(to_entry).collect(),
    };
    let access_token = encode(
        &Header::default(),
        &payload,
        &EncodingKey::from_secret(settings.secret.as_bytes()),
    )
    .map_err(|e| ApiError::Internal(e.into()))?;

    let mut token_claims: Vec<ClaimEntry> = others.into_iter().map(to_entry).collect();
    token_claims.extend(roles.into_iter().map(to_entry));

    Ok(AuthToken {
        access_token,
        expires_in,
        user_token: UserToken {
            id: user.id,
            email: user.email.clone(),
            claims: token_claims,
        },
    })
}
