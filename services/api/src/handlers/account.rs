use axum::{Json, extract::State};
use serde::Deserialize;

use cadastro_core::extract::JsonBody;

use crate::domain::validation::validate_credentials;
use crate::error::ApiError;
use crate::state::AppState;
use crate::usecase::account::{LoginInput, LoginUseCase, RegisterInput, RegisterUseCase};
use crate::usecase::token::AuthToken;

/// Body shared by `/registro` and `/login`. Missing fields deserialize as
/// empty strings so they surface as validation errors rather than 400s.
#[derive(Deserialize)]
pub struct CredentialsRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

// ── POST /registro ───────────────────────────────────────────────────────────

pub async fn register(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<CredentialsRequest>,
) -> Result<Json<AuthToken>, ApiError> {
    validate_credentials(&body.email, &body.password)?;

    let usecase = RegisterUseCase {
        users: state.user_repo(),
        settings: state.identity,
        jwt: state.jwt.clone(),
    };
    let token = usecase
        .execute(RegisterInput {
            email: body.email,
            password: body.password,
        })
        .await?;
    Ok(Json(token))
}

// ── POST /login ──────────────────────────────────────────────────────────────

pub async fn login(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<CredentialsRequest>,
) -> Result<Json<AuthToken>, ApiError> {
    validate_credentials(&body.email, &body.password)?;

    let usecase = LoginUseCase {
        users: state.user_repo(),
        settings: state.identity,
        jwt: state.jwt.clone(),
    };
    let token = usecase
        .execute(LoginInput {
            email: body.email,
            password: body.password,
        })
        .await?;
    Ok(Json(token))
}
