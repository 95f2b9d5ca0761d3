use std::sync::Arc;

use axum::extract::FromRef;
use sea_orm::DatabaseConnection;

use cadastro_auth_types::token::JwtSettings;

use crate::infra::db::{DbClientRepository, DbUserRepository};
use crate::usecase::account::IdentitySettings;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub jwt: Arc<JwtSettings>,
    pub identity: IdentitySettings,
}

impl AppState {
    pub fn client_repo(&self) -> DbClientRepository {
        DbClientRepository {
            db: self.db.clone(),
        }
    }

    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }
}

impl FromRef<AppState> for Arc<JwtSettings> {
    fn from_ref(state: &AppState) -> Self {
        Arc::clone(&state.jwt)
    }
}
