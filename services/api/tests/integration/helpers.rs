#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use uuid::Uuid;

use cadastro_api::domain::repository::UserRepository;
use cadastro_api::domain::types::{LockoutPolicy, LockoutState, User, UserClaim, normalize_email};
use cadastro_api::error::ApiError;
use cadastro_api::usecase::account::IdentitySettings;
use cadastro_api::usecase::password::hash_password;
use cadastro_auth_types::token::JwtSettings;

pub const TEST_JWT_SECRET: &str = "test-secret-key-for-integration-tests";
pub const TEST_PASSWORD: &str = "Senha@123";

pub fn test_jwt_settings() -> JwtSettings {
    JwtSettings {
        secret: TEST_JWT_SECRET.to_owned(),
        issuer: "cadastro".to_owned(),
        audience: "https://localhost".to_owned(),
        expiration_hours: 2,
    }
}

pub fn test_identity_settings(max_failed_attempts: u32) -> IdentitySettings {
    IdentitySettings {
        lockout: LockoutPolicy {
            max_failed_attempts,
            ..LockoutPolicy::default()
        },
        ..IdentitySettings::default()
    }
}

pub fn test_user(email: &str) -> User {
    User {
        id: Uuid::now_v7(),
        email: email.to_owned(),
        normalized_email: normalize_email(email),
        password_hash: hash_password(TEST_PASSWORD).unwrap(),
        email_confirmed: true,
        lockout_enabled: true,
        lockout: LockoutState::default(),
        created_at: Utc::now(),
    }
}

// ── MockUserRepo ─────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockUserRepo {
    pub users: Arc<Mutex<Vec<User>>>,
    pub claims: Arc<Mutex<HashMap<Uuid, Vec<UserClaim>>>>,
}

impl MockUserRepo {
    pub fn new(users: Vec<User>) -> Self {
        Self {
            users: Arc::new(Mutex::new(users)),
            ..Self::default()
        }
    }

    pub fn with_claims(self, user_id: Uuid, claims: Vec<UserClaim>) -> Self {
        self.claims.lock().unwrap().insert(user_id, claims);
        self
    }

    pub fn user(&self, normalized_email: &str) -> Option<User> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.normalized_email == normalized_email)
            .cloned()
    }

    pub fn user_count(&self) -> usize {
        self.users.lock().unwrap().len()
    }
}

impl UserRepository for MockUserRepo {
    async fn find_by_normalized_email(&self, email: &str) -> Result<Option<User>, ApiError> {
        Ok(self.user(email))
    }

    async fn create(&self, user: &User) -> Result<bool, ApiError> {
        let mut users = self.users.lock().unwrap();
        if users
            .iter()
            .any(|u| u.normalized_email == user.normalized_email)
        {
            return Ok(false);
        }
        users.push(user.clone());
        Ok(true)
    }

    async fn claims(&self, user_id: Uuid) -> Result<Vec<UserClaim>, ApiError> {
        Ok(self
            .claims
            .lock()
            .unwrap()
            .get(&user_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn increment_failed_attempts(&self, user_id: Uuid) -> Result<u32, ApiError> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or_else(|| anyhow::anyhow!("unknown user {user_id}"))?;
        user.lockout.access_failed_count += 1;
        Ok(user.lockout.access_failed_count)
    }

    async fn save_lockout(&self, user_id: Uuid, lockout: &LockoutState) -> Result<(), ApiError> {
        if let Some(user) = self
            .users
            .lock()
            .unwrap()
            .iter_mut()
            .find(|u| u.id == user_id)
        {
            user.lockout = *lockout;
        }
        Ok(())
    }
}
