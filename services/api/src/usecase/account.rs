use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use cadastro_auth_types::token::JwtSettings;

use crate::domain::repository::UserRepository;
use crate::domain::types::{LockoutPolicy, LockoutState, User, normalize_email};
use crate::domain::validation::PasswordPolicy;
use crate::error::ApiError;
use crate::usecase::password::{hash_password_blocking, verify_password_blocking};
use crate::usecase::token::{AuthToken, issue_token};

/// Identity rules applied on registration and sign-in.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentitySettings {
    pub password_policy: PasswordPolicy,
    pub lockout: LockoutPolicy,
}

fn email_taken(email: &str) -> String {
    format!("email '{email}' is already taken")
}

// ── Register ─────────────────────────────────────────────────────────────────

pub struct RegisterInput {
    pub email: String,
    pub password: String,
}

pub struct RegisterUseCase<U: UserRepository> {
    pub users: U,
    pub settings: IdentitySettings,
    pub jwt: Arc<JwtSettings>,
}

impl<U: UserRepository> RegisterUseCase<U> {
    /// Create a confirmed user and sign them in.
    ///
    /// Duplicate email and password-policy violations are reported together.
    pub async fn execute(&self, input: RegisterInput) -> Result<AuthToken, ApiError> {
        let email = input.email.trim().to_owned();
        let normalized_email = normalize_email(&email);

        let mut errors = Vec::new();
        if self
            .users
            .find_by_normalized_email(&normalized_email)
            .await?
            .is_some()
        {
            errors.push(email_taken(&email));
        }
        errors.extend(self.settings.password_policy.violations(&input.password));
        if !errors.is_empty() {
            return Err(ApiError::RegistrationFailed(errors));
        }

        let user = User {
            id: Uuid::now_v7(),
            email,
            normalized_email,
            password_hash: hash_password_blocking(input.password).await?,
            email_confirmed: true,
            lockout_enabled: true,
            lockout: LockoutState::default(),
            created_at: Utc::now(),
        };
        // Lost a race with a concurrent registration of the same email.
        if !self.users.create(&user).await? {
            return Err(ApiError::RegistrationFailed(vec![email_taken(&user.email)]));
        }
        info!(user_id = %user.id, "user registered");

        let claims = self.users.claims(user.id).await?;
        issue_token(&user, &claims, &self.jwt)
    }
}

// ── Login ────────────────────────────────────────────────────────────────────

pub struct LoginInput {
    pub email: String,
    pub password: String,
}

pub struct LoginUseCase<U: UserRepository> {
    pub users: U,
    pub settings: IdentitySettings,
    pub jwt: Arc<JwtSettings>,
}

impl<U: UserRepository> LoginUseCase<U> {
    /// Password sign-in with lockout tracking.
    pub async fn execute(&self, input: LoginInput) -> Result<AuthToken, ApiError> {
        let Some(mut user) = self
            .users
            .find_by_normalized_email(&normalize_email(&input.email))
            .await?
        else {
            warn!("login attempt for unknown email");
            return Err(ApiError::InvalidCredentials);
        };

        let now = Utc::now();
        if user.is_locked_out(now) {
            warn!(user_id = %user.id, "login attempt on locked account");
            return Err(ApiError::AccountLocked);
        }

        if !verify_password_blocking(input.password, user.password_hash.clone()).await? {
            let policy = &self.settings.lockout;
            if user.tracks_failed_attempts(policy) {
                let failed = self.users.increment_failed_attempts(user.id).await?;
                if user.record_failed_attempt(failed, policy, now) {
                    self.users.save_lockout(user.id, &user.lockout).await?;
                    warn!(user_id = %user.id, until = ?user.lockout.lockout_end, "account locked");
                    return Err(ApiError::AccountLocked);
                }
            }
            warn!(user_id = %user.id, "invalid password");
            return Err(ApiError::InvalidCredentials);
        }

        if user.reset_failed_attempts() {
            self.users.save_lockout(user.id, &user.lockout).await?;
        }
        info!(user_id = %user.id, "user signed in");

        let claims = self.users.claims(user.id).await?;
        issue_token(&user, &claims, &self.jwt)
    }
}
