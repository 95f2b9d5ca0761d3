use chrono::Duration;
use serde::Deserialize;

use cadastro_auth_types::token::JwtSettings;
use cadastro_core::config::{Config, LogFormat};

use crate::domain::types::LockoutPolicy;
use crate::domain::validation::PasswordPolicy;
use crate::usecase::account::IdentitySettings;

/// API service configuration loaded from environment variables.
#[derive(Debug, Deserialize)]
pub struct ApiConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// TCP port to listen on (default 3000). Env var: `API_PORT`.
    #[serde(default = "default_api_port")]
    pub api_port: u16,
    /// Apply pending migrations before serving. Env var: `RUN_MIGRATIONS`.
    #[serde(default)]
    pub run_migrations: bool,
    #[serde(default)]
    pub log_format: LogFormat,

    /// HMAC secret for signing access tokens.
    pub jwt_secret: String,
    #[serde(default = "default_jwt_issuer")]
    pub jwt_issuer: String,
    #[serde(default = "default_jwt_audience")]
    pub jwt_audience: String,
    #[serde(default = "default_jwt_expiration_hours")]
    pub jwt_expiration_hours: u64,

    /// Failed logins before lockout; `0` disables lockout.
    #[serde(default = "default_lockout_max_failed_attempts")]
    pub lockout_max_failed_attempts: u32,
    #[serde(default = "default_lockout_duration_secs")]
    pub lockout_duration_secs: i64,

    #[serde(default = "default_password_min_length")]
    pub password_min_length: usize,
    #[serde(default = "enabled")]
    pub password_require_digit: bool,
    #[serde(default = "enabled")]
    pub password_require_lowercase: bool,
    #[serde(default = "enabled")]
    pub password_require_uppercase: bool,
    #[serde(default = "enabled")]
    pub password_require_non_alphanumeric: bool,
}

impl Config for ApiConfig {}

fn default_api_port() -> u16 {
    3000
}

fn default_jwt_issuer() -> String {
    "cadastro".to_owned()
}

fn default_jwt_audience() -> String {
    "https://localhost".to_owned()
}

fn default_jwt_expiration_hours() -> u64 {
    2
}

fn default_lockout_max_failed_attempts() -> u32 {
    5
}

fn default_lockout_duration_secs() -> i64 {
    300
}

fn default_password_min_length() -> usize {
    6
}

fn enabled() -> bool {
    true
}

impl ApiConfig {
    pub fn jwt_settings(&self) -> JwtSettings {
        JwtSettings {
            secret: self.jwt_secret.clone(),
            issuer: self.jwt_issuer.clone(),
            audience: self.jwt_audience.clone(),
            expiration_hours: self.jwt_expiration_hours,
        }
    }

    pub fn identity_settings(&self) -> IdentitySettings {
        IdentitySettings {
            password_policy: PasswordPolicy {
                min_length: self.password_min_length,
                require_digit: self.password_require_digit,
                require_lowercase: self.password_require_lowercase,
                require_uppercase: self.password_require_uppercase,
                require_non_alphanumeric: self.password_require_non_alphanumeric,
            },
            lockout: LockoutPolicy {
                max_failed_attempts: self.lockout_max_failed_attempts,
                duration: Duration::seconds(self.lockout_duration_secs),
            },
        }
    }
}
