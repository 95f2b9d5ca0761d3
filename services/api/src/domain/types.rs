use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

/// Claim type used to store roles alongside ordinary claims.
pub const ROLE_CLAIM_TYPE: &str = "role";

/// Client record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Client {
    pub id: Uuid,
    pub name: String,
    pub document: String,
    pub phone: String,
}

/// Client fields supplied by a caller on create/update.
#[derive(Debug, Clone, Default)]
pub struct ClientFields {
    pub name: String,
    pub document: String,
    pub phone: String,
}

impl ClientFields {
    pub fn into_client(self, id: Uuid) -> Client {
        Client {
            id,
            name: self.name,
            document: self.document,
            phone: self.phone,
        }
    }
}

/// Identity user. The email is also the user name.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub normalized_email: String,
    pub password_hash: String,
    pub email_confirmed: bool,
    pub lockout_enabled: bool,
    pub lockout: LockoutState,
    pub created_at: DateTime<Utc>,
}

/// Authorization claim attached to a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserClaim {
    pub claim_type: String,
    pub claim_value: String,
}

impl UserClaim {
    pub fn is_role(&self) -> bool {
        self.claim_type == ROLE_CLAIM_TYPE
    }
}

/// Failed-login bookkeeping persisted with the user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LockoutState {
    pub access_failed_count: u32,
    pub lockout_end: Option<DateTime<Utc>>,
}

/// Lockout thresholds.
#[derive(Debug, Clone, Copy)]
pub struct LockoutPolicy {
    /// Failed attempts that trigger a lockout. `0` disables lockout.
    pub max_failed_attempts: u32,
    pub duration: Duration,
}

impl Default for LockoutPolicy {
    fn default() -> Self {
        Self {
            max_failed_attempts: 5,
            duration: Duration::minutes(5),
        }
    }
}

impl User {
    pub fn is_locked_out(&self, now: DateTime<Utc>) -> bool {
        self.lockout_enabled && self.lockout.lockout_end.is_some_and(|end| end > now)
    }

    /// Whether failed password checks are counted for this user.
    pub fn tracks_failed_attempts(&self, policy: &LockoutPolicy) -> bool {
        self.lockout_enabled && policy.max_failed_attempts > 0
    }

    /// Apply the failure count recorded by the store. Returns `true` if it locked the account.
    ///
    /// Reaching the threshold sets `lockout_end` and resets the counter.
    pub fn record_failed_attempt(
        &mut self,
        failed_count: u32,
        policy: &LockoutPolicy,
        now: DateTime<Utc>,
    ) -> bool {
        self.lockout.access_failed_count = failed_count;
        if failed_count < policy.max_failed_attempts {
            return false;
        }
        self.lockout = LockoutState {
            access_failed_count: 0,
            lockout_end: Some(now + policy.duration),
        };
        true
    }

    /// Clear failure bookkeeping after a successful sign-in.
    /// Returns `true` if anything changed and needs saving.
    pub fn reset_failed_attempts(&mut self) -> bool {
        if self.lockout == LockoutState::default() {
            return false;
        }
        self.lockout = LockoutState::default();
        true
    }
}

/// Canonical form used for uniqueness and lookup.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
