#![allow(async_fn_in_trait)]

use uuid::Uuid;

use crate::domain::types::{Client, LockoutState, User, UserClaim};
use crate::error::ApiError;

/// Repository for client records.
///
/// Write methods return the number of rows affected; callers treat `0` as a
/// failed save.
pub trait ClientRepository: Send + Sync {
    /// All clients, ordered by name.
    async fn list(&self) -> Result<Vec<Client>, ApiError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Client>, ApiError>;
    async fn insert(&self, client: &Client) -> Result<u64, ApiError>;
    /// Overwrite name/document/phone of the row with `client.id`.
    async fn update(&self, client: &Client) -> Result<u64, ApiError>;
    async fn delete(&self, id: Uuid) -> Result<u64, ApiError>;
}

/// Identity store: users, their claims and lockout state.
pub trait UserRepository: Send + Sync {
    async fn find_by_normalized_email(&self, email: &str) -> Result<Option<User>, ApiError>;

    /// Insert a user. Returns `false` if the normalized email is already taken.
    async fn create(&self, user: &User) -> Result<bool, ApiError>;

    /// Claims and roles of a user.
    async fn claims(&self, user_id: Uuid) -> Result<Vec<UserClaim>, ApiError>;

    /// Atomically add one failed sign-in attempt and return the new count.
    async fn increment_failed_attempts(&self, user_id: Uuid) -> Result<u32, ApiError>;

    async fn save_lockout(&self, user_id: Uuid, lockout: &LockoutState) -> Result<(), ApiError>;
}
