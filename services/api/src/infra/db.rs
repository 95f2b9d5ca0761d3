use anyhow::Context as _;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, SqlErr, sea_query::Expr,
};
use uuid::Uuid;

use cadastro_api_schema::{clientes, user_claims, users};

use crate::domain::repository::{ClientRepository, UserRepository};
use crate::domain::types::{Client, LockoutState, User, UserClaim};
use crate::error::ApiError;

// ── Client repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbClientRepository {
    pub db: DatabaseConnection,
}

impl ClientRepository for DbClientRepository {
    async fn list(&self) -> Result<Vec<Client>, ApiError> {
        let models = clientes::Entity::find()
            .order_by_asc(clientes::Column::Name)
            .all(&self.db)
            .await
            .context("list clients")?;
        Ok(models.into_iter().map(client_from_model).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Client>, ApiError> {
        let model = clientes::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find client by id")?;
        Ok(model.map(client_from_model))
    }

    async fn insert(&self, client: &Client) -> Result<u64, ApiError> {
        let rows = clientes::Entity::insert(client_active_model(client))
            .exec_without_returning(&self.db)
            .await
            .context("insert client")?;
        Ok(rows)
    }

    async fn update(&self, client: &Client) -> Result<u64, ApiError> {
        let result = clientes::Entity::update_many()
            .set(clientes::ActiveModel {
                name: Set(client.name.clone()),
                document: Set(client.document.clone()),
                phone: Set(client.phone.clone()),
                ..Default::default()
            })
            .filter(clientes::Column::Id.eq(client.id))
            .exec(&self.db)
            .await
            .context("update client")?;
        Ok(result.rows_affected)
    }

    async fn delete(&self, id: Uuid) -> Result<u64, ApiError> {
        let result = clientes::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete client")?;
        Ok(result.rows_affected)
    }
}

fn client_active_model(client: &Client) -> clientes::ActiveModel {
    clientes::ActiveModel {
        id: Set(client.id),
        name: Set(client.name.clone()),
        document: Set(client.document.clone()),
        phone: Set(client.phone.clone()),
    }
}

fn client_from_model(model: clientes::Model) -> Client {
    Client {
        id: model.id,
        name: model.name,
        document: model.document,
        phone: model.phone,
    }
}

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_normalized_email(&self, email: &str) -> Result<Option<User>, ApiError> {
        let model = users::Entity::find()
            .filter(users::Column::NormalizedEmail.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        Ok(model.map(user_from_model))
    }

    async fn create(&self, user: &User) -> Result<bool, ApiError> {
        let result = users::ActiveModel {
            id: Set(user.id),
            email: Set(user.email.clone()),
            normalized_email: Set(user.normalized_email.clone()),
            password_hash: Set(user.password_hash.clone()),
            email_confirmed: Set(user.email_confirmed),
            lockout_enabled: Set(user.lockout_enabled),
            access_failed_count: Set(failed_count_to_db(user.lockout.access_failed_count)),
            lockout_end: Set(user.lockout.lockout_end),
            created_at: Set(user.created_at),
        }
        .insert(&self.db)
        .await;
        match result {
            Ok(_) => Ok(true),
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                Ok(false)
            }
            Err(e) => Err(anyhow::Error::new(e).context("create user").into()),
        }
    }

    async fn claims(&self, user_id: Uuid) -> Result<Vec<UserClaim>, ApiError> {
        let models = user_claims::Entity::find()
            .filter(user_claims::Column::UserId.eq(user_id))
            .order_by_asc(user_claims::Column::ClaimType)
            .all(&self.db)
            .await
            .context("list user claims")?;
        Ok(models
            .into_iter()
            .map(|m| UserClaim {
                claim_type: m.claim_type,
                claim_value: m.claim_value,
            })
            .collect())
    }

    async fn increment_failed_attempts(&self, user_id: Uuid) -> Result<u32, ApiError> {
        let updated = users::Entity::update_many()
            .col_expr(
                users::Column::AccessFailedCount,
                Expr::col(users::Column::AccessFailedCount).add(1),
            )
            .filter(users::Column::Id.eq(user_id))
            .exec_with_returning(&self.db)
            .await
            .context("increment failed attempts")?;
        let model = updated
            .into_iter()
            .next()
            .with_context(|| format!("user {user_id} not found while counting failed attempts"))?;
        Ok(u32::try_from(model.access_failed_count).unwrap_or_default())
    }

    async fn save_lockout(&self, user_id: Uuid, lockout: &LockoutState) -> Result<(), ApiError> {
        users::ActiveModel {
            id: Set(user_id),
            access_failed_count: Set(failed_count_to_db(lockout.access_failed_count)),
            lockout_end: Set(lockout.lockout_end),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("save user lockout state")?;
        Ok(())
    }
}

fn failed_count_to_db(count: u32) -> i32 {
    i32::try_from(count).unwrap_or(i32::MAX)
}

fn user_from_model(model: users::Model) -> User {
    User {
        id: model.id,
        email: model.email,
        normalized_email: model.normalized_email,
        password_hash: model.password_hash,
        email_confirmed: model.email_confirmed,
        lockout_enabled: model.lockout_enabled,
        lockout: LockoutState {
            access_failed_count: u32::try_from(model.access_failed_count).unwrap_or_default(),
            lockout_end: model.lockout_end,
        },
        created_at: model.created_at,
    }
}
