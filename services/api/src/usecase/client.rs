use tracing::info;
use uuid::Uuid;

use crate::domain::repository::ClientRepository;
use crate::domain::types::{Client, ClientFields};
use crate::domain::validation::validate_client;
use crate::error::ApiError;

fn ensure_saved(rows_affected: u64) -> Result<(), ApiError> {
    if rows_affected == 0 {
        return Err(ApiError::SaveFailed);
    }
    Ok(())
}

// ── ListClients ──────────────────────────────────────────────────────────────

pub struct ListClientsUseCase<R: ClientRepository> {
    pub repo: R,
}

impl<R: ClientRepository> ListClientsUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<Client>, ApiError> {
        self.repo.list().await
    }
}

// ── GetClient ────────────────────────────────────────────────────────────────

pub struct GetClientUseCase<R: ClientRepository> {
    pub repo: R,
}

impl<R: ClientRepository> GetClientUseCase<R> {
    pub async fn execute(&self, id: Uuid) -> Result<Client, ApiError> {
        self.repo.find_by_id(id).await?.ok_or(ApiError::NotFound)
    }
}

// ── CreateClient ─────────────────────────────────────────────────────────────

pub struct CreateClientUseCase<R: ClientRepository> {
    pub repo: R,
}

impl<R: ClientRepository> CreateClientUseCase<R> {
    /// Validate and insert under a freshly generated id.
    pub async fn execute(&self, fields: ClientFields) -> Result<Client, ApiError> {
        validate_client(&fields)?;
        let client = fields.into_client(Uuid::now_v7());
        ensure_saved(self.repo.insert(&client).await?)?;
        info!(client_id = %client.id, "client created");
        Ok(client)
    }
}

// ── UpdateClient ─────────────────────────────────────────────────────────────

pub struct UpdateClientInput {
    /// Id carried in the payload, if any. Must match the path id.
    pub body_id: Option<Uuid>,
    pub fields: ClientFields,
}

pub struct UpdateClientUseCase<R: ClientRepository> {
    pub repo: R,
}

impl<R: ClientRepository> UpdateClientUseCase<R> {
    pub async fn execute(&self, id: Uuid, input: UpdateClientInput) -> Result<(), ApiError> {
        if self.repo.find_by_id(id).await?.is_none() {
            return Err(ApiError::NotFound);
        }
        if input.body_id.is_some_and(|body_id| body_id != id) {
            return Err(ApiError::IdMismatch);
        }
        validate_client(&input.fields)?;
        ensure_saved(self.repo.update(&input.fields.into_client(id)).await?)?;
        info!(client_id = %id, "client updated");
        Ok(())
    }
}

// ── DeleteClient ─────────────────────────────────────────────────────────────

pub struct DeleteClientUseCase<R: ClientRepository> {
    pub repo: R,
}

impl<R: ClientRepository> DeleteClientUseCase<R> {
    pub async fn execute(&self, id: Uuid) -> Result<(), ApiError> {
        if self.repo.find_by_id(id).await?.is_none() {
            return Err(ApiError::NotFound);
        }
        ensure_saved(self.repo.delete(id).await?)?;
        info!(client_id = %id, "client deleted");
        Ok(())
    }
}
