use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use cadastro_auth_types::{identity::AuthenticatedUser, policy::Authorized};
use cadastro_core::extract::JsonBody;

use crate::domain::types::{Client, ClientFields};
use crate::error::ApiError;
use crate::policy::DeleteClientPolicy;
use crate::state::AppState;
use crate::usecase::client::{
    CreateClientUseCase, DeleteClientUseCase, GetClientUseCase, ListClientsUseCase,
    UpdateClientInput, UpdateClientUseCase,
};

#[derive(Deserialize)]
pub struct ClientRequest {
    pub id: Option<Uuid>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub document: String,
    #[serde(default)]
    pub phone: String,
}

impl ClientRequest {
    fn into_fields(self) -> ClientFields {
        ClientFields {
            name: self.name,
            document: self.document,
            phone: self.phone,
        }
    }
}

#[derive(Serialize)]
pub struct ClientResponse {
    pub id: Uuid,
    pub name: String,
    pub document: String,
    pub phone: String,
}

impl From<Client> for ClientResponse {
    fn from(client: Client) -> Self {
        Self {
            id: client.id,
            name: client.name,
            document: client.document,
            phone: client.phone,
        }
    }
}

// ── GET /cliente ─────────────────────────────────────────────────────────────

pub async fn list_clients(
    State(state): State<AppState>,
) -> Result<Json<Vec<ClientResponse>>, ApiError> {
    let usecase = ListClientsUseCase {
        repo: state.client_repo(),
    };
    let clients = usecase.execute().await?;
    Ok(Json(clients.into_iter().map(ClientResponse::from).collect()))
}

// ── GET /cliente/{id} ────────────────────────────────────────────────────────

pub async fn get_client(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ClientResponse>, ApiError> {
    let usecase = GetClientUseCase {
        repo: state.client_repo(),
    };
    let client = usecase.execute(id).await?;
    Ok(Json(client.into()))
}

// ── POST /cliente ────────────────────────────────────────────────────────────

pub async fn create_client(
    _user: AuthenticatedUser,
    State(state): State<AppState>,
    JsonBody(body): JsonBody<ClientRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let usecase = CreateClientUseCase {
        repo: state.client_repo(),
    };
    let client = usecase.execute(body.into_fields()).await?;
    let location = format!("/cliente/{}", client.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(ClientResponse::from(client)),
    ))
}

// ── PUT /cliente/{id} ────────────────────────────────────────────────────────

pub async fn update_client(
    _user: AuthenticatedUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    JsonBody(body): JsonBody<ClientRequest>,
) -> Result<StatusCode, ApiError> {
    let usecase = UpdateClientUseCase {
        repo: state.client_repo(),
    };
    usecase
        .execute(
            id,
            UpdateClientInput {
                body_id: body.id,
                fields: body.into_fields(),
            },
        )
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── DELETE /cliente/{id} ─────────────────────────────────────────────────────

pub async fn delete_client(
    auth: Authorized<DeleteClientPolicy>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let caller = auth.into_inner();
    info!(client_id = %id, user_id = %caller.user_id, "client delete authorized");
    let usecase = DeleteClientUseCase {
        repo: state.client_repo(),
    };
    usecase.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
