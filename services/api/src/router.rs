use axum::{
    Router,
    routing::{delete, get, post, put},
};

use cadastro_core::middleware::{propagate_request_id_layer, request_id_layer, trace_layer};

use crate::handlers::{
    account::{login, register},
    client::{create_client, delete_client, get_client, list_clients, update_client},
    health::{healthz, readyz},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Identity
        .route("/registro", post(register))
        .route("/login", post(login))
        // Clients
        .route("/cliente", get(list_clients))
        .route("/cliente", post(create_client))
        .route("/cliente/{id}", get(get_client))
        .route("/cliente/{id}", put(update_client))
        .route("/cliente/{id}", delete(delete_client))
        // Outermost last: the request id is set before the span reads it.
        .layer(propagate_request_id_layer())
        .layer(trace_layer())
        .layer(request_id_layer())
        .with_state(state)
}
