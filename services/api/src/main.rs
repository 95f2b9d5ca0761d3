use std::sync::Arc;

use anyhow::Context as _;
use sea_orm::Database;
use tracing::info;

use cadastro_api::config::ApiConfig;
use cadastro_api::router::build_router;
use cadastro_api::state::AppState;
use cadastro_api_migration::{Migrator, MigratorTrait};
use cadastro_core::{config::Config, tracing::init_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ApiConfig::from_env().context("invalid configuration")?;
    init_tracing(config.log_format);

    let db = Database::connect(&config.database_url)
        .await
        .context("failed to connect to database")?;

    if config.run_migrations {
        Migrator::up(&db, None)
            .await
            .context("failed to apply migrations")?;
        info!("migrations applied");
    }

    let state = AppState {
        db,
        jwt: Arc::new(config.jwt_settings()),
        identity: config.identity_settings(),
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.api_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!("api listening on {addr}");
    axum::serve(listener, router).await.context("server error")?;
    Ok(())
}
