use std::sync::Arc;

use actix_web::HttpServer;
use anyhow::Context;

use lb_api::{create_app, logging::init_logging, AppState};
use lb_core::services::{BcryptPasswordHasher, BlobService, SessionService, TokenCodec};
use lb_infra::{
    DatabasePool, DiskBlobStorage, MySqlBlobMetaRepository, MySqlRefreshTokenRepository,
    MySqlUserRepository,
};
use lb_shared::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Missing secrets stop the process here, before anything listens
    let config_path = std::env::var("LOCKBOX_CONFIG").ok();
    let config = AppConfig::load(config_path.as_deref()).context("Failed to load configuration")?;

    init_logging(&config.logging());
    tracing::info!(environment = %config.environment, "Starting Lockbox API server");

    let pool = DatabasePool::new(&config.database)
        .await
        .context("Failed to connect to database")?;
    if !pool.health_check().await.context("Database health check failed")? {
        anyhow::bail!("Database health check returned an unexpected result");
    }
    tracing::info!(stats = %pool.get_statistics(), "Database pool ready");

    let codec = TokenCodec::new((&config.jwt).into()).context("Invalid token configuration")?;
    let sessions = Arc::new(SessionService::new(
        Arc::new(MySqlUserRepository::new(pool.get_pool().clone())),
        Arc::new(MySqlRefreshTokenRepository::new(pool.get_pool().clone())),
        Arc::new(BcryptPasswordHasher::new()),
        Arc::new(codec),
    ));

    let storage = DiskBlobStorage::new(&config.storage.upload_dir)
        .await
        .context("Failed to prepare upload directory")?;
    let blobs = Arc::new(BlobService::new(
        Arc::new(storage),
        Arc::new(MySqlBlobMetaRepository::new(pool.get_pool().clone())),
    ));

    let state = AppState::new(sessions, blobs).with_server(config.server.clone(), config.environment);
    let bind_address = config.server.bind_address();
    tracing::info!(address = %bind_address, "Server will bind");

    HttpServer::new(move || create_app(state.clone()))
        .shutdown_timeout(config.server.shutdown_timeout)
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run()
        .await?;

    tracing::info!("Server stopped, closing database pool");
    pool.close().await;
    Ok(())
}
