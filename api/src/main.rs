use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;

use tf_api::{app::create_app, middleware::SecurityHeaders, routes::AppState, telemetry};
use tf_core::{
    repositories::{RevocationStore, UserRepository},
    services::{
        AuthService, AuthServiceConfig, Clock, SystemClock, TokenIssuer, TokenRevoker,
        TokenVerifier,
    },
};
use tf_infra::{
    cache::{RedisClient, RedisRevocationStore},
    database::{DatabasePool, PgUserRepository},
};
use tf_shared::config::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    telemetry::init_tracing(&config.logging);

    tracing::info!(environment = %config.environment, "Starting auth-service");

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    // Fail at startup rather than on the first login
    let issuer = TokenIssuer::new(&config.auth.jwt, Arc::clone(&clock))
        .context("JWT_SECRET environment variable is required")?;

    let database = DatabasePool::new(&config.database)
        .await
        .context("Failed to connect to the database")?;
    let users: Arc<dyn UserRepository> =
        Arc::new(PgUserRepository::new(database.get_pool().clone()));

    let redis = RedisClient::new(&config.cache)
        .await
        .context("Failed to connect to Redis")?;
    let store: Arc<dyn RevocationStore> = Arc::new(RedisRevocationStore::new(redis));

    let verifier = Arc::new(TokenVerifier::new(
        &config.auth,
        Arc::clone(&store),
        Arc::clone(&clock),
    ));
    let revoker = Arc::new(TokenRevoker::new(
        &config.auth.revocation,
        Arc::clone(&store),
        Arc::clone(&clock),
    ));

    let auth_service = Arc::new(AuthService::new(
        users,
        store,
        Arc::new(issuer),
        revoker,
        AuthServiceConfig::default(),
    ));

    let state = web::Data::new(AppState { auth_service });
    let security = SecurityHeaders::for_environment(config.environment);

    let bind_address = config.server.bind_address();
    tracing::info!(address = %bind_address, "Auth service listening");

    let mut server = HttpServer::new(move || {
        create_app(state.clone(), Arc::clone(&verifier), security)
    })
    .shutdown_timeout(30);
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run()
        .await?;

    tracing::info!("Auth service stopped");
    database.close().await;
    Ok(())
}
