use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use sqlx::sqlite::SqlitePoolOptions;
use tracing::{info, warn};

use roomgate::api;
use roomgate::config::{Config, WsUrlSource};
use roomgate::core::{
    ParticipantAuthorizer, SigningCredentials, SqliteParticipantDirectory, StaticAllowList,
    TokenIssuer,
};
use roomgate::models::AppState;
use roomgate::system;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;

    system::init_tracing(&config.log_filter);
    info!("Log level: {}", config.log_filter);
    info!("Port: {}", config.port);
    info!("Room: {}", config.room_id);
    info!(source = ?config.ws_url_source, "Media server: {}", config.ws_url);
    if config.ws_url_source == WsUrlSource::Fallback {
        warn!("LIVEKIT_WS_URL not set, advertising the local dev server");
    }

    let (authorizer, pool) = match &config.database_url {
        Some(db_url) => {
            info!("DB url: {}", db_url);
            let pool = SqlitePoolOptions::new()
                .max_connections(if db_url.contains(":memory:") { 1 } else { 5 })
                .connect(db_url)
                .await
                .context("Failed to connect to database")?;
            system::init_db(&pool, &config.allowed_participants)
                .await
                .context("Failed to initialize database")?;
            (
                Arc::new(SqliteParticipantDirectory::new(pool.clone()))
                    as Arc<dyn ParticipantAuthorizer>,
                Some(pool),
            )
        }
        None => {
            info!(
                "Allowed participants: {}",
                config.allowed_participants.join(", ")
            );
            (
                Arc::new(StaticAllowList::new(config.allowed_participants.clone()))
                    as Arc<dyn ParticipantAuthorizer>,
                None,
            )
        }
    };

    let credentials = SigningCredentials::new(config.api_key.clone(), config.api_secret.clone());
    let issuer = TokenIssuer::new(Arc::new(credentials));
    info!("Signing key: {}", issuer.key_id());
    let state = Arc::new(AppState {
        issuer,
        authorizer,
        room_id: config.room_id.clone(),
        ws_url: config.ws_url.clone(),
        static_dir: config.static_dir.clone(),
    });

    let app = api::app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Server starting on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(system::shutdown_signal(pool))
        .await?;

    info!("Server stopped");
    Ok(())
}
