use sqlx::SqlitePool;
use tokio::signal;
use tracing::info;

/// Resolves on Ctrl+C or SIGTERM, then closes the database pool if any.
pub async fn shutdown_signal(pool: Option<SqlitePool>) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
    if let Some(pool) = pool {
        info!("Closing database connections");
        pool.close().await;
    }
}
