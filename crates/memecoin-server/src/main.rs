//! # Meme Coin API Server
//!
//! Loads configuration, connects MySQL and Redis, and serves the REST API
//! until Ctrl+C or SIGTERM.

use memecoin_config::{AppConfig, ConfigLoader};
use memecoin_core::{MemeCoinError, MemeCoinResult};
use memecoin_repository::{DatabasePool, DatabasePoolInterface};
use memecoin_rest::create_router;
use memecoin_server::{
    di::{build_module, create_redis_pool, health_checks},
    logging::init_logging,
    startup::{print_banner, print_startup_info, shutdown_signal},
};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let config = match ConfigLoader::from_default_location() {
        Ok(loader) => loader.get().await,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config.observability);
    print_banner();

    info!("Starting Meme Coin API Server...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));
    info!("Environment: {}", config.app.environment);

    if let Err(e) = run(config).await {
        error!("Application error: {}", e);
        std::process::exit(1);
    }
}

async fn run(config: AppConfig) -> MemeCoinResult<()> {
    let db_pool = DatabasePool::connect(&config.database).await?;

    if config.database.run_migrations {
        db_pool.run_migrations().await?;
    }

    let redis_pool = create_redis_pool(&config.redis)?;

    let module = build_module(&db_pool, redis_pool.clone(), &config.cache);
    let checks = health_checks(&db_pool, redis_pool, &config.cache);
    let router = create_router(module.as_ref(), checks, &config.server);

    let addr = config.server.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| MemeCoinError::Internal(format!("Failed to bind {addr}: {e}")))?;

    print_startup_info(&addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| MemeCoinError::Internal(format!("REST server error: {e}")))?;

    db_pool.close().await;
    info!("Server shutdown complete");
    Ok(())
}
