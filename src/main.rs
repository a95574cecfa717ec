use clap::Parser;
use sea_orm::Database;
use sea_orm_migration::MigratorTrait;
use tracing_subscriber::EnvFilter;

use calspend::{AppState, Config, Migrator, router};

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutting down");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("calspend=info,tower_http=info")),
        )
        .init();

    let config = Config::parse();

    let db = Database::connect(config.database_url.as_str()).await?;
    if config.migrate {
        Migrator::up(&db, None).await?;
        tracing::info!("Migrations applied");
    }

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    tracing::info!(
        addr = %listener.local_addr()?,
        max_page_size = config.max_page_size,
        "Listening"
    );

    let app = router(AppState::new(db, config));
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
