use anyhow::{Context, Result};
use personas::api::create_routes;
use personas::config::{AppConfig, DatabaseConfig};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::from_env().context("load server configuration")?;
    let db_config = DatabaseConfig::from_env().context("load database configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    let pool = db_config
        .connect()
        .await
        .context("open personas database")?;
    info!(url = %db_config.database_url, "Database ready");

    let app = create_routes(pool, &config)?;

    let address = config.server_address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("bind {}", address))?;
    info!("Personas API listening on http://{}", address);
    info!(origins = ?config.cors_origins, "CORS allow-list");

    axum::serve(listener, app).await.context("server shutdown")?;

    Ok(())
}
