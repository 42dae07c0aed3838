//! Creates one record through the API and lists everyone sharing its profession.

use anyhow::{Context, Result};
use personas::client::UsersClient;
use personas::models::CreateUserRecord;
use std::env;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let api_url = env::var("API_URL").unwrap_or_else(|_| "http://localhost:8000".to_string());
    let client = UsersClient::new(&api_url).context("create API client")?;

    let user = CreateUserRecord {
        username: "pedro".to_string(),
        nacimiento: "1990-01-01".to_string(),
        numero: "123456789".to_string(),
        gmail: "pedro@pedro.com".to_string(),
        profesion: "programador".to_string(),
        certificado_n: "N-0001".to_string(),
    };

    let created = client
        .create_user(&user)
        .await
        .with_context(|| format!("create user at {}", api_url))?;
    tracing::info!(id = created.id, "Created user");

    let peers = client
        .list_users_by_profession(&created.profesion)
        .await
        .context("list users by profession")?;

    println!("{}", serde_json::to_string_pretty(&peers)?);

    Ok(())
}
