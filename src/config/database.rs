use anyhow::{bail, Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::env;
use std::str::FromStr;
use std::time::Duration;

pub const PERSONAS_TABLE: &str = "personas";

pub const PERSONAS_COLUMNS: [&str; 7] = [
    "id",
    "username",
    "nacimiento",
    "numero",
    "gmail",
    "profesion",
    "certificado_N",
];

pub const PERSONAS_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS personas (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    username      TEXT NOT NULL,
    nacimiento    TEXT NOT NULL,
    numero        TEXT NOT NULL,
    gmail         TEXT NOT NULL,
    profesion     TEXT NOT NULL,
    certificado_N TEXT NOT NULL
)
"#;

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub connect_timeout: Duration,
    /// Create the database file and the `personas` table when missing.
    pub create_schema: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite://personas.db".to_string(),
            max_connections: 5,
            connect_timeout: Duration::from_secs(30),
            create_schema: true,
        }
    }
}

impl DatabaseConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let database_url = env::var("DATABASE_URL").unwrap_or(defaults.database_url);

        let max_connections = match env::var("DB_MAX_CONNECTIONS") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("DB_MAX_CONNECTIONS must be a number, got {:?}", raw))?,
            Err(_) => defaults.max_connections,
        };

        let connect_timeout = match env::var("DB_CONNECT_TIMEOUT") {
            Ok(raw) => Duration::from_secs(
                raw.parse()
                    .with_context(|| format!("DB_CONNECT_TIMEOUT must be seconds, got {:?}", raw))?,
            ),
            Err(_) => defaults.connect_timeout,
        };

        let create_schema = match env::var("DB_CREATE_SCHEMA") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("DB_CREATE_SCHEMA must be true or false, got {:?}", raw))?,
            Err(_) => defaults.create_schema,
        };

        Ok(DatabaseConfig {
            database_url,
            max_connections,
            connect_timeout,
            create_schema,
        })
    }

    pub fn for_url(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            ..Self::default()
        }
    }

    pub async fn create_pool(&self) -> Result<SqlitePool> {
        let options = SqliteConnectOptions::from_str(&self.database_url)
            .with_context(|| format!("invalid DATABASE_URL {:?}", self.database_url))?
            .create_if_missing(self.create_schema);

        let pool = SqlitePoolOptions::new()
            .max_connections(self.max_connections)
            .acquire_timeout(self.connect_timeout)
            .connect_with(options)
            .await
            .with_context(|| format!("connect to sqlite via {}", self.database_url))?;

        Ok(pool)
    }

    /// Opens the pool and makes sure the `personas` table is usable.
    pub async fn connect(&self) -> Result<SqlitePool> {
        let pool = self.create_pool().await?;
        if self.create_schema {
            create_schema(&pool).await?;
        }
        verify_schema(&pool).await?;
        Ok(pool)
    }
}

pub async fn create_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::query(PERSONAS_SCHEMA)
        .execute(pool)
        .await
        .context("create personas table")?;
    Ok(())
}

/// Fails when the `personas` table is absent or is missing a column.
pub async fn verify_schema(pool: &SqlitePool) -> Result<()> {
    let sql = format!("SELECT name FROM pragma_table_info('{}')", PERSONAS_TABLE);
    let columns: Vec<String> = sqlx::query_scalar(&sql)
        .fetch_all(pool)
        .await
        .context("inspect personas table")?;

    if columns.is_empty() {
        bail!("table {} does not exist", PERSONAS_TABLE);
    }

    let missing: Vec<&str> = PERSONAS_COLUMNS
        .iter()
        .copied()
        .filter(|expected| !columns.iter().any(|c| c.eq_ignore_ascii_case(expected)))
        .collect();

    if !missing.is_empty() {
        bail!(
            "table {} is missing columns: {}",
            PERSONAS_TABLE,
            missing.join(", ")
        );
    }

    Ok(())
}
