use anyhow::{Context, Result};
use std::env;

pub const DEFAULT_CORS_ORIGINS: [&str; 4] = [
    "http://localhost:5500",
    "http://127.0.0.1:5500",
    "http://localhost:5501",
    "http://127.0.0.1:5501",
];

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub cors_origins: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            log_level: "info".to_string(),
            cors_origins: DEFAULT_CORS_ORIGINS.iter().map(|o| o.to_string()).collect(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let host = env::var("HOST").unwrap_or(defaults.host);
        let port = match env::var("PORT") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("PORT must be a port number, got {:?}", raw))?,
            Err(_) => defaults.port,
        };
        let log_level = env::var("LOG_LEVEL").unwrap_or(defaults.log_level);
        let cors_origins = match env::var("CORS_ORIGINS") {
            Ok(raw) => parse_origins(&raw),
            Err(_) => defaults.cors_origins,
        };

        Ok(AppConfig {
            host,
            port,
            log_level,
            cors_origins,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}
