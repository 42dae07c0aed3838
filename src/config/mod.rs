pub mod app;
pub mod database;

pub use app::AppConfig;
pub use database::{create_schema, verify_schema, DatabaseConfig};
