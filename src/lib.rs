//! User records service: a small HTTP API over the `personas` SQLite table.

pub mod api;
pub mod client;
pub mod config;
pub mod models;
pub mod services;
