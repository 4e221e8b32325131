// src/config.rs

use std::env;
use dotenvy::dotenv;

use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct Config {
    /// Optional so commands that never touch the database can still start.
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub rust_log: String,
    /// Directory for the daily rolling log file.
    pub log_dir: String,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL").ok();

        let database_max_connections = match env::var("DATABASE_MAX_CONNECTIONS") {
            Ok(raw) => raw.parse::<u32>().map_err(|_| {
                AppError::Config(format!("DATABASE_MAX_CONNECTIONS is not a number: {}", raw))
            })?,
            Err(_) => 5,
        };

        let rust_log = env::var("RUST_LOG")
            .unwrap_or_else(|_| "info".to_string());

        let log_dir = env::var("LOG_DIR")
            .unwrap_or_else(|_| "logs".to_string());

        Ok(Self {
            database_url,
            database_max_connections,
            rust_log,
            log_dir,
        })
    }

    pub fn database_url(&self) -> Result<&str, AppError> {
        self.database_url
            .as_deref()
            .ok_or_else(|| AppError::Config("DATABASE_URL must be set".to_string()))
    }
}
