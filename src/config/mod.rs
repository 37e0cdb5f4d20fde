//! Configuration module for the portfolio shell.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::errors::AppError;

/// Simulated round-trip latency of the guestbook store, in milliseconds.
pub const DEFAULT_LATENCY_MS: u64 = 800;

/// Which durable blob backend the guestbook writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// Process-local map, lost on restart
    Memory,
    /// SQLite key/value table at `db_path`
    Sqlite,
}

impl StorageBackend {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Some(StorageBackend::Memory),
            "sqlite" => Some(StorageBackend::Sqlite),
            _ => None,
        }
    }
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Durable blob backend
    pub storage: StorageBackend,
    /// Path to SQLite database file (sqlite backend only)
    pub db_path: PathBuf,
    /// Artificial guestbook latency
    pub latency: Duration,
    /// Public base URL used for share links
    pub site_url: String,
    /// Address copied by the contact and palette commands
    pub contact_email: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let bind_addr = env::var("PORTFOLIO_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
            .parse()
            .map_err(|e| AppError::Config(format!("Invalid PORTFOLIO_BIND_ADDR: {}", e)))?;

        let log_level = env::var("PORTFOLIO_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let storage = match env::var("PORTFOLIO_STORAGE") {
            Ok(raw) => StorageBackend::parse(&raw).ok_or_else(|| {
                AppError::Config(format!(
                    "Invalid PORTFOLIO_STORAGE '{}': expected 'memory' or 'sqlite'",
                    raw
                ))
            })?,
            Err(_) => StorageBackend::Memory,
        };

        let db_path = env::var("PORTFOLIO_DB_PATH")
            .unwrap_or_else(|_| "./data/portfolio.sqlite".to_string())
            .into();

        let latency_ms = match env::var("PORTFOLIO_LATENCY_MS") {
            Ok(raw) => raw.trim().parse::<u64>().map_err(|e| {
                AppError::Config(format!("Invalid PORTFOLIO_LATENCY_MS '{}': {}", raw, e))
            })?,
            Err(_) => DEFAULT_LATENCY_MS,
        };

        let site_url = env::var("PORTFOLIO_SITE_URL")
            .unwrap_or_else(|_| "http://localhost:8080".to_string())
            .trim_end_matches('/')
            .to_string();

        let contact_email = env::var("PORTFOLIO_CONTACT_EMAIL")
            .unwrap_or_else(|_| "aimal@example.com".to_string());

        Ok(Self {
            bind_addr,
            log_level,
            storage,
            db_path,
            latency: Duration::from_millis(latency_ms),
            site_url,
            contact_email,
        })
    }
}
