use std::{net::SocketAddr, path::PathBuf};

use anyhow::Context;

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub database_url: String,
    pub db_max_connections: u32,
    pub upload_dir: PathBuf,
    /// Origin prepended to `/uploads/...` image paths when the UI renders them.
    /// Empty means same-origin.
    pub public_base_url: String,
    /// Request body cap for writes. `None` leaves uploads unbounded.
    pub max_upload_bytes: Option<usize>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port: u16 =
            std::env::var("PORT").unwrap_or_else(|_| "5000".to_string()).parse().context("PORT")?;

        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://movies.db?mode=rwc".to_string());

        let db_max_connections: u32 =
            std::env::var("DB_MAX_CONNECTIONS").ok().and_then(|s| s.parse().ok()).unwrap_or(5);

        let upload_dir =
            PathBuf::from(std::env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".to_string()));

        let public_base_url = std::env::var("PUBLIC_BASE_URL")
            .map(|s| s.trim_end_matches('/').to_string())
            .unwrap_or_default();

        let max_upload_mb: Option<usize> =
            std::env::var("MAX_UPLOAD_MB").ok().and_then(|s| s.parse().ok());

        Ok(Self {
            addr: format!("{host}:{port}").parse().context("HOST/PORT")?,
            database_url,
            db_max_connections,
            upload_dir,
            public_base_url,
            max_upload_bytes: max_upload_mb.map(|mb| mb * 1024 * 1024),
        })
    }
}
