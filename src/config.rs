use std::net::SocketAddr;

use anyhow::{Context, Result};

pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:3001";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_url: String,
    pub bind_address: SocketAddr,
}

impl Config {
    /// Reads `DATABASE_URL` (required) and `BIND_ADDRESS` from the
    /// environment. Call `dotenvy::dotenv()` first to pick up a `.env` file.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(
            std::env::var("DATABASE_URL").ok(),
            std::env::var("BIND_ADDRESS").ok(),
        )
    }

    pub fn from_vars(database_url: Option<String>, bind_address: Option<String>) -> Result<Self> {
        let database_url = database_url
            .filter(|url| !url.trim().is_empty())
            .context("DATABASE_URL must be set")?;
        let bind_address = bind_address
            .as_deref()
            .unwrap_or(DEFAULT_BIND_ADDRESS)
            .parse()
            .context("BIND_ADDRESS must be a socket address such as 127.0.0.1:3001")?;
        Ok(Self {
            database_url,
            bind_address,
        })
    }
}
