//! Runtime configuration read from the environment.

use std::{env, fmt::Display, net::SocketAddr, path::PathBuf, str::FromStr};

use anyhow::{anyhow, Result};
use tracing::info;

const DEFAULT_DATABASE_URL: &str = "sqlite:club.db";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3001";
const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:8080";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub allowed_origin: String,
    /// Built frontend to serve as the router fallback, if any
    pub frontend_dir: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            database_url: try_load(&lookup, "CLUB_DATABASE_URL", DEFAULT_DATABASE_URL)?,
            bind_addr: try_load(&lookup, "CLUB_BIND_ADDR", DEFAULT_BIND_ADDR)?,
            allowed_origin: try_load(&lookup, "CLUB_ALLOWED_ORIGIN", DEFAULT_ALLOWED_ORIGIN)?,
            frontend_dir: lookup("CLUB_FRONTEND_DIR")
                .filter(|dir| !dir.trim().is_empty())
                .map(PathBuf::from),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3001)),
            allowed_origin: DEFAULT_ALLOWED_ORIGIN.to_string(),
            frontend_dir: None,
        }
    }
}

fn try_load<F, T>(lookup: &F, key: &str, default: &str) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    let raw = lookup(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    raw.parse()
        .map_err(|e| anyhow!("Invalid {key} value '{raw}': {e}"))
}
