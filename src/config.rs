// src/config.rs
use crate::error::ConfigError;
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_PEXELS_API_URL: &str = "https://api.pexels.com";
pub const DEFAULT_STATIC_DIR: &str = "static";

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub pexels_api_url: String,
    pub pexels_api_key: Option<String>,
    pub static_dir: PathBuf,
}

impl Config {
    /// Read settings from the process environment (after `.env` has been loaded).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Blank values behave like unset ones
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let bind_value = get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_value
            .parse::<SocketAddr>()
            .map_err(|source| ConfigError::InvalidBindAddr {
                value: bind_value.clone(),
                source,
            })?;

        let pexels_api_url = get("PEXELS_API_URL")
            .unwrap_or_else(|| DEFAULT_PEXELS_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        if !(pexels_api_url.starts_with("http://") || pexels_api_url.starts_with("https://")) {
            return Err(ConfigError::InvalidApiUrl(pexels_api_url));
        }

        Ok(Self {
            bind_addr,
            pexels_api_url,
            pexels_api_key: get("PEXELS_API_KEY"),
            static_dir: PathBuf::from(get("STATIC_DIR").unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string())),
        })
    }
}
