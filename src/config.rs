use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use axum::http::HeaderValue;

const DEFAULT_DATABASE_URL: &str = "sqlite://players.db";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000,http://localhost:3001";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{key} is not valid: {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
    pub addr: SocketAddr,
    pub cors_origins: Vec<HeaderValue>,
}

impl Config {
    /// Reads `.env` (if any) and then the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(val) => parse("DATABASE_MAX_CONNECTIONS", val)?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let host: IpAddr = match lookup("HOST") {
            Some(val) => parse("HOST", val)?,
            None => IpAddr::V4(Ipv4Addr::LOCALHOST),
        };

        let port: u16 = match lookup("PORT") {
            Some(val) => parse("PORT", val)?,
            None => DEFAULT_PORT,
        };

        let origins = lookup("CORS_ORIGINS").unwrap_or_else(|| DEFAULT_CORS_ORIGINS.to_string());
        let cors_origins = origins
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(|origin| {
                HeaderValue::from_str(origin).map_err(|_| ConfigError::Invalid {
                    key: "CORS_ORIGINS",
                    value: origin.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            database_url,
            max_connections,
            addr: SocketAddr::new(host, port),
            cors_origins,
        })
    }
}

fn parse<T: std::str::FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid { key, value })
}
