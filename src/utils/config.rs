use crate::types::{AppError, Result};
use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    pub jwt_secret: String,
    /// Access token lifetime in milliseconds.
    pub jwt_access_expiry_ms: i64,
    /// Refresh token lifetime in milliseconds.
    pub jwt_refresh_expiry_ms: i64,
}

impl Config {
    /// Loads configuration from the environment, reading `.env` first.
    ///
    /// `JWT_SECRET` is required; everything else has defaults. The loaded
    /// configuration is immutable for the lifetime of the process.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Config {
            server: ServerConfig {
                host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
                port: parse_var("PORT", 3000)?,
            },
            auth: AuthConfig {
                jwt_secret: env::var("JWT_SECRET")
                    .map_err(|_| AppError::Internal("JWT_SECRET must be set".to_string()))?,
                jwt_access_expiry_ms: parse_var("JWT_ACCESS_EXPIRY_MS", 900_000)?,
                jwt_refresh_expiry_ms: parse_var("JWT_REFRESH_EXPIRY_MS", 604_800_000)?,
            },
        })
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T> {
    match env::var(name) {
        Ok(value) => value.parse().map_err(|_| {
            AppError::Internal(format!("{} is not a valid value for {}", value, name))
        }),
        Err(_) => Ok(default),
    }
}
