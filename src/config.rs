// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 BloodLink

//! # Runtime Configuration
//!
//! Configuration is read from the environment exactly once at startup into an
//! immutable [`AppConfig`]. Nothing in the request path reads ambient state.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `JWT_SECRET` | HS256 signing secret for access tokens | **Required** |
//! | `TOKEN_TTL_DAYS` | Token validity window in days | `7` |
//! | `DATA_DIR` | Root directory for document storage | `/data` |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::env;

/// Environment variable name for the token signing secret.
///
/// The server refuses to start without it: a missing secret must never
/// degrade into accepting improperly-verified tokens.
pub const JWT_SECRET_ENV: &str = "JWT_SECRET";

/// Environment variable name for the token validity window (days).
pub const TOKEN_TTL_DAYS_ENV: &str = "TOKEN_TTL_DAYS";

/// Environment variable name for the document storage root.
pub const DATA_DIR_ENV: &str = "DATA_DIR";

/// Default token validity window.
pub const DEFAULT_TOKEN_TTL_DAYS: i64 = 7;

/// Error raised when the environment is missing or malformed.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is not set; refusing to start without a signing secret")]
    MissingSecret(&'static str),
    #[error("{var} is not a valid value: {value}")]
    Invalid { var: &'static str, value: String },
}

/// Immutable application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// HS256 signing secret shared by the credential issuer and the auth gate.
    pub jwt_secret: String,
    /// Token validity window in days.
    pub token_ttl_days: i64,
    /// Root directory for document storage.
    pub data_dir: String,
    /// Bind address.
    pub host: String,
    /// Bind port.
    pub port: u16,
}

impl AppConfig {
    /// Load configuration from the process environment.
    ///
    /// Fails fast if `JWT_SECRET` is absent or a numeric variable is garbled.
    pub fn from_env() -> Result<Self, ConfigError> {
        let jwt_secret =
            env::var(JWT_SECRET_ENV).map_err(|_| ConfigError::MissingSecret(JWT_SECRET_ENV))?;
        if jwt_secret.is_empty() {
            return Err(ConfigError::MissingSecret(JWT_SECRET_ENV));
        }

        let token_ttl_days = match env::var(TOKEN_TTL_DAYS_ENV) {
            Ok(raw) => raw.parse::<i64>().ok().filter(|d| *d > 0).ok_or(
                ConfigError::Invalid {
                    var: TOKEN_TTL_DAYS_ENV,
                    value: raw,
                },
            )?,
            Err(_) => DEFAULT_TOKEN_TTL_DAYS,
        };

        let data_dir = env::var(DATA_DIR_ENV).unwrap_or_else(|_| "/data".to_string());
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = match env::var("PORT") {
            Ok(raw) => raw.parse::<u16>().map_err(|_| ConfigError::Invalid {
                var: "PORT",
                value: raw,
            })?,
            Err(_) => 8080,
        };

        Ok(Self {
            jwt_secret,
            token_ttl_days,
            data_dir,
            host,
            port,
        })
    }
}
