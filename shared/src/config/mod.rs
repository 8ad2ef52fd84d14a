//! Configuration module with business-specific sub-modules
//!
//! - `auth` - Token signing and revocation policy
//! - `database` - Database connection and pool configuration
//! - `environment` - Environment detection and logging configuration
//! - `server` - HTTP server configuration

pub mod auth;
pub mod database;
pub mod environment;
pub mod server;

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

pub use auth::{AuthConfig, JwtConfig, TokenPolicyConfig, DEVELOPMENT_SECRET};
pub use database::DatabaseConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use server::ServerConfig;

/// Configuration loading error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value:?}")]
    InvalidValue { name: String, value: String },

    #[error("{0} is not allowed in production")]
    NotAllowedInProduction(&'static str),
}

/// Reads and parses an environment variable
///
/// `Ok(None)` when unset; an error when set to something that does not parse.
pub(crate) fn env_parsed<T: FromStr>(name: &str) -> Result<Option<T>, ConfigError> {
    match std::env::var(name) {
        Ok(raw) => parse_value(name, &raw).map(Some),
        Err(_) => Ok(None),
    }
}

fn parse_value<T: FromStr>(name: &str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
        name: name.to_string(),
        value: raw.to_string(),
    })
}

/// Backing store for the user directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DirectoryBackend {
    /// Process-local directory seeded with development users
    #[default]
    Memory,
    /// MySQL `users` table
    MySql,
}

impl FromStr for DirectoryBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" | "in-memory" => Ok(DirectoryBackend::Memory),
            "mysql" => Ok(DirectoryBackend::MySql),
            _ => Err(format!("Invalid user directory backend: {}", s)),
        }
    }
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Authentication configuration
    pub auth: AuthConfig,

    /// User directory backend
    #[serde(default)]
    pub directory: DirectoryBackend,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment
    ///
    /// Fails on `JWT_EXPIRATION_SECONDS` or `USER_DIRECTORY` values that are
    /// set but do not parse, rather than falling back to a default.
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = Environment::from_env();
        let directory = env_parsed("USER_DIRECTORY")?.unwrap_or_default();

        Ok(Self {
            environment,
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            auth: AuthConfig::from_env()?,
            directory,
            logging: LoggingConfig::from_env(environment),
        })
    }

    /// Refuse development-only settings when running in production
    ///
    /// The development signing secret and the seeded in-memory directory
    /// are both rejected.
    pub fn check_production(&self) -> Result<(), ConfigError> {
        if !self.environment.is_production() {
            return Ok(());
        }
        if self.auth.jwt.is_using_default_secret() {
            return Err(ConfigError::NotAllowedInProduction("The development JWT_SECRET"));
        }
        if self.directory == DirectoryBackend::Memory {
            return Err(ConfigError::NotAllowedInProduction("USER_DIRECTORY=memory"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_backend_from_str() {
        assert_eq!("MySQL".parse::<DirectoryBackend>().unwrap(), DirectoryBackend::MySql);
        assert_eq!("memory".parse::<DirectoryBackend>().unwrap(), DirectoryBackend::Memory);
        assert!("redis".parse::<DirectoryBackend>().is_err());
    }

    #[test]
    fn test_parse_value_rejects_typos() {
        assert_eq!(
            parse_value::<DirectoryBackend>("USER_DIRECTORY", " mysql "),
            Ok(DirectoryBackend::MySql)
        );
        assert_eq!(
            parse_value::<DirectoryBackend>("USER_DIRECTORY", "mysq"),
            Err(ConfigError::InvalidValue {
                name: "USER_DIRECTORY".to_string(),
                value: "mysq".to_string(),
            })
        );
        assert_eq!(parse_value::<i64>("JWT_EXPIRATION_SECONDS", "900"), Ok(900));
        assert!(parse_value::<i64>("JWT_EXPIRATION_SECONDS", "1h").is_err());
    }

    #[test]
    fn test_production_refuses_development_settings() {
        let mut config = AppConfig::default();
        assert!(config.check_production().is_ok());

        config.environment = Environment::Production;
        assert_eq!(
            config.check_production(),
            Err(ConfigError::NotAllowedInProduction("The development JWT_SECRET"))
        );

        config.auth.jwt = JwtConfig::new("production-secret-0123456789abcdef");
        assert_eq!(
            config.check_production(),
            Err(ConfigError::NotAllowedInProduction("USER_DIRECTORY=memory"))
        );

        config.directory = DirectoryBackend::MySql;
        assert!(config.check_production().is_ok());
    }

    #[test]
    fn test_app_config_default() {
        let config = AppConfig::default();
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.directory, DirectoryBackend::Memory);
        assert!(config.auth.token_policy.rotate_on_refresh);
    }
}
