//! Runtime configuration read from the process environment.

use std::env;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DATABASE_URL: &str = "sqlite://posts.db";
pub const DEFAULT_API_URL: &str = "http://localhost:3000/api";

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be a number, got {value:?}")]
    NotANumber { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub db_max_connections: u32,
    /// Insert sample posts when the table is empty at startup.
    pub seed_sample_data: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            database_url: DEFAULT_DATABASE_URL.to_string(),
            db_max_connections: 5,
            seed_sample_data: true,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: parse_var("PORT")?.unwrap_or(defaults.port),
            database_url: env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            db_max_connections: parse_var("DB_MAX_CONNECTIONS")?.unwrap_or(defaults.db_max_connections),
            seed_sample_data: env::var("SEED_SAMPLE_DATA")
                .map(|v| !(v == "0" || v.eq_ignore_ascii_case("false")))
                .unwrap_or(defaults.seed_sample_data),
        })
    }
}

/// Base URL the client uses to reach the API.
pub fn api_base_url() -> String {
    env::var("POSTS_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string())
}

fn parse_var<T: std::str::FromStr>(name: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::NotANumber { name, value }),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear() {
        for k in ["HOST", "PORT", "DATABASE_URL", "DB_MAX_CONNECTIONS", "SEED_SAMPLE_DATA", "POSTS_API_URL"] {
            env::remove_var(k);
        }
    }

    #[test]
    #[serial]
    fn defaults_when_unset() {
        clear();
        let cfg = AppConfig::from_env().unwrap();
        assert_eq!(cfg, AppConfig::default());
        assert_eq!(cfg.port, 3000);
        assert_eq!(api_base_url(), DEFAULT_API_URL);
        assert_eq!(crate::client::HttpPostsApi::from_env().base_url(), DEFAULT_API_URL);
    }

    #[test]
    #[serial]
    fn reads_overrides() {
        clear();
        env::set_var("PORT", "8081");
        env::set_var("SEED_SAMPLE_DATA", "false");
        env::set_var("DATABASE_URL", "sqlite::memory:");
        let cfg = AppConfig::from_env().unwrap();
        assert_eq!(cfg.port, 8081);
        assert!(!cfg.seed_sample_data);
        assert_eq!(cfg.database_url, "sqlite::memory:");
        clear();
    }

    #[test]
    #[serial]
    fn rejects_bad_port() {
        clear();
        env::set_var("PORT", "eighty");
        let err = AppConfig::from_env().unwrap_err();
        assert_eq!(err, ConfigError::NotANumber { name: "PORT", value: "eighty".into() });
        clear();
    }
}
