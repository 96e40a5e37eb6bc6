//! Database configuration sourced from `DB_*` environment variables.

use std::env;

use sqlx::mysql::MySqlConnectOptions;

/// The errors that may occur while reading the database configuration.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    /// `DB_CONNECTION` named an engine other than `mysql`.
    #[error("unsupported database engine \"{0}\", only \"mysql\" is supported")]
    UnsupportedEngine(String),

    /// A numeric variable could not be parsed.
    #[error("could not parse {0} value \"{1}\" as a number")]
    InvalidNumber(&'static str, String),
}

/// The settings needed to open the connection pool to the ledger database.
///
/// Each field is read from the environment variable of the same name with the
/// `DB_` prefix (e.g. `DB_HOST` for `host`) and falls back to the default of
/// the standard local setup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// The database host (`DB_HOST`, default `127.0.0.1`).
    pub host: String,
    /// The database port (`DB_PORT`, default `3306`).
    pub port: u16,
    /// The database name (`DB_NAME`, default `rinha`).
    pub name: String,
    /// The connection charset (`DB_CHARSET`, default `utf8mb4`).
    pub charset: String,
    /// The database user (`DB_USER`, default `rinha`).
    pub user: String,
    /// The database password (`DB_PASSWORD`, default `rinha`).
    pub password: String,
    /// The maximum number of pooled connections (`DB_POOL_SIZE`, default 10).
    pub pool_size: u32,
}

impl DatabaseConfig {
    /// Read the configuration from the process environment.
    ///
    /// # Errors
    /// Returns an error if `DB_CONNECTION` is set to anything other than
    /// `mysql`, or if `DB_PORT`/`DB_POOL_SIZE` do not parse as numbers.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let engine = lookup("DB_CONNECTION").unwrap_or_else(|| "mysql".to_owned());
        if engine != "mysql" {
            return Err(ConfigError::UnsupportedEngine(engine));
        }

        let port = parse_number(&lookup, "DB_PORT", 3306)?;
        let pool_size = parse_number(&lookup, "DB_POOL_SIZE", 10)?;

        Ok(Self {
            host: lookup("DB_HOST").unwrap_or_else(|| "127.0.0.1".to_owned()),
            port,
            name: lookup("DB_NAME").unwrap_or_else(|| "rinha".to_owned()),
            charset: lookup("DB_CHARSET").unwrap_or_else(|| "utf8mb4".to_owned()),
            user: lookup("DB_USER").unwrap_or_else(|| "rinha".to_owned()),
            password: lookup("DB_PASSWORD").unwrap_or_else(|| "rinha".to_owned()),
            pool_size,
        })
    }

    /// The sqlx connection options described by this configuration.
    pub fn connect_options(&self) -> MySqlConnectOptions {
        MySqlConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .database(&self.name)
            .charset(&self.charset)
            .username(&self.user)
            .password(&self.password)
    }
}

fn parse_number<T: std::str::FromStr>(
    lookup: impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(key) {
        Some(raw) => raw
            .parse()
            .map_err(|_| ConfigError::InvalidNumber(key, raw)),
        None => Ok(default),
    }
}
