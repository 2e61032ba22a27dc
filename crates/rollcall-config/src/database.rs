use std::env;
use std::time::Duration;

use anyhow::{Result, bail};

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    /// Applied per connection as the Postgres `statement_timeout`.
    pub statement_timeout: Duration,
}

impl DatabaseConfig {
    /// Fails when `DATABASE_URL` is missing or blank.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let url = lookup("DATABASE_URL").unwrap_or_default();
        if url.trim().is_empty() {
            bail!("DATABASE_URL must be set");
        }

        Ok(Self {
            url,
            max_connections: crate::parse_or(lookup("DATABASE_MAX_CONNECTIONS"), 10),
            acquire_timeout: Duration::from_secs(crate::parse_or(
                lookup("DATABASE_ACQUIRE_TIMEOUT_SECS"),
                5,
            )),
            statement_timeout: Duration::from_millis(crate::parse_or(
                lookup("DATABASE_STATEMENT_TIMEOUT_MS"),
                5_000,
            )),
        })
    }

    /// Host part of the connection string, for startup logs.
    pub fn host(&self) -> &str {
        let without_scheme = self
            .url
            .split_once("://")
            .map(|(_, rest)| rest)
            .unwrap_or(&self.url);
        let authority = without_scheme
            .rsplit_once('@')
            .map(|(_, host)| host)
            .unwrap_or(without_scheme);

        authority
            .split(['/', ':', '?'])
            .next()
            .filter(|host| !host.is_empty())
            .unwrap_or("unknown")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_url_is_an_error() {
        assert!(DatabaseConfig::from_lookup(|_| None).is_err());
    }

    #[test]
    fn test_defaults() {
        let config = DatabaseConfig::from_lookup(|key| match key {
            "DATABASE_URL" => Some("postgres://user:pw@db.internal:5432/rollcall".to_string()),
            _ => None,
        })
        .unwrap();

        assert_eq!(config.max_connections, 10);
        assert_eq!(config.acquire_timeout, Duration::from_secs(5));
        assert_eq!(config.statement_timeout, Duration::from_millis(5_000));
        assert_eq!(config.host(), "db.internal");
    }
}
