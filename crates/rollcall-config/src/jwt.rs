use std::env;

use anyhow::{Result, bail};

/// Tokens live for 24 hours unless `JWT_ACCESS_EXPIRY` says otherwise.
pub const DEFAULT_ACCESS_TOKEN_EXPIRY: i64 = 86_400;

#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_expiry: i64,
}

impl JwtConfig {
    /// Fails when `JWT_SECRET` is missing or blank.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let secret = lookup("JWT_SECRET").unwrap_or_default();
        if secret.trim().is_empty() {
            bail!("JWT_SECRET must be set");
        }

        Ok(Self {
            secret,
            access_token_expiry: crate::parse_or(
                lookup("JWT_ACCESS_EXPIRY"),
                DEFAULT_ACCESS_TOKEN_EXPIRY,
            ),
        })
    }

    pub fn has_secret(&self) -> bool {
        !self.secret.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_missing_secret_is_an_error() {
        assert!(JwtConfig::from_lookup(lookup(&[])).is_err());
        assert!(JwtConfig::from_lookup(lookup(&[("JWT_SECRET", "   ")])).is_err());
    }

    #[test]
    fn test_default_expiry_is_one_day() {
        let config = JwtConfig::from_lookup(lookup(&[("JWT_SECRET", "s3cret")])).unwrap();
        assert_eq!(config.access_token_expiry, 86_400);
        assert!(config.has_secret());
    }

    #[test]
    fn test_expiry_override() {
        let config = JwtConfig::from_lookup(lookup(&[
            ("JWT_SECRET", "s3cret"),
            ("JWT_ACCESS_EXPIRY", "60"),
        ]))
        .unwrap();
        assert_eq!(config.access_token_expiry, 60);
    }
}
