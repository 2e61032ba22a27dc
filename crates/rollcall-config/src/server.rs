use std::env;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub port: u16,
    /// Base URL of the web client. QR codes point at `{frontend_url}/attend`.
    pub frontend_url: String,
    pub environment: String,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let frontend_url = lookup("FRONTEND_URL")
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| "http://localhost:5173".to_string());

        Self {
            port: crate::parse_or(lookup("PORT"), 3001),
            frontend_url,
            environment: lookup("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_lookup(|_| None);
        assert_eq!(config.port, 3001);
        assert_eq!(config.frontend_url, "http://localhost:5173");
        assert!(!config.is_production());
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let config = ServerConfig::from_lookup(|key| match key {
            "FRONTEND_URL" => Some("https://attend.example.edu/".to_string()),
            "PORT" => Some("8080".to_string()),
            _ => None,
        });
        assert_eq!(config.frontend_url, "https://attend.example.edu");
        assert_eq!(config.port, 8080);
    }
}
