use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    // Target server
    pub server_url: String,

    // User store (SQLite file shared with the backend)
    pub database_path: String,

    // Report output
    pub report_path: String,

    // Per-request timeout in seconds
    pub request_timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if exists

        Ok(Self {
            server_url: env::var("SERVER_URL")
                .unwrap_or_else(|_| "http://localhost:8080".to_string()),
            database_path: env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "../backend/database.db".to_string()),
            report_path: env::var("REPORT_PATH")
                .unwrap_or_else(|_| "../docs/test_report.md".to_string()),
            request_timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .map_err(|_| ConfigError::Invalid("REQUEST_TIMEOUT_SECS"))?,
        })
    }

    /// Base address for business endpoints
    pub fn api_base_url(&self) -> String {
        format!("{}/api", self.server_url.trim_end_matches('/'))
    }

    /// Liveness probe address
    pub fn ping_url(&self) -> String {
        format!("{}/ping", self.server_url.trim_end_matches('/'))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid environment variable: {0}")]
    Invalid(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_config(server_url: &str) -> Config {
        Config {
            server_url: server_url.to_string(),
            database_path: "database.db".to_string(),
            report_path: "test_report.md".to_string(),
            request_timeout_secs: 10,
        }
    }

    #[test]
    fn test_derived_urls() {
        let config = fixed_config("http://localhost:8080");
        assert_eq!(config.api_base_url(), "http://localhost:8080/api");
        assert_eq!(config.ping_url(), "http://localhost:8080/ping");
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let config = fixed_config("http://localhost:8080/");
        assert_eq!(config.api_base_url(), "http://localhost:8080/api");
        assert_eq!(config.ping_url(), "http://localhost:8080/ping");
    }
}
