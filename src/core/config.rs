//! Server configuration from environment variables.
//!
//! Load with `ServerConfig::from_env()` after calling `dotenvy::dotenv()`.
//! The JWT and database configuration live with their components
//! (`JwtConfig::from_env`, `DbConfig::from_env`).

/// Address the HTTP server binds to when BIND_ADDR is not set
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:7000";

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Socket address to listen on
    pub bind_addr: String,
}

impl ServerConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string()),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bind_addr() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr, "0.0.0.0:7000");
    }
}
