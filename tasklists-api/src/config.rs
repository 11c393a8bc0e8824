/// Configuration management for the API server
///
/// Configuration is loaded from environment variables (a `.env` file is
/// honored in development).
///
/// # Environment Variables
///
/// - `API_HOST`: Host to bind to (default: 0.0.0.0)
/// - `API_PORT`: Port to bind to (default: 8080)
/// - `API_CORS_ORIGINS`: Comma-separated allowed origins (default: *)
/// - `DATABASE_URL`: PostgreSQL connection string; when unset, the
///   server runs on the in-memory store
/// - `DATABASE_MAX_CONNECTIONS`: Pool size (default: 10)
/// - `SEED_DEMO_DATA`: Seed demo users/collections on startup (default: false)
/// - `RUST_LOG`: Log filter (default: info)
///
/// # Example
///
/// ```no_run
/// use tasklists_api::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Server will listen on {}", config.bind_address());
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};
use std::env;
use tasklists_core::db::DatabaseConfig;

/// Complete application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// API server configuration
    pub api: ApiConfig,

    /// Database configuration; `None` selects the in-memory store
    pub database: Option<DatabaseConfig>,

    /// Whether to seed demo data on startup
    pub seed_demo_data: bool,
}

/// API server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,

    /// Allowed CORS origins; `*` means permissive
    pub cors_origins: Vec<String>,
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable holds an unparseable value.
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        let host = env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("API_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()?;

        let cors_origins = env::var("API_CORS_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let database = match env::var("DATABASE_URL") {
            Ok(url) => {
                let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
                    .unwrap_or_else(|_| "10".to_string())
                    .parse::<u32>()?;
                Some(DatabaseConfig {
                    url,
                    max_connections,
                    ..Default::default()
                })
            }
            Err(_) => None,
        };

        let seed_demo_data = env::var("SEED_DEMO_DATA")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Ok(Self {
            api: ApiConfig {
                host,
                port,
                cors_origins,
            },
            database,
            seed_demo_data,
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }

    /// Configuration suitable for tests: in-memory store, no seeding
    pub fn for_tests() -> Self {
        Self {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                cors_origins: vec!["*".to_string()],
            },
            database: None,
            seed_demo_data: false,
        }
    }
}
