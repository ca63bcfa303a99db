//! API server configuration

use std::env;
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use bookshelf_shared_config::{
    get_required_env, parse_env, CommonConfig, DatabaseConfig, Environment,
};

/// Default HTTP port
const DEFAULT_PORT: u16 = 4000;

/// Tracing filter used when neither RUST_LOG nor LOG_LEVEL is set
pub const DEFAULT_LOG_FILTER: &str = "bookshelf_api=debug,tower_http=debug";

/// Which document store backend to run against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreBackend {
    /// PostgreSQL JSONB documents
    #[default]
    Postgres,
    /// Process-local memory, lost on restart
    Memory,
}

impl FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Ok(Self::Postgres),
            "memory" | "mem" | "in-memory" => Ok(Self::Memory),
            other => bail!("unknown STORE_BACKEND '{}' (expected postgres or memory)", other),
        }
    }
}

impl std::fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Postgres => write!(f, "postgres"),
            Self::Memory => write!(f, "memory"),
        }
    }
}

/// API server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Common configuration shared with other services
    pub common: CommonConfig,

    /// Server port (default: 4000)
    pub port: u16,

    /// Document store backend (default: postgres)
    pub store_backend: StoreBackend,

    /// Serve the GraphiQL IDE on `GET /graphql`
    pub graphiql: bool,

    /// CORS allowed origins (optional)
    pub cors_allowed_origins: Option<Vec<String>>,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// In production mode with the postgres backend, `DATABASE_URL` must be
    /// set explicitly. GraphiQL defaults to on everywhere but production.
    pub fn from_env() -> Result<Self> {
        let environment = Environment::from_str(
            &env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
        )
        .unwrap_or_default();
        let is_production = environment.is_production();

        let store_backend = match env::var("STORE_BACKEND") {
            Ok(value) if !value.is_empty() => value.parse()?,
            _ => StoreBackend::default(),
        };

        if is_production && store_backend == StoreBackend::Postgres {
            get_required_env("DATABASE_URL").context(
                "DATABASE_URL environment variable is required in production. \
                 Please set your PostgreSQL connection string.",
            )?;
        }

        let common = CommonConfig::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

        Ok(Self {
            common,

            port: env::var("PORT")
                .unwrap_or_else(|_| DEFAULT_PORT.to_string())
                .parse()
                .context("Invalid PORT value")?,

            store_backend,

            graphiql: parse_env("GRAPHIQL", !is_production)
                .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?,

            cors_allowed_origins: env::var("CORS_ORIGINS").ok().map(|s| {
                s.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            }),
        })
    }

    /// Get database configuration
    pub fn database(&self) -> &DatabaseConfig {
        &self.common.database
    }

    /// Check if running in production mode
    pub fn is_production(&self) -> bool {
        self.common.environment.is_production()
    }

    /// Check if running in development mode
    pub fn is_development(&self) -> bool {
        self.common.environment.is_development()
    }

    /// Tracing filter directives for the subscriber
    pub fn log_filter(&self) -> &str {
        self.common
            .log_filter
            .as_deref()
            .unwrap_or(DEFAULT_LOG_FILTER)
    }
}

impl Default for Config {
    /// Development defaults with the in-memory store
    fn default() -> Self {
        Self {
            common: CommonConfig {
                database: DatabaseConfig::default(),
                environment: Environment::Development,
                log_filter: None,
            },
            port: DEFAULT_PORT,
            store_backend: StoreBackend::Memory,
            graphiql: true,
            cors_allowed_origins: None,
        }
    }
}
