use std::path::PathBuf;
use std::time::Duration;

use crate::auth::jwt::JwtConfig;

/// Which storage engine backs the stores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres { database_url: String },
    Mongo { uri: String, database: String },
}

/// Storage configuration.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    /// Upper bound for a single store operation.
    pub timeout: Duration,
}

/// Server configuration loaded from environment variables.
///
/// All fields except the secrets have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    pub store: StoreConfig,
    /// Root directory for uploaded files (default: `./uploads`).
    pub upload_dir: PathBuf,
    /// Request body limit for the upload routes, in bytes.
    pub upload_body_limit_bytes: usize,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.into())
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                     |
    /// |---------------------------|-----------------------------|
    /// | `HOST`                    | `0.0.0.0`                   |
    /// | `PORT`                    | `3000`                      |
    /// | `CORS_ORIGINS`            | `http://localhost:5173`     |
    /// | `REQUEST_TIMEOUT_SECS`    | `30`                        |
    /// | `STORE_BACKEND`           | `postgres` (or `mongodb`)   |
    /// | `DATABASE_URL`            | required for `postgres`     |
    /// | `MONGO_URI`               | `mongodb://localhost:27017` |
    /// | `MONGO_DB`                | `alumni`                    |
    /// | `STORE_TIMEOUT_SECS`      | `10`                        |
    /// | `UPLOAD_DIR`              | `./uploads`                 |
    /// | `UPLOAD_BODY_LIMIT_BYTES` | `10485760`                  |
    ///
    /// JWT settings are read by [`JwtConfig::from_env`].
    ///
    /// # Panics
    ///
    /// Panics on malformed values or a missing required variable, so a
    /// misconfigured deployment fails at startup.
    pub fn from_env() -> Self {
        let host = env_or("HOST", "0.0.0.0");

        let port: u16 = env_or("PORT", "3000")
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = env_or("CORS_ORIGINS", "http://localhost:5173")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = env_or("REQUEST_TIMEOUT_SECS", "30")
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let backend = match env_or("STORE_BACKEND", "postgres").as_str() {
            "postgres" | "postgresql" => StoreBackend::Postgres {
                database_url: std::env::var("DATABASE_URL")
                    .expect("DATABASE_URL must be set for the postgres backend"),
            },
            "mongodb" | "mongo" => StoreBackend::Mongo {
                uri: env_or("MONGO_URI", "mongodb://localhost:27017"),
                database: env_or("MONGO_DB", "alumni"),
            },
            other => panic!("STORE_BACKEND must be 'postgres' or 'mongodb', got '{other}'"),
        };

        let store_timeout_secs: u64 = env_or("STORE_TIMEOUT_SECS", "10")
            .parse()
            .expect("STORE_TIMEOUT_SECS must be a valid u64");

        let upload_dir = PathBuf::from(env_or("UPLOAD_DIR", "./uploads"));

        let upload_body_limit_bytes: usize = env_or("UPLOAD_BODY_LIMIT_BYTES", "10485760")
            .parse()
            .expect("UPLOAD_BODY_LIMIT_BYTES must be a valid usize");

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            store: StoreConfig {
                backend,
                timeout: Duration::from_secs(store_timeout_secs),
            },
            upload_dir,
            upload_body_limit_bytes,
            jwt,
        }
    }
}
