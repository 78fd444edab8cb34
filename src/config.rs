use std::env;
use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Clinic API";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

const DEFAULT_ADDR: &str = "0.0.0.0:4000";
const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000,http://localhost:5173";

/// Default tracing filter when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "info"
}

/// Get the application data directory (`~/.clinic-api/`)
pub fn data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join(".clinic-api")
}

/// Default store location, auto-created on first run
pub fn default_db_path() -> PathBuf {
    data_dir().join("health.db")
}

/// Runtime configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub db_path: PathBuf,
    /// Origins allowed to call the API cross-origin, with credentials.
    pub cors_origins: Vec<String>,
}

impl Config {
    /// Read configuration from the environment, falling back to defaults.
    ///
    /// `CLINIC_ADDR` — listen address; `CLINIC_DB` — store file path;
    /// `CLINIC_CORS_ORIGINS` — comma-separated allowed origins.
    pub fn from_env() -> Self {
        let bind_addr = env::var("CLINIC_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.into());
        let db_path = env::var("CLINIC_DB")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_db_path());
        let cors_origins = env::var("CLINIC_CORS_ORIGINS")
            .unwrap_or_else(|_| DEFAULT_CORS_ORIGINS.into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        Self {
            bind_addr,
            db_path,
            cors_origins,
        }
    }
}
