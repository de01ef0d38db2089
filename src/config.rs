//! Runtime configuration loaded from environment variables.

use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 3000;

#[derive(Clone, Debug, Default)]
pub struct AppConfig {
    /// Database file (from CLINIC_HR_DB). Falls back to the platform data dir.
    pub db_path: Option<PathBuf>,
    /// HTTP port (from CLINIC_HR_PORT)
    pub port: Option<u16>,
    /// Allowed CORS origins (from CLINIC_HR_CORS_ORIGINS, comma-separated).
    /// Any origin is allowed when unset.
    pub cors_origins: Option<Vec<String>>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let db_path = std::env::var("CLINIC_HR_DB").ok().map(PathBuf::from);

        let port = std::env::var("CLINIC_HR_PORT").ok().and_then(|s| {
            s.parse::<u16>()
                .map_err(|_| tracing::warn!("Ignoring invalid CLINIC_HR_PORT: {}", s))
                .ok()
        });

        let cors_origins = std::env::var("CLINIC_HR_CORS_ORIGINS").ok().map(|s| {
            s.split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        });

        Self {
            db_path,
            port,
            cors_origins,
        }
    }

    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    pub fn with_db_path(mut self, path: Option<PathBuf>) -> Self {
        if path.is_some() {
            self.db_path = path;
        }
        self
    }

    pub fn with_port(mut self, port: Option<u16>) -> Self {
        if port.is_some() {
            self.port = port;
        }
        self
    }
}
