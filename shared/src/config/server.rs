//! HTTP listener settings

use serde::{Deserialize, Serialize};

use super::env_or;

/// Where the auth service listens
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,

    /// actix worker count; 0 keeps actix's per-core default
    #[serde(default)]
    pub workers: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8081,
            workers: 0,
        }
    }
}

impl ServerConfig {
    /// `SERVER_HOST`, `PORT` and `SERVER_WORKERS`
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: std::env::var("SERVER_HOST")
                .ok()
                .filter(|host| !host.trim().is_empty())
                .unwrap_or(defaults.host),
            port: env_or("PORT", defaults.port),
            workers: env_or("SERVER_WORKERS", defaults.workers),
        }
    }

    /// `host:port`, as accepted by `HttpServer::bind`
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
