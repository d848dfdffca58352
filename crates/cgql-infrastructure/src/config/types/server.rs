//! HTTP server configuration

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,

    /// Bind port
    pub port: u16,

    /// Prefix under which every route is mounted, empty for the root
    pub context_path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_SERVER_HOST.to_string(),
            port: DEFAULT_SERVER_PORT,
            context_path: String::new(),
        }
    }
}

impl ServerConfig {
    /// Full path of a route mounted at `path` below the context path
    pub fn route(&self, path: &str) -> String {
        format!("{}{}", self.context_path, path)
    }
}
