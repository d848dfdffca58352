//! Main application configuration

use serde::{Deserialize, Serialize};

use super::{GraphQlConfig, LoggingConfig, ServerConfig};

/// Root configuration of the application
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP server settings
    pub server: ServerConfig,

    /// GraphQL endpoint, GraphiQL and schema printer settings
    pub graphql: GraphQlConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}
