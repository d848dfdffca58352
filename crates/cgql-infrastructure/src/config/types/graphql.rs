//! GraphQL endpoint configuration

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_GRAPHIQL_PATH, DEFAULT_GRAPHQL_PATH};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphQlConfig {
    /// Mount the GraphQL routes at all
    pub enabled: bool,

    /// Path of the GraphQL endpoint
    pub path: String,

    pub graphiql: GraphiqlConfig,

    pub websocket: WebsocketConfig,

    pub schema: SchemaConfig,
}

impl Default for GraphQlConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: DEFAULT_GRAPHQL_PATH.to_string(),
            graphiql: GraphiqlConfig::default(),
            websocket: WebsocketConfig::default(),
            schema: SchemaConfig::default(),
        }
    }
}

/// In-browser GraphiQL page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphiqlConfig {
    pub enabled: bool,
    pub path: String,
}

impl Default for GraphiqlConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: DEFAULT_GRAPHIQL_PATH.to_string(),
        }
    }
}

/// Websocket endpoint advertised to GraphiQL
///
/// Only the path is used; no websocket transport is served.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebsocketConfig {
    pub path: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaConfig {
    pub printer: PrinterConfig,
}

/// Schema printer endpoint at `{graphql.path}/schema`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrinterConfig {
    pub enabled: bool,
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}
