//! Infrastructure layer constants
//!
//! Domain-specific constants are defined in `cgql_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "cgql.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "cgql";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "CGQL";

/// Separator between nested keys in environment variable names
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// HTTP SERVER CONSTANTS
// ============================================================================

/// Default bind address
pub const DEFAULT_SERVER_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 8080;

/// Default GraphQL endpoint path
pub const DEFAULT_GRAPHQL_PATH: &str = "/graphql";

/// Default GraphiQL UI path
pub const DEFAULT_GRAPHIQL_PATH: &str = "/graphiql";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Environment variable overriding the log filter
pub const LOG_ENV_VAR: &str = "CGQL_LOG";

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// File name stem of the rolling log file when none is given
pub const DEFAULT_LOG_FILE_STEM: &str = "cgql";
