//! Server constants

// ============================================================================
// Forwarding headers
// ============================================================================

pub const X_FORWARDED_PROTO: &str = "x-forwarded-proto";
pub const X_FORWARDED_PREFIX: &str = "x-forwarded-prefix";
pub const X_FORWARDED_HOST: &str = "x-forwarded-host";
pub const X_FORWARDED_PORT: &str = "x-forwarded-port";

// ============================================================================
// GraphiQL query parameters
// ============================================================================

/// Endpoint the GraphiQL page sends queries to
pub const PATH_PARAM: &str = "path";

/// Websocket endpoint for subscriptions
pub const WS_PATH_PARAM: &str = "WsPath";

