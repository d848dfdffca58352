//! # City GraphQL
//!
//! Builds a GraphQL schema out of the components registered in a
//! dependency-injection container and serves it over HTTP.
//!
//! ## Example
//!
//! ```ignore
//! use cgql::application::GraphQlRequest;
//! use cgql::domain::value_objects::RequestContext;
//! use cgql::infrastructure::{AppConfig, init_app};
//!
//! let app = init_app(AppConfig::default())?;
//! let source = app.graphql_source()?;
//! let response = source.execute(
//!     &GraphQlRequest::new("{ getSquare(input: 4) }"),
//!     &RequestContext::default(),
//! );
//! ```
//!
//! ## Architecture
//!
//! - `domain` - descriptors, ports and errors
//! - `application` - schema pipeline and execution
//! - `infrastructure` - container, configuration and logging
//! - `server` - Rocket routes and bootstrap
//! - `demo` - components of the demo application

/// Domain layer - descriptors, ports and errors
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use cgql_domain::*;
}

/// Application layer - schema pipeline and execution
///
/// Re-exports from the application crate for convenience
pub mod application {
    pub use cgql_application::*;
}

/// Infrastructure layer - container, configuration and logging
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use cgql_infrastructure::*;
}

/// Server layer - HTTP routes and bootstrap
///
/// Re-exports from the server crate for convenience
pub mod server {
    pub use cgql_server::*;
}

pub mod demo;

pub use cgql_server::run_server;
