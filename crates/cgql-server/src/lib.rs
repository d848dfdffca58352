//! # City GraphQL Server
//!
//! HTTP transport for a [`GraphQlSource`](cgql_application::GraphQlSource),
//! built on Rocket.
//!
//! ## Routes
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | `POST` | `{context}{graphql.path}` | Executes a JSON GraphQL request |
//! | `GET` | `{context}{graphql.path}` | `405 Method Not Allowed` |
//! | `GET` | `{context}{graphql.path}/schema` | Printed schema, when the printer is enabled |
//! | `GET` | `{context}{graphiql.path}` | GraphiQL page, or a redirect adding `path` |
//!
//! Nothing GraphQL related is mounted when `graphql.enabled` is `false`.

// Allow Rust 2024 compatibility issues from Rocket's route macros
#![allow(rust_2024_compatibility)]

pub mod builder;
pub mod constants;
pub mod graphiql;
pub mod graphql;
pub mod headers;
pub mod init;

pub use builder::{BuilderError, GraphQlServerBuilder};
pub use init::{create_rocket, run_server};
