//! Configuration management
//!
//! Layered with figment: defaults, then an optional TOML file, then
//! `CGQL_`-prefixed environment variables.

pub mod loader;
pub mod types;

pub use loader::{ConfigBuilder, ConfigLoader};
pub use types::*;
