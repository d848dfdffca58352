//! # Infrastructure Layer
//!
//! Cross-cutting technical concerns supporting the schema pipeline.
//!
//! ### Configuration & DI
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Figment-layered configuration (defaults, TOML, environment) |
//! | [`di`] | The bean container and application bootstrap |
//! | [`constants`] | Centralized configuration constants |
//!
//! ### Observability
//! | Module | Description |
//! |--------|-------------|
//! | [`logging`] | Structured logging with tracing |
//! | [`error_ext`] | Context extensions converting foreign errors |

// Resolver builders register themselves into the bean slices
use cgql_providers as _;

pub mod config;
pub mod constants;
pub mod di;
pub mod error_ext;
pub mod logging;

pub use config::{AppConfig, ConfigLoader};
pub use di::{AppContext, ApplicationContext, ContextBuilder, init_app};
