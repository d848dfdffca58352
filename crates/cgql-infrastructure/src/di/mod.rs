//! Dependency Injection
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`context`] | `ApplicationContext`, the bean container behind the registry port |
//! | [`bootstrap`] | Composition root wiring config, container and schema factory |

pub mod bootstrap;
pub mod context;

pub use bootstrap::{AppContext, init_app, init_app_with};
pub use context::{ApplicationContext, ContextBuilder};
