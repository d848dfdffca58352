//! Component decorators
//!
//! Wrappers adding cross-cutting behavior around any [`ApiComponent`]. They
//! report the wrapped component's type, so the schema pipeline treats a
//! decorated component exactly like the plain one.
//!
//! [`ApiComponent`]: cgql_domain::ports::ApiComponent

pub mod counting;
pub mod logging;

pub use counting::CountingDecorator;
pub use logging::LoggingDecorator;
