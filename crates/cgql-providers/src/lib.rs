//! # City GraphQL - Provider Implementations
//!
//! Concrete collaborators plugged into the schema pipeline. Each one
//! implements a port defined in `cgql-domain`.
//!
//! ## Provider Categories
//!
//! | Category | Port | Implementations |
//! |----------|------|-----------------|
//! | Resolver builders | `ResolverBuilder` | Annotated, Public |
//! | Invoker factories | `MethodInvokerFactory` | Direct |
//! | Component decorators | `ApiComponent` | Logging, Counting |
//!
//! ## Registration
//!
//! The resolver builders register themselves into
//! [`cgql_application::registry::SUPPORT_BEANS`], so a container built with
//! registered beans can resolve them without explicit wiring.

pub use cgql_domain::error::{Error, Result};
pub use cgql_domain::ports::{ApiComponent, MethodInvokerFactory, ResolverBuilder};

/// Component decorators
pub mod decorators;

/// Invoker factories
pub mod invoker;

/// Resolver builders
pub mod resolver_builders;

pub use decorators::{CountingDecorator, LoggingDecorator};
pub use invoker::DirectMethodInvokerFactory;
pub use resolver_builders::{AnnotatedResolverBuilder, PublicResolverBuilder};
