//! Domain Port Interfaces
//!
//! Boundary contracts between the schema pipeline and the code plugged into
//! it: API components, resolver builders, invoker factories, argument
//! injectors, and the read-only view of the container.
//!
//! ## Organization
//!
//! - **component** - components exposing operations
//! - **invoker** - invocation handles and the factories producing them
//! - **resolver_builder** - collaborators turning component methods into operations
//! - **injector** - request-scoped argument injection
//! - **registry** - read access to container registrations

/// Components exposing operations
pub mod component;
/// Invocation handles
pub mod invoker;
/// Request-scoped argument injection
pub mod injector;
/// Read-only container view
pub mod registry;
/// Operation discovery collaborators
pub mod resolver_builder;

pub use component::ApiComponent;
pub use injector::ArgumentInjector;
pub use invoker::{Executable, MethodInvokerFactory};
pub use registry::BeanRegistry;
pub use resolver_builder::{OperationResolver, ResolverBuilder, ResolverBuilderParams};
