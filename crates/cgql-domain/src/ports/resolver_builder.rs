//! Resolver Builder Port
//!
//! Resolver builders decide which methods of a component become operations
//! and how each one is invoked.

use std::fmt;
use std::sync::Arc;

use super::{Executable, MethodInvokerFactory};
use crate::value_objects::{InstanceSupplier, MethodDescriptor, OperationKind, TypeDescriptor};

/// Inputs describing one component
#[derive(Debug, Clone)]
pub struct ResolverBuilderParams {
    /// Accessor to the component instance
    pub supplier: InstanceSupplier,
    /// Type whose members are introspected
    pub declared_type: Arc<TypeDescriptor>,
    /// Concrete type the container hands out
    pub exposed_type: Arc<TypeDescriptor>,
}

/// One operation produced by a resolver builder
#[derive(Clone)]
pub struct OperationResolver {
    pub operation_name: String,
    pub kind: OperationKind,
    pub description: Option<String>,
    pub method: MethodDescriptor,
    pub executable: Arc<dyn Executable>,
}

impl fmt::Debug for OperationResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperationResolver")
            .field("operation_name", &self.operation_name)
            .field("kind", &self.kind)
            .field("method", &self.method.signature())
            .finish_non_exhaustive()
    }
}

/// Turns a component's methods into operations
pub trait ResolverBuilder: Send + Sync {
    /// Name used in logs and schema diagnostics
    fn builder_name(&self) -> &str;

    /// Operations exposed for the described component
    fn build_resolvers(&self, params: &ResolverBuilderParams) -> Vec<OperationResolver>;

    /// Copy of this builder that creates handles with `factory`
    ///
    /// Builders that do not customize invocation return `None`.
    fn with_method_invoker_factory(
        &self,
        factory: Arc<dyn MethodInvokerFactory>,
    ) -> Option<Arc<dyn ResolverBuilder>> {
        let _ = factory;
        None
    }
}
