//! Direct invoker factory

use std::sync::Arc;

use cgql_application::schema::{FixedMethodInvoker, MethodInvoker};
use cgql_domain::ports::{Executable, MethodInvokerFactory};
use cgql_domain::value_objects::{InstanceSupplier, MethodDescriptor, TypeDescriptor};

/// Invokes the declared method as-is, without consulting the exposed type
///
/// Resolver builders use it until the schema factory hands them a
/// proxy-aware one.
#[derive(Debug, Default, Clone, Copy)]
pub struct DirectMethodInvokerFactory;

impl MethodInvokerFactory for DirectMethodInvokerFactory {
    fn factory_name(&self) -> &str {
        "direct"
    }

    fn create(
        &self,
        target: Option<InstanceSupplier>,
        method: &MethodDescriptor,
        enclosing: &Arc<TypeDescriptor>,
        _exposed: &Arc<TypeDescriptor>,
    ) -> Arc<dyn Executable> {
        match target {
            Some(supplier) => Arc::new(FixedMethodInvoker::new(
                supplier,
                method.clone(),
                Arc::clone(enclosing),
            )),
            None => Arc::new(MethodInvoker::new(method.clone(), Arc::clone(enclosing))),
        }
    }
}
