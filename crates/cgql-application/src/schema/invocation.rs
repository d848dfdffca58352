//! Proxy-Aware Invocation Adapter
//!
//! Handles produced here call the method as the container-visible instance
//! exposes it. Wrappers around a component implement the same
//! [`ApiComponent`] trait, so dispatching through the supplied instance keeps
//! their behavior on every call.

use std::sync::Arc;

use cgql_domain::constants::TARGET_RESOLUTION_KIND;
use cgql_domain::ports::{ApiComponent, Executable, MethodInvokerFactory};
use cgql_domain::value_objects::{
    InstanceSupplier, MethodDescriptor, OperationArguments, TypeDescriptor,
};
use cgql_domain::OperationFailure;
use serde_json::Value;
use tracing::trace;

/// The method `exposed` offers for `method`'s signature; `method` itself when
/// the exposed type has no such public method
pub fn select_invocable_method(
    method: &MethodDescriptor,
    exposed: &TypeDescriptor,
) -> MethodDescriptor {
    exposed
        .find_invocable(method)
        .cloned()
        .unwrap_or_else(|| method.clone())
}

/// Handle bound to a target supplier
///
/// Whether every call sees the same instance is decided by the supplier:
/// shared for singletons, re-resolved per call otherwise.
pub struct FixedMethodInvoker {
    supplier: InstanceSupplier,
    method: MethodDescriptor,
    enclosing: Arc<TypeDescriptor>,
}

impl FixedMethodInvoker {
    pub fn new(
        supplier: InstanceSupplier,
        method: MethodDescriptor,
        enclosing: Arc<TypeDescriptor>,
    ) -> Self {
        Self {
            supplier,
            method,
            enclosing,
        }
    }

    pub fn enclosing_type(&self) -> &TypeDescriptor {
        &self.enclosing
    }
}

impl Executable for FixedMethodInvoker {
    fn method(&self) -> &MethodDescriptor {
        &self.method
    }

    fn execute(
        &self,
        _source: Option<&Arc<dyn ApiComponent>>,
        args: &OperationArguments,
    ) -> Result<Value, OperationFailure> {
        let target = self
            .supplier
            .get()
            .map_err(|e| OperationFailure::new(TARGET_RESOLUTION_KIND, e.to_string()))?;
        target.invoke(&self.method, args)
    }
}

/// Unbound handle dispatching on the source passed at call time
pub struct MethodInvoker {
    method: MethodDescriptor,
    enclosing: Arc<TypeDescriptor>,
}

impl MethodInvoker {
    pub fn new(method: MethodDescriptor, enclosing: Arc<TypeDescriptor>) -> Self {
        Self { method, enclosing }
    }
}

impl Executable for MethodInvoker {
    fn method(&self) -> &MethodDescriptor {
        &self.method
    }

    fn execute(
        &self,
        source: Option<&Arc<dyn ApiComponent>>,
        args: &OperationArguments,
    ) -> Result<Value, OperationFailure> {
        let Some(target) = source else {
            return Err(OperationFailure::new(
                TARGET_RESOLUTION_KIND,
                format!(
                    "No target instance for {}.{}",
                    self.enclosing.name,
                    self.method.signature()
                ),
            ));
        };
        target.invoke(&self.method, args)
    }
}

/// Invoker factory selecting the method through the exposed type
#[derive(Debug, Default, Clone, Copy)]
pub struct ProxyAwareInvokerFactory;

impl MethodInvokerFactory for ProxyAwareInvokerFactory {
    fn factory_name(&self) -> &str {
        "proxy-aware"
    }

    fn create(
        &self,
        target: Option<InstanceSupplier>,
        method: &MethodDescriptor,
        enclosing: &Arc<TypeDescriptor>,
        exposed: &Arc<TypeDescriptor>,
    ) -> Arc<dyn Executable> {
        let invocable = select_invocable_method(method, exposed);
        trace!(
            method = %method.signature(),
            enclosing = %enclosing.name,
            exposed = %exposed.name,
            bound = target.is_some(),
            "Creating invoker"
        );
        match target {
            Some(supplier) => Arc::new(FixedMethodInvoker::new(
                supplier,
                invocable,
                Arc::clone(enclosing),
            )),
            None => Arc::new(MethodInvoker::new(invocable, Arc::clone(enclosing))),
        }
    }
}
