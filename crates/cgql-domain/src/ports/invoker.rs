//! Invocation Handle Ports

use std::sync::Arc;

use serde_json::Value;

use super::ApiComponent;
use crate::failure::OperationFailure;
use crate::value_objects::{InstanceSupplier, MethodDescriptor, OperationArguments, TypeDescriptor};

/// A callable handle for one method
pub trait Executable: Send + Sync {
    /// Method the handle calls
    fn method(&self) -> &MethodDescriptor;

    /// Call the method
    ///
    /// Handles bound to a target ignore `source`; unbound handles dispatch
    /// on it and fail when it is absent.
    fn execute(
        &self,
        source: Option<&Arc<dyn ApiComponent>>,
        args: &OperationArguments,
    ) -> Result<Value, OperationFailure>;
}

/// Produces invocation handles for component methods
pub trait MethodInvokerFactory: Send + Sync {
    /// Name used in logs
    fn factory_name(&self) -> &str;

    /// Create a handle for `method` declared on `enclosing`, for a component
    /// whose concrete type is `exposed`
    ///
    /// `target` is `None` for unbound dispatch.
    fn create(
        &self,
        target: Option<InstanceSupplier>,
        method: &MethodDescriptor,
        enclosing: &Arc<TypeDescriptor>,
        exposed: &Arc<TypeDescriptor>,
    ) -> Arc<dyn Executable>;
}
