//! API Component Port

use std::sync::Arc;

use serde_json::Value;

use crate::failure::OperationFailure;
use crate::value_objects::{MethodDescriptor, OperationArguments, TypeDescriptor};

/// A component whose methods are exposed as operations
///
/// Wrappers adding cross-cutting behavior implement this trait too and
/// report the wrapped component's type from [`target_type`](Self::target_type),
/// so callers cannot tell them apart from the component itself.
pub trait ApiComponent: Send + Sync {
    /// Concrete type of the component behind any wrappers
    fn target_type(&self) -> Arc<TypeDescriptor>;

    /// Invoke one of the component's methods
    fn invoke(
        &self,
        method: &MethodDescriptor,
        args: &OperationArguments,
    ) -> Result<Value, OperationFailure>;
}
