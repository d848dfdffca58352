//! Argument Injector Port

use serde_json::Value;

use crate::value_objects::{ParameterAnnotation, ParameterDescriptor, RequestContext, ScalarType};

/// Supplies parameter values from the request instead of the client
///
/// Parameters an injector supports are hidden from the exposed argument list
/// and filled in at call time.
pub trait ArgumentInjector: Send + Sync {
    fn injector_name(&self) -> &str;

    fn supports(&self, scalar: ScalarType, annotations: &[ParameterAnnotation]) -> bool;

    /// Value for `parameter`; `Value::Null` when the request lacks it
    fn resolve(&self, request: &RequestContext, parameter: &ParameterDescriptor) -> Value;
}
