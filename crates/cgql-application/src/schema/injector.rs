//! Request header argument injector

use cgql_domain::ports::ArgumentInjector;
use cgql_domain::value_objects::{
    ParameterAnnotation, ParameterDescriptor, RequestContext, ScalarType,
};
use serde_json::Value;
use tracing::debug;

/// Supplies header values to parameters annotated as header-bound
///
/// A missing header yields `null` rather than a failure.
#[derive(Debug, Default, Clone, Copy)]
pub struct RequestHeaderInjector;

impl ArgumentInjector for RequestHeaderInjector {
    fn injector_name(&self) -> &str {
        "request-header"
    }

    fn supports(&self, _scalar: ScalarType, annotations: &[ParameterAnnotation]) -> bool {
        annotations
            .iter()
            .any(|a| matches!(a, ParameterAnnotation::RequestHeader { .. }))
    }

    fn resolve(&self, request: &RequestContext, parameter: &ParameterDescriptor) -> Value {
        let Some(header) = parameter.header_name() else {
            return Value::Null;
        };
        let value = request.header(header);
        debug!(
            "Injecting '{}' header value '{:?}' as '{}' parameter value",
            header, value, parameter.name
        );
        value.map_or(Value::Null, |v| Value::String(v.to_owned()))
    }
}
