//! Resolver builder implementations

use std::sync::Arc;

use cgql_domain::ports::{MethodInvokerFactory, OperationResolver, ResolverBuilderParams};
use cgql_domain::value_objects::MethodDescriptor;

pub mod annotated;
pub mod public;

pub use annotated::AnnotatedResolverBuilder;
pub use public::PublicResolverBuilder;

/// Operation for `method`, bound to the component supplier
fn operation_resolver(
    method: &MethodDescriptor,
    params: &ResolverBuilderParams,
    invoker_factory: &Arc<dyn MethodInvokerFactory>,
) -> OperationResolver {
    OperationResolver {
        operation_name: method.operation_name().to_owned(),
        kind: method.operation_kind(),
        description: method.description().map(str::to_owned),
        method: method.clone(),
        executable: invoker_factory.create(
            Some(params.supplier.clone()),
            method,
            &params.declared_type,
            &params.exposed_type,
        ),
    }
}
