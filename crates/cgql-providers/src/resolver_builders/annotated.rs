//! Annotated-method resolver builder
//!
//! Exposes the public methods carrying an operation annotation. This is the
//! builder used for components that request no collaborators.

use std::sync::Arc;

use cgql_application::registry::{BeanRegistration, SUPPORT_BEANS};
use cgql_domain::constants::ANNOTATED_RESOLVER_BUILDER_KIND;
use cgql_domain::ports::{
    MethodInvokerFactory, OperationResolver, ResolverBuilder, ResolverBuilderParams,
};
use cgql_domain::value_objects::BeanDefinition;

use super::operation_resolver;
use crate::invoker::DirectMethodInvokerFactory;

/// Registration name of the default annotated builder
pub const BEAN_NAME: &str = "annotatedResolverBuilder";

#[derive(Clone)]
pub struct AnnotatedResolverBuilder {
    invoker_factory: Arc<dyn MethodInvokerFactory>,
}

impl AnnotatedResolverBuilder {
    pub fn new() -> Self {
        Self {
            invoker_factory: Arc::new(DirectMethodInvokerFactory),
        }
    }

    /// Name of the invoker factory handles are created with
    pub fn invoker_factory_name(&self) -> &str {
        self.invoker_factory.factory_name()
    }

    /// Container registration of the default instance
    pub fn definition() -> BeanDefinition {
        BeanDefinition::resolver_builder(
            BEAN_NAME,
            &[ANNOTATED_RESOLVER_BUILDER_KIND],
            Arc::new(Self::new()),
        )
    }
}

impl Default for AnnotatedResolverBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ResolverBuilder for AnnotatedResolverBuilder {
    fn builder_name(&self) -> &str {
        ANNOTATED_RESOLVER_BUILDER_KIND
    }

    fn build_resolvers(&self, params: &ResolverBuilderParams) -> Vec<OperationResolver> {
        params
            .declared_type
            .methods
            .iter()
            .filter(|m| m.is_public() && m.operation.is_some())
            .map(|m| operation_resolver(m, params, &self.invoker_factory))
            .collect()
    }

    fn with_method_invoker_factory(
        &self,
        factory: Arc<dyn MethodInvokerFactory>,
    ) -> Option<Arc<dyn ResolverBuilder>> {
        Some(Arc::new(Self {
            invoker_factory: factory,
        }))
    }
}

#[linkme::distributed_slice(SUPPORT_BEANS)]
static ANNOTATED_RESOLVER_BUILDER: BeanRegistration = BeanRegistration {
    name: BEAN_NAME,
    description: "Exposes methods annotated as queries or mutations",
    definition: AnnotatedResolverBuilder::definition,
};
