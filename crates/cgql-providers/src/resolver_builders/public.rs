//! Public-method resolver builder
//!
//! Exposes every public method. Unannotated methods become queries named
//! after the method.

use std::sync::Arc;

use cgql_application::registry::{BeanRegistration, SUPPORT_BEANS};
use cgql_domain::constants::PUBLIC_RESOLVER_BUILDER_KIND;
use cgql_domain::ports::{
    MethodInvokerFactory, OperationResolver, ResolverBuilder, ResolverBuilderParams,
};
use cgql_domain::value_objects::BeanDefinition;

use super::operation_resolver;
use crate::invoker::DirectMethodInvokerFactory;

pub const BEAN_NAME: &str = "publicResolverBuilder";

#[derive(Clone)]
pub struct PublicResolverBuilder {
    invoker_factory: Arc<dyn MethodInvokerFactory>,
}

impl PublicResolverBuilder {
    pub fn new() -> Self {
        Self {
            invoker_factory: Arc::new(DirectMethodInvokerFactory),
        }
    }

    pub fn invoker_factory_name(&self) -> &str {
        self.invoker_factory.factory_name()
    }

    pub fn definition() -> BeanDefinition {
        BeanDefinition::resolver_builder(
            BEAN_NAME,
            &[PUBLIC_RESOLVER_BUILDER_KIND],
            Arc::new(Self::new()),
        )
    }
}

impl Default for PublicResolverBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ResolverBuilder for PublicResolverBuilder {
    fn builder_name(&self) -> &str {
        PUBLIC_RESOLVER_BUILDER_KIND
    }

    fn build_resolvers(&self, params: &ResolverBuilderParams) -> Vec<OperationResolver> {
        params
            .declared_type
            .methods
            .iter()
            .filter(|m| m.is_public())
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
static PUBLIC_RESOLVER_BUILDER: BeanRegistration = BeanRegistration {
    name: BEAN_NAME,
    description: "Exposes every public method",
    definition: PublicResolverBuilder::definition,
};
