//! Schema Assembler
//!
//! Turns component descriptors into one immutable [`Schema`]. Any failure
//! aborts the whole build; a partial schema is never returned.

use std::sync::Arc;

use cgql_domain::ports::{ArgumentInjector, BeanRegistry, MethodInvokerFactory, OperationResolver};
use cgql_domain::value_objects::CollaboratorCriterion;
use cgql_domain::Result;
use tracing::{debug, info};

use super::descriptor::ComponentDescriptor;
use super::injector::RequestHeaderInjector;
use super::invocation::ProxyAwareInvokerFactory;
use super::model::{InjectedParameter, OperationDefinition, Schema, SchemaBuilder};
use super::resolver::{CollaboratorResolver, ResolutionStats};

/// State of one schema build, created fresh per build and dropped with it
pub struct BuildContext {
    resolver: CollaboratorResolver,
    invoker_factory: Arc<dyn MethodInvokerFactory>,
    injectors: Vec<Arc<dyn ArgumentInjector>>,
}

impl BuildContext {
    /// Context with the proxy-aware invoker factory and the request header
    /// injector
    pub fn new(registry: Arc<dyn BeanRegistry>, stats: Arc<ResolutionStats>) -> Self {
        Self {
            resolver: CollaboratorResolver::with_stats(registry, stats),
            invoker_factory: Arc::new(ProxyAwareInvokerFactory),
            injectors: vec![Arc::new(RequestHeaderInjector)],
        }
    }

    #[must_use]
    pub fn with_invoker_factory(mut self, factory: Arc<dyn MethodInvokerFactory>) -> Self {
        self.invoker_factory = factory;
        self
    }

    #[must_use]
    pub fn with_injector(mut self, injector: Arc<dyn ArgumentInjector>) -> Self {
        self.injectors.push(injector);
        self
    }

    pub fn resolver(&self) -> &CollaboratorResolver {
        &self.resolver
    }
}

pub struct SchemaAssembler {
    context: BuildContext,
}

impl SchemaAssembler {
    pub fn new(context: BuildContext) -> Self {
        Self { context }
    }

    /// Build the schema; operations follow descriptor order
    pub fn assemble(self, descriptors: Vec<ComponentDescriptor>) -> Result<Schema> {
        let mut builder = SchemaBuilder::default();
        let components = descriptors.len();

        for descriptor in &descriptors {
            let criteria = if descriptor.criteria.is_empty() {
                vec![CollaboratorCriterion::default_resolver_builder()]
            } else {
                descriptor.criteria.clone()
            };
            let params = descriptor.builder_params();

            for criterion in &criteria {
                let resolved = self.context.resolver.resolve(criterion)?;
                let resolver_builder = resolved
                    .with_method_invoker_factory(Arc::clone(&self.context.invoker_factory))
                    .unwrap_or(resolved);

                for resolver in resolver_builder.build_resolvers(&params) {
                    debug!(
                        component = %descriptor.name,
                        operation = %resolver.operation_name,
                        builder = resolver_builder.builder_name(),
                        "Registering operation"
                    );
                    builder.add(self.define(
                        descriptor,
                        resolver_builder.builder_name(),
                        resolver,
                    ))?;
                }
            }
        }

        let schema = builder.build();
        info!(
            components,
            operations = schema.len(),
            "GraphQL schema assembled"
        );
        Ok(schema)
    }

    fn define(
        &self,
        descriptor: &ComponentDescriptor,
        builder_name: &str,
        resolver: OperationResolver,
    ) -> OperationDefinition {
        let mut arguments = Vec::new();
        let mut injected = Vec::new();
        for parameter in &resolver.method.parameters {
            match self
                .context
                .injectors
                .iter()
                .find(|i| i.supports(parameter.scalar, &parameter.annotations))
            {
                Some(injector) => injected.push(InjectedParameter {
                    parameter: parameter.clone(),
                    injector: Arc::clone(injector),
                }),
                None => arguments.push(parameter.clone()),
            }
        }

        OperationDefinition {
            name: resolver.operation_name,
            kind: resolver.kind,
            description: resolver.description,
            component: descriptor.name.clone(),
            method: resolver.method,
            arguments,
            injected,
            executable: resolver.executable,
            collaborators: vec![builder_name.to_owned()],
        }
    }
}
