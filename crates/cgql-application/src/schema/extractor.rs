//! Component Descriptor Extractor
//!
//! Reads the container registry and produces one [`ComponentDescriptor`] per
//! registration carrying the API marker.

use std::sync::Arc;

use cgql_domain::constants::GRAPHQL_API_MARKER;
use cgql_domain::ports::{ApiComponent, BeanRegistry};
use cgql_domain::value_objects::{
    BeanSource, CollaboratorCriterion, ComponentFactory, ComponentScope, InstanceSupplier,
    TypeDescriptor,
};
use cgql_domain::{Error, Result};
use tracing::debug;

use super::descriptor::ComponentDescriptor;

pub struct ComponentDescriptorExtractor {
    registry: Arc<dyn BeanRegistry>,
}

impl ComponentDescriptorExtractor {
    pub fn new(registry: Arc<dyn BeanRegistry>) -> Self {
        Self { registry }
    }

    /// Descriptors for every marked registration, in registry order
    pub fn extract(&self) -> Result<Vec<ComponentDescriptor>> {
        self.registry
            .bean_names_for_marker(GRAPHQL_API_MARKER)
            .into_iter()
            .map(|name| self.describe(name))
            .collect()
    }

    fn describe(&self, name: String) -> Result<ComponentDescriptor> {
        let definition = self.registry.bean_definition(&name)?;

        let (declared_type, criteria): (Arc<TypeDescriptor>, Vec<CollaboratorCriterion>) =
            match definition.source() {
                BeanSource::FactoryMethod(metadata) => (
                    Arc::clone(&metadata.return_type),
                    metadata.resolver_builders.clone(),
                ),
                BeanSource::Class => {
                    let declared = match definition.root_definition().declared_type() {
                        Some(t) => Arc::clone(t),
                        None => self.unwrapped_type(&name)?,
                    };
                    let criteria = declared.resolver_builders.clone();
                    (declared, criteria)
                }
            };

        let exposed_type = self
            .registry
            .bean_type(&name)
            .map_err(|e| malformed(&name, &e))?;

        let scope = ComponentScope::from_flags(
            self.registry.is_singleton(&name),
            self.registry.is_prototype(&name),
        );

        debug!(
            component = %name,
            declared = %declared_type.name,
            exposed = %exposed_type.name,
            scope = ?scope,
            collaborators = criteria.len(),
            "Extracted component descriptor"
        );

        Ok(ComponentDescriptor {
            supplier: self.supplier(&name, scope),
            name,
            scope,
            declared_type,
            exposed_type,
            criteria,
        })
    }

    /// Type of the live instance, behind any wrappers
    fn unwrapped_type(&self, name: &str) -> Result<Arc<TypeDescriptor>> {
        self.registry
            .target_type(name)
            .map_err(|e| malformed(name, &e))
    }

    /// Shared lazy supplier for singletons, per-call supplier otherwise
    fn supplier(&self, name: &str, scope: ComponentScope) -> InstanceSupplier {
        let registry = Arc::clone(&self.registry);
        let bean_name = name.to_owned();
        let factory: ComponentFactory = Arc::new(move || -> Result<Arc<dyn ApiComponent>> {
            registry.get_bean(&bean_name)?.into_component(&bean_name)
        });
        match scope {
            ComponentScope::Singleton => InstanceSupplier::shared(factory),
            ComponentScope::Prototype | ComponentScope::Unknown => {
                InstanceSupplier::per_call(factory)
            }
        }
    }
}

fn malformed(name: &str, cause: &Error) -> Error {
    Error::malformed_descriptor(name, format!("no determinable type: {cause}"))
}
