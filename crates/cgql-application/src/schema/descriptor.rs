//! Normalized view of one API component

use std::sync::Arc;

use cgql_domain::ports::ResolverBuilderParams;
use cgql_domain::value_objects::{
    CollaboratorCriterion, ComponentScope, InstanceSupplier, TypeDescriptor,
};

/// Everything the assembler needs to know about one component
///
/// Built once per component per schema build and dropped with the build.
#[derive(Debug, Clone)]
pub struct ComponentDescriptor {
    /// Registration name
    pub name: String,
    pub scope: ComponentScope,
    pub supplier: InstanceSupplier,
    /// Type whose members are introspected
    pub declared_type: Arc<TypeDescriptor>,
    /// Concrete type the container hands out
    pub exposed_type: Arc<TypeDescriptor>,
    /// Requested collaborators, in declaration order
    pub criteria: Vec<CollaboratorCriterion>,
}

impl ComponentDescriptor {
    pub fn builder_params(&self) -> ResolverBuilderParams {
        ResolverBuilderParams {
            supplier: self.supplier.clone(),
            declared_type: Arc::clone(&self.declared_type),
            exposed_type: Arc::clone(&self.exposed_type),
        }
    }
}
