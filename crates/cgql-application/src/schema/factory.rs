//! Schema factory

use std::sync::Arc;

use cgql_domain::ports::BeanRegistry;
use cgql_domain::Result;

use super::assembler::{BuildContext, SchemaAssembler};
use super::extractor::ComponentDescriptorExtractor;
use super::model::Schema;
use super::resolver::{ResolutionSnapshot, ResolutionStats};

/// Builds the GraphQL schema from the API components of a container
///
/// Not cached: every [`get_object`](Self::get_object) runs a full build
/// against the current registry and returns a new schema.
pub struct SchemaFactory {
    registry: Arc<dyn BeanRegistry>,
    stats: Arc<ResolutionStats>,
}

impl SchemaFactory {
    pub fn new(registry: Arc<dyn BeanRegistry>) -> Self {
        Self {
            registry,
            stats: Arc::new(ResolutionStats::default()),
        }
    }

    pub fn get_object(&self) -> Result<Schema> {
        let descriptors = ComponentDescriptorExtractor::new(Arc::clone(&self.registry)).extract()?;
        let context = BuildContext::new(Arc::clone(&self.registry), Arc::clone(&self.stats));
        SchemaAssembler::new(context).assemble(descriptors)
    }

    pub fn is_singleton(&self) -> bool {
        false
    }

    /// Collaborator resolution counters accumulated over every build
    pub fn resolution_stats(&self) -> ResolutionSnapshot {
        self.stats.snapshot()
    }
}
