//! GraphQL source and its factory

use std::sync::Arc;

use cgql_domain::value_objects::RequestContext;

use super::engine::{self, GraphQlRequest, GraphQlResponse};
use super::error_mapping::{BadRequestExceptionResolver, ExceptionResolver};
use crate::schema::Schema;

/// A schema ready to execute requests
#[derive(Clone)]
pub struct GraphQlSource {
    schema: Arc<Schema>,
    exception_resolvers: Vec<Arc<dyn ExceptionResolver>>,
}

impl GraphQlSource {
    pub fn new(schema: Arc<Schema>, exception_resolvers: Vec<Arc<dyn ExceptionResolver>>) -> Self {
        Self {
            schema,
            exception_resolvers,
        }
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    pub fn exception_resolvers(&self) -> &[Arc<dyn ExceptionResolver>] {
        &self.exception_resolvers
    }

    pub fn execute(&self, request: &GraphQlRequest, context: &RequestContext) -> GraphQlResponse {
        engine::execute(self, request, context)
    }
}

impl std::fmt::Debug for GraphQlSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphQlSource")
            .field("operations", &self.schema.len())
            .field("exception_resolvers", &self.exception_resolvers.len())
            .finish()
    }
}

/// Produces a [`GraphQlSource`] that maps every failure to a bad request
///
/// Not cached: each call yields a new source.
pub struct GraphQlSourceFactory {
    schema: Arc<Schema>,
}

impl GraphQlSourceFactory {
    pub fn new(schema: Arc<Schema>) -> Self {
        Self { schema }
    }

    pub fn get_object(&self) -> GraphQlSource {
        GraphQlSource::new(
            Arc::clone(&self.schema),
            vec![Arc::new(BadRequestExceptionResolver)],
        )
    }

    pub fn is_singleton(&self) -> bool {
        false
    }
}
