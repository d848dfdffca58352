//! GraphQL Server Builder
//!
//! Mounts the GraphQL and GraphiQL routes described by an [`AppConfig`] on a
//! Rocket instance. A source is only required when GraphQL is enabled.

use std::sync::Arc;

use cgql_application::GraphQlSource;
use cgql_infrastructure::config::AppConfig;
use rocket::{Build, Rocket, routes};
use tracing::info;

use crate::graphiql::{self, GraphiqlHandler};
use crate::graphql::{self, GraphQlEndpoint};

#[derive(Default)]
pub struct GraphQlServerBuilder {
    config: Option<AppConfig>,
    source: Option<Arc<GraphQlSource>>,
}

impl GraphQlServerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = Some(config);
        self
    }

    #[must_use]
    pub fn with_source(mut self, source: GraphQlSource) -> Self {
        self.source = Some(Arc::new(source));
        self
    }

    /// Build the Rocket instance
    ///
    /// # Errors
    /// `MissingDependency` when GraphQL is enabled and no source was given,
    /// `RouteConflict` when the GraphQL and GraphiQL paths are equal.
    pub fn build(self) -> Result<Rocket<Build>, BuilderError> {
        let config = self.config.ok_or(BuilderError::MissingDependency("config"))?;
        let server = &config.server;
        let graphql = &config.graphql;

        let figment = rocket::Config::figment()
            .merge(("address", server.host.clone()))
            .merge(("port", server.port));
        let mut rocket = rocket::custom(figment);

        if !graphql.enabled {
            info!("GraphQL disabled, no routes mounted");
            return Ok(rocket);
        }

        let source = self
            .source
            .ok_or(BuilderError::MissingDependency("GraphQL source"))?;
        let graphql_route = server.route(&graphql.path);
        let print_schema = graphql.schema.printer.enabled;

        rocket = rocket
            .manage(GraphQlEndpoint::new(source, print_schema))
            .mount(
                graphql_route.clone(),
                routes![graphql::execute, graphql::reject_get],
            );
        if print_schema {
            rocket = rocket.mount(graphql_route.clone(), routes![graphql::schema]);
        }

        if graphql.graphiql.enabled {
            if graphql.graphiql.path == graphql.path {
                return Err(BuilderError::RouteConflict(graphql.path.clone()));
            }
            let graphiql_route = server.route(&graphql.graphiql.path);
            rocket = rocket
                .manage(GraphiqlHandler::new(
                    graphql.path.clone(),
                    graphql.websocket.path.clone(),
                    graphql.graphiql.path.clone(),
                ))
                .mount(graphiql_route.clone(), routes![graphiql::page]);
            info!(path = %graphiql_route, "GraphiQL mounted");
        }

        info!(path = %graphql_route, print_schema, "GraphQL endpoint mounted");
        Ok(rocket)
    }
}

/// Errors that can occur during server building
#[derive(Debug, thiserror::Error)]
pub enum BuilderError {
    /// A required dependency was not provided
    #[error("Missing required dependency: {0}")]
    MissingDependency(&'static str),

    /// The GraphQL and GraphiQL routes share a path
    #[error("GraphQL and GraphiQL are both mounted at '{0}'")]
    RouteConflict(String),
}
