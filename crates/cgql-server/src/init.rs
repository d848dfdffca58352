//! Server Initialization
//!
//! Loads configuration, initializes logging, builds the application context
//! and the schema, then launches Rocket.

use std::path::Path;

use cgql_domain::Error;
use cgql_infrastructure::config::{AppConfig, ConfigLoader};
use cgql_infrastructure::di::{AppContext, init_app};
use cgql_infrastructure::logging::init_logging;
use rocket::{Build, Rocket};
use tracing::{error, info};

use crate::builder::GraphQlServerBuilder;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Run the City GraphQL server until it shuts down
pub async fn run_server(config_path: Option<&Path>) -> Result<(), BoxError> {
    let config = load_config(config_path)?;
    init_logging(&config.logging)?;

    info!(
        host = %config.server.host,
        port = config.server.port,
        context_path = %config.server.context_path,
        "Starting City GraphQL server"
    );

    let app = init_app(config)?;
    let rocket = create_rocket(&app)?;
    if let Err(e) = rocket.launch().await {
        error!(error = %e, "Server terminated with an error");
        return Err(Error::infrastructure(format!("Server terminated: {e}")).into());
    }
    Ok(())
}

/// Rocket instance serving the schema built from `app`
///
/// The schema is built here, so a broken component setup fails before the
/// server binds.
pub fn create_rocket(app: &AppContext) -> Result<Rocket<Build>, BoxError> {
    let config: AppConfig = (*app.config).clone();
    let mut builder = GraphQlServerBuilder::new();
    if config.graphql.enabled {
        builder = builder.with_source(app.graphql_source()?);
    }
    Ok(builder.with_config(config).build()?)
}

fn load_config(config_path: Option<&Path>) -> Result<AppConfig, BoxError> {
    let loader = match config_path {
        Some(path) => ConfigLoader::new().with_config_path(path),
        None => ConfigLoader::new(),
    };
    Ok(loader.load()?)
}
