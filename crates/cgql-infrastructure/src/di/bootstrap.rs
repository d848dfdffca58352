//! Composition root
//!
//! ```text
//! AppConfig ──► ContextBuilder (linkme slices) ──► ApplicationContext
//!                                                        │
//!                         SchemaFactory ◄────────────────┘
//!                               │
//!                 GraphQlSourceFactory ──► GraphQlSource
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! let app = init_app(AppConfig::default())?;
//! let source = app.graphql_source()?;
//! ```

use std::sync::Arc;

use cgql_application::{GraphQlSource, GraphQlSourceFactory, SchemaFactory};
use cgql_domain::error::Result;
use cgql_domain::ports::BeanRegistry;
use tracing::info;

use super::context::{ApplicationContext, ContextBuilder};
use crate::config::AppConfig;

/// Application context: configuration, container and schema factory
pub struct AppContext {
    /// Application configuration
    pub config: Arc<AppConfig>,
    context: Arc<ApplicationContext>,
    schema_factory: SchemaFactory,
}

impl AppContext {
    pub fn context(&self) -> &Arc<ApplicationContext> {
        &self.context
    }

    pub fn schema_factory(&self) -> &SchemaFactory {
        &self.schema_factory
    }

    /// Build a schema and wrap it in a source ready to execute requests
    pub fn graphql_source(&self) -> Result<GraphQlSource> {
        let schema = Arc::new(self.schema_factory.get_object()?);
        Ok(GraphQlSourceFactory::new(schema).get_object())
    }
}

/// Initialize the application from every registered bean
pub fn init_app(config: AppConfig) -> Result<AppContext> {
    init_app_with(config, ContextBuilder::new().with_registered_beans())
}

/// Initialize the application from an explicit builder
pub fn init_app_with(config: AppConfig, builder: ContextBuilder) -> Result<AppContext> {
    let context = builder.build()?;
    let registry: Arc<dyn BeanRegistry> = context.clone();
    info!(
        beans = context.len(),
        components = registry
            .bean_names_for_marker(cgql_domain::constants::GRAPHQL_API_MARKER)
            .len(),
        "Application context initialized"
    );
    Ok(AppContext {
        config: Arc::new(config),
        schema_factory: SchemaFactory::new(registry),
        context,
    })
}
