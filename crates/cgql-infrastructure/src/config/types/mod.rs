//! Configuration types module

pub mod app;
pub mod graphql;
pub mod logging;
pub mod server;

pub use app::AppConfig;
pub use graphql::{GraphQlConfig, GraphiqlConfig, PrinterConfig, SchemaConfig, WebsocketConfig};
pub use logging::LoggingConfig;
pub use server::ServerConfig;
