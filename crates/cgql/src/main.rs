//! City GraphQL - Entry Point
//!
//! Loads configuration, builds the container from every registered bean and
//! serves the assembled schema.

use std::path::PathBuf;

use cgql::application::registry::list_registrations;
use clap::Parser;

/// Command line interface for City GraphQL
#[derive(Parser, Debug)]
#[command(name = "cgql")]
#[command(about = "City GraphQL - GraphQL schema assembled from container components")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Print the registered beans and exit
    #[arg(long)]
    pub list_beans: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if cli.list_beans {
        for (name, description) in list_registrations() {
            println!("{name:<32} {description}");
        }
        return Ok(());
    }
    cgql::run_server(cli.config.as_deref())
        .await
        .map_err(anyhow::Error::from_boxed)?;
    Ok(())
}
