use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use plugin_publish::cli::{Args, PublishCli};
use plugin_publish::publisher::Publisher;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = PublishCli::parse();

    // RUST_LOG wins over --verbose
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    if cli.verbose {
        tracing::info!("Running plugin-publish with verbose output");
    }

    let args: Args = cli.into();
    let publisher = Publisher::new(args)?;
    publisher.run().await?;

    Ok(())
}
