use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod config;
mod error;
mod handlers;
mod openapi_tests;
mod router;
mod schemas;
mod tests;

use cli::Cli;

/// Main entry point for the intake application.
#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before clap reads its env fallbacks
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "intake=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Intake application starting up");

    let cli = Cli::parse();
    cli.run().await?;

    Ok(())
}
