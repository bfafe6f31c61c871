use clap::Parser;
use dotenv::dotenv;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;
mod terminal;

use auth_cell::{FileSessionStore, SessionManager};
use shared_config::AppConfig;

use crate::cli::Cli;
use crate::commands::Portal;
use crate::terminal::Terminal;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Loading Env Vars
    dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = AppConfig::from_env();
    if !config.is_configured() {
        warn!("API endpoints are not fully configured");
    }

    let store = FileSessionStore::open(&config.session_file)?;
    info!("Using session file {}", store.path().display());

    let portal = Portal::new(config, SessionManager::new(store), Terminal::new(cli.yes));
    portal.run(cli.command).await
}
