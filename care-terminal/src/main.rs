mod app;
mod cli;
mod config;

use care_flow::{FileSnapshotBackend, HttpCareApi, SessionStateStore};
use clap::Parser;
use std::sync::Arc;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{app::App, cli::Cli, config::TerminalConfig};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = TerminalConfig::from_env().with_overrides(cli.api_url, cli.state_dir);
    debug!(api_url = config.api_url(), state_dir = %config.state_dir().display(), "configuration");

    let store = SessionStateStore::new(Arc::new(FileSnapshotBackend::new(config.state_dir())));
    let api = Arc::new(HttpCareApi::new(config.api_url()));
    let mut app = App::start(store, api);

    let mut stdout = std::io::stdout().lock();
    app.handle(cli.command, &mut stdout).await
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "care_flow=debug,care=debug" } else { "warn" };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    // Logs go to stderr so rendered views stay clean on stdout.
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}
