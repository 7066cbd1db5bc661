//! Book Fair Admin
//!
//! Command-line admin dashboard for the book fair stall reservation
//! system, with an in-process mock of the REST API for development.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod config;
mod render;
mod session;
mod state;
mod viewmodel;

fn main() {
    // Initialize logging on stderr, leaving stdout to command output
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = cli::Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("{:#}", e);
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: cli::Cli) -> anyhow::Result<()> {
    let config = config::Config::load(cli.config.as_deref())?;
    tracing::info!(
        mock = config.mock.enabled,
        api = %config.api_base_url,
        "Starting bookfair-admin"
    );

    // Initialize tokio runtime for networking
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let mut state = state::AppState::new(config)?;

        match viewmodel::auth::restore(&mut state).await {
            Ok(Some(user)) => tracing::debug!(user_id = user.user_id, "Resumed session"),
            Ok(None) => {}
            Err(e) => tracing::warn!(error = %e, "Could not restore session"),
        }

        cli::run(&mut state, cli.command).await
    })
}
