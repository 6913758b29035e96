mod app;
mod commands;
mod error;
mod helpers;

use app::App as CLI;
use clap::Parser;
use std::env;
use std::io;
use tracing::debug;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn setup_tracing(cli: &CLI) {
    let level = cli.get_log_level();
    let filter = ["goenv_cli", "goenv_core", "starbase_utils"]
        .iter()
        .map(|module| format!("{module}={level}"))
        .collect::<Vec<_>>()
        .join(",");

    tracing_subscriber::registry()
        .with(EnvFilter::new(filter))
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> miette::Result<()> {
    let cli = CLI::parse();

    setup_tracing(&cli);

    debug!(
        args = ?env::args().collect::<Vec<_>>(),
        "Running goenv v{}",
        env!("CARGO_PKG_VERSION")
    );

    commands::install(cli).await
}
