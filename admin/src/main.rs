mod cli;
mod command;
mod console;

use std::sync::Arc;

use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vetclinic_core::{AdminPanel, ApiClient};

use crate::cli::Cli;
use crate::console::ConsoleNotifier;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vetclinic_core=info,vetclinic_admin=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = cli.client_config();
    info!(base_url = %config.base_url, envelope = ?config.envelope, "starting admin console");

    let mut admin = AdminPanel::new(ApiClient::new(config), Arc::new(ConsoleNotifier));
    admin.init();
    console::run(&mut admin)
}
