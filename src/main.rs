mod cli;
mod commands;
mod config;
mod render;
mod telemetry;

use clap::Parser;
use cli::Cli;
use commands::Context;
use config::Config;
use std::process::ExitCode;
use telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> ExitCode {
    openssl_probe::init_ssl_cert_env_vars();

    let subscriber = get_subscriber("petcare".into(), "warn".into());
    if let Err(e) = init_subscriber(subscriber) {
        eprintln!("Unable to set up logging: {}", e);
    }

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::new().with_overrides(cli.base_url.as_deref(), cli.timezone.as_deref())?;
    let ctx = Context::new(&config);
    commands::run(cli.command, &ctx).await
}
