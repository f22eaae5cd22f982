mod cli;
mod commands;
mod config;
mod error;
mod output;

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use movesys_core::{Console, MemorySession, RedirectSignal};

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(mut cli: Cli) -> Result<(), CliError> {
    let cfg = config::apply_overrides(movesys_config::load_config()?, &cli.global);
    cli.global.output = Some(config::output_format(&cli.global, &cfg)?);

    match cli.command {
        // Config commands don't need the API
        Command::Config(args) => commands::config_cmd::handle(args, &cfg, &cli.global),

        cmd => {
            let console_config = cfg.to_console_config()?;
            let session = cli
                .global
                .token
                .as_deref()
                .map_or_else(MemorySession::new, MemorySession::with_token);
            let redirect = Arc::new(RedirectSignal::new());
            let console = Console::new(&console_config, Arc::new(session), redirect.clone())?;

            tracing::debug!(command = ?cmd, "dispatching command");
            let result = commands::dispatch(cmd, &console, &cli.global).await;

            if redirect.take() {
                tracing::warn!(
                    login_path = %console_config.transport.login_path,
                    "session was evicted"
                );
            }
            result.map_err(|err| match err {
                CliError::AuthRequired { .. } => CliError::AuthRequired {
                    login_path: console_config.transport.login_path.clone(),
                },
                other => other,
            })
        }
    }
}
