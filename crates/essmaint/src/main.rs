mod cli;
mod error;

use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;

use essmaint_core::Engine;

use crate::cli::{Cli, Command};
use crate::error::AppError;

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
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), AppError> {
    let config = essmaint_config::load_config(cli.global.config.as_deref())?;
    let mut engine_config = essmaint_config::to_engine_config(&config)?;

    if let Some(path) = cli.global.inventory {
        engine_config.inventory_path = path;
    }

    let engine = Engine::new(engine_config)?;

    match cli.command {
        Command::Run => {
            let cancel = CancellationToken::new();

            // Ctrl-C abandons the in-flight dispatch queue and stops the
            // scheduler; every attempted command is still accounted for.
            let signal_cancel = cancel.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    info!("interrupt received; shutting down");
                    signal_cancel.cancel();
                }
            });

            engine.run(cancel).await;
            Ok(())
        }
        Command::Once => {
            let report = engine.run_cycle(&CancellationToken::new()).await?;
            info!(
                online = report.online,
                matched = report.matched,
                succeeded = report.succeeded,
                failed = report.failed,
                "cycle finished"
            );
            Ok(())
        }
    }
}
