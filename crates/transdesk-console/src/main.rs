//! Transdesk console - translation administration
//!
//! Main entry point for the `transdesk` binary.

use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use transdesk_common_async::CancellationToken;
use transdesk_common_config::Environment;
use transdesk_common_log::{LogConfig, LogLevel};
use transdesk_console::cli::Cli;
use transdesk_console::error::{CliError, Exit};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // .env files may carry the backend URL and log settings
    let environment = Environment::init();
    init_logging(&cli);
    environment.log();

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("error: failed to start async runtime: {e}");
            return Exit::GeneralError.into();
        }
    };

    match runtime.block_on(run(cli)) {
        Ok(()) => Exit::Success.into(),
        Err(e) => {
            error!("{e}");
            eprintln!("error: {e}");
            if let Some(hint) = e.hint() {
                eprintln!("hint: {hint}");
            }
            e.exit_code()
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = cli.load_config()?;

    let token = CancellationToken::new();
    let interrupt = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            interrupt.cancel();
        }
    });

    cli.execute(config, token).await
}

fn init_logging(cli: &Cli) {
    let mut config = LogConfig::from_env();
    if cli.verbose > 0 || cli.quiet {
        config = config.with_level(LogLevel::from_verbosity(cli.verbose, cli.quiet));
    }
    if let Err(e) = transdesk_common_log::init(config) {
        eprintln!("warning: logging disabled: {e}");
    }
}
