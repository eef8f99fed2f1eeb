//! CLI entry point - the composition root.
//!
//! Loads `.env`, parses arguments, initializes logging and dispatches to
//! the handlers. Every failure is printed once here and turned into an
//! exit code.

use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use greconf_cli::commands::scope_from_flag;
use greconf_cli::{Cli, CliConfig, CliError, Commands, bootstrap, handlers};

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<(), CliError> {
    let ctx = bootstrap(&CliConfig::from_cli(&cli))?;

    let Some(command) = cli.command else {
        // No command provided - show help
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Register { target } => handlers::register::execute(&ctx, &target),
        Commands::Unregister { target } => handlers::unregister::execute(&ctx, &target),
        Commands::Status { target } => handlers::status::execute(&ctx, &target),
        Commands::List { global, json } => {
            handlers::list::execute(&ctx, scope_from_flag(global), json).map_err(CliError::from)
        }
        Commands::Paths { location } => handlers::paths::execute(&ctx, location.as_ref()),
    }
}

fn main() -> ExitCode {
    // Load environment variables before clap reads them
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {e}", e.severity());
            let code = u8::try_from(e.exit_code()).unwrap_or(1);
            ExitCode::from(code)
        }
    }
}
