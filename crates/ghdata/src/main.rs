#![forbid(unsafe_code)]

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use clap::error::ErrorKind;
use ghdata::cli::app::{Cli, Command, RuntimeArgs};
use ghdata::cli::commands::{self, NOT_FOUND_CODE};
use ghdata::config::RuntimeConfig;
use ghdata::models::QueryEnvelopeCommandFailure;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const EXIT_SUCCESS: i32 = 0;
const EXIT_RUNTIME_FAILURE: i32 = 1;
const EXIT_NOT_FOUND: i32 = 3;
const EXIT_USAGE_ERROR: i32 = 64;

const DEFAULT_LOG_FILTER: &str = "warn,ghdata=info";

fn main() {
    std::process::exit(run());
}

fn run() -> i32 {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(error) => return exit_code_for_parse_error(error),
    };
    init_tracing();

    let command_name = command_name(&cli.command);
    info!("starting `{command_name}`");

    match execute(cli) {
        Ok(()) => {
            info!("completed `{command_name}` (exit_code={EXIT_SUCCESS})");
            EXIT_SUCCESS
        }
        Err(error) => {
            let exit_code = report_runtime_error(&error);
            error!("failed `{command_name}` (exit_code={exit_code})");
            exit_code
        }
    }
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn execute(cli: Cli) -> Result<()> {
    match cli.command {
        Command::RepoId(args) => {
            let config = resolve_runtime_config(&cli.runtime)?;
            commands::lookup::run_repo_id(&args, &config)
        }
        Command::UserId(args) => {
            let config = resolve_runtime_config(&cli.runtime)?;
            commands::lookup::run_user_id(&args, &config)
        }
        Command::Metric(args) => {
            let config = resolve_runtime_config(&cli.runtime)?;
            commands::metric::run(&args, &config)
        }
        Command::Schema => commands::schema::run(),
    }
}

/// Prints the failure envelope (or the plain error chain) and picks the
/// exit code.
fn report_runtime_error(error: &anyhow::Error) -> i32 {
    match error.downcast_ref::<QueryEnvelopeCommandFailure>() {
        Some(failure) => {
            println!("{failure}");
            if failure.error_code() == Some(NOT_FOUND_CODE) {
                EXIT_NOT_FOUND
            } else {
                EXIT_RUNTIME_FAILURE
            }
        }
        None => {
            eprintln!("{error:#}");
            EXIT_RUNTIME_FAILURE
        }
    }
}

fn exit_code_for_parse_error(error: clap::Error) -> i32 {
    match error.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            let _ = error.print();
            EXIT_SUCCESS
        }
        _ => {
            let _ = error.print();
            EXIT_USAGE_ERROR
        }
    }
}

fn command_name(command: &Command) -> &'static str {
    match command {
        Command::RepoId(_) => "repo-id",
        Command::UserId(_) => "user-id",
        Command::Metric(args) => args.metric.name(),
        Command::Schema => "schema",
    }
}

fn resolve_runtime_config(args: &RuntimeArgs) -> Result<RuntimeConfig> {
    let home_dir = match &args.home_dir {
        Some(path) => path.clone(),
        None => std::env::var_os("HOME")
            .map(PathBuf::from)
            .ok_or_else(|| anyhow!("HOME is not set; pass --home-dir"))?,
    };

    let cwd = match &args.cwd {
        Some(path) => path.clone(),
        None => std::env::current_dir().context("failed to read current directory")?,
    };

    ghdata::config::resolve_runtime_config(
        &home_dir,
        &cwd,
        args.database.as_deref(),
        args.publicwww_key.as_deref(),
    )
}
