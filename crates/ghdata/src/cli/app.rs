use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use super::commands::{
    lookup::{RepoIdArgs, UserIdArgs},
    metric::MetricArgs,
};

#[derive(Debug, Parser)]
#[command(
    name = "ghdata",
    version,
    about = "Repository activity metrics over a GHTorrent database"
)]
pub struct Cli {
    #[command(flatten)]
    pub runtime: RuntimeArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Args)]
pub struct RuntimeArgs {
    /// GHTorrent SQLite database (defaults to ~/.ghdata/ghtorrent.sqlite).
    #[arg(long, global = true, value_name = "PATH", env = "GHDATA_DATABASE")]
    pub database: Option<PathBuf>,

    #[arg(long, global = true, value_name = "PATH")]
    pub home_dir: Option<PathBuf>,

    #[arg(long, global = true, value_name = "PATH")]
    pub cwd: Option<PathBuf>,

    /// API key for the PublicWWW export used by `linking-websites`.
    #[arg(
        long,
        global = true,
        value_name = "KEY",
        env = "GHDATA_PUBLICWWW_KEY",
        hide_env_values = true
    )]
    pub publicwww_key: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Resolve `owner/repo` to its project id.
    RepoId(RepoIdArgs),
    /// Resolve a login to its user id.
    UserId(UserIdArgs),
    /// Run one named metric for a repository.
    Metric(MetricArgs),
    /// Print the JSON schema of the query envelope.
    Schema,
}
