use anyhow::Result;
use clap::Args;
use serde_json::json;
use tracing::info;

use super::{NOT_FOUND_CODE, lookup_failure, open_catalog, print_envelope, resolve_repository};
use crate::config::RuntimeConfig;
use crate::models::QueryEnvelope;

#[derive(Debug, Clone, Args)]
pub struct RepoIdArgs {
    #[arg(long)]
    pub owner: String,

    #[arg(long)]
    pub repo: String,
}

#[derive(Debug, Clone, Args)]
pub struct UserIdArgs {
    #[arg(long)]
    pub login: String,
}

pub fn run_repo_id(args: &RepoIdArgs, config: &RuntimeConfig) -> Result<()> {
    const COMMAND: &str = "repo-id";

    let catalog = open_catalog(COMMAND, config)?;
    let id = resolve_repository(&catalog, COMMAND, &args.owner, &args.repo)?;
    info!(owner = %args.owner, repo = %args.repo, %id, "resolved repository");

    let envelope = QueryEnvelope::ok(
        COMMAND,
        json!({ "owner": args.owner, "repo": args.repo, "repository_id": id }),
    );
    print_envelope(&envelope)
}

pub fn run_user_id(args: &UserIdArgs, config: &RuntimeConfig) -> Result<()> {
    const COMMAND: &str = "user-id";

    let catalog = open_catalog(COMMAND, config)?;
    let id = catalog
        .user_id(&args.login)
        .map_err(|error| lookup_failure(COMMAND, error))?
        .ok_or_else(|| {
            QueryEnvelope::error(
                COMMAND,
                NOT_FOUND_CODE,
                format!("user {} not found", args.login),
            )
            .with_error_details(json!({ "login": args.login }))
            .into_failure()
        })?;
    info!(login = %args.login, %id, "resolved user");

    let envelope = QueryEnvelope::ok(COMMAND, json!({ "login": args.login, "user_id": id }));
    print_envelope(&envelope)
}
