pub mod lookup;
pub mod metric;
pub mod schema;

use anyhow::Result;
use serde_json::json;

use crate::catalog::GhData;
use crate::config::RuntimeConfig;
use crate::error::GhDataError;
use crate::models::{QueryEnvelope, RepositoryId};
use crate::search::PublicWwwClient;
use crate::sqlite::{DataStore, SqliteStore};

/// Envelope error code for an owner/repo or login with no matching row.
pub const NOT_FOUND_CODE: &str = "not_found";

pub(crate) fn open_catalog(command: &str, config: &RuntimeConfig) -> Result<GhData<SqliteStore>> {
    let store = SqliteStore::open(&config.database_path).map_err(|error| {
        QueryEnvelope::error(
            command,
            "database_unavailable",
            "unable to open GHTorrent database",
        )
        .with_error_details(json!({
            "database_path": config.database_path.display().to_string(),
            "cause": describe(error),
        }))
        .into_failure()
    })?;

    let catalog = GhData::new(store);
    let Some(api_key) = config.publicwww_api_key.as_deref() else {
        return Ok(catalog);
    };
    let client = PublicWwwClient::new(api_key).map_err(|error| {
        QueryEnvelope::error(
            command,
            "search_unavailable",
            "unable to build web search client",
        )
        .with_error_details(json!({ "cause": describe(error) }))
        .into_failure()
    })?;
    Ok(catalog.with_search(client))
}

pub(crate) fn resolve_repository<S: DataStore>(
    catalog: &GhData<S>,
    command: &str,
    owner: &str,
    repo: &str,
) -> Result<RepositoryId> {
    match catalog.repository_id(owner, repo) {
        Ok(Some(id)) => Ok(id),
        Ok(None) => Err(QueryEnvelope::error(
            command,
            NOT_FOUND_CODE,
            format!("repository {owner}/{repo} not found"),
        )
        .with_error_details(json!({ "owner": owner, "repo": repo }))
        .into_failure()),
        Err(error) => Err(lookup_failure(command, error)),
    }
}

pub(crate) fn lookup_failure(command: &str, error: GhDataError) -> anyhow::Error {
    QueryEnvelope::error(command, "lookup_failed", "identifier lookup failed")
        .with_error_details(json!({ "cause": describe(error) }))
        .into_failure()
}

pub(crate) fn print_envelope(envelope: &QueryEnvelope) -> Result<()> {
    let encoded = serde_json::to_string(envelope).map_err(|error| {
        QueryEnvelope::error(
            envelope.command.as_str(),
            "response_encode_failed",
            "failed to encode query response",
        )
        .with_error_details(json!({ "cause": error.to_string() }))
        .into_failure()
    })?;
    println!("{encoded}");
    Ok(())
}

/// Error message followed by its source chain.
pub(crate) fn describe(error: GhDataError) -> String {
    format!("{:#}", anyhow::Error::new(error))
}
