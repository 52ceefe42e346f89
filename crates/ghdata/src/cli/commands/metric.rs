use std::time::Instant;

use anyhow::Result;
use clap::{Args, ValueEnum};
use serde_json::{Value, json};
use tracing::{info, warn};

use super::{describe, lookup_failure, open_catalog, print_envelope, resolve_repository};
use crate::catalog::GhData;
use crate::config::RuntimeConfig;
use crate::error::GhDataError;
use crate::models::{Granularity, QueryEnvelope, RepositoryId, ResultTable, UserId};
use crate::sqlite::DataStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Metric {
    Stargazers,
    Commits,
    Forks,
    Issues,
    Pulls,
    IssuesWithClose,
    IssueActivity,
    Contributors,
    Contributions,
    CommitterLocations,
    IssueResponseTime,
    AverageIssueResponseTime,
    PullAcceptanceRate,
    RelativeActivityPm,
    RelativeActivityNonpm,
    RelativeActivity,
    LinkingWebsites,
}

impl Metric {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Stargazers => "stargazers",
            Self::Commits => "commits",
            Self::Forks => "forks",
            Self::Issues => "issues",
            Self::Pulls => "pulls",
            Self::IssuesWithClose => "issues_with_close",
            Self::IssueActivity => "issue_activity",
            Self::Contributors => "contributors",
            Self::Contributions => "contributions",
            Self::CommitterLocations => "committer_locations",
            Self::IssueResponseTime => "issue_response_time",
            Self::AverageIssueResponseTime => "average_issue_response_time",
            Self::PullAcceptanceRate => "pull_acceptance_rate",
            Self::RelativeActivityPm => "relative_activity_pm",
            Self::RelativeActivityNonpm => "relative_activity_nonpm",
            Self::RelativeActivity => "relative_activity",
            Self::LinkingWebsites => "linking_websites",
        }
    }

    /// Whether the metric is bucketed by `--granularity`.
    #[must_use]
    pub const fn is_bucketed(self) -> bool {
        matches!(
            self,
            Self::Stargazers | Self::Commits | Self::Forks | Self::Issues | Self::Pulls
        )
    }

    /// Whether the metric accepts a `--user` / `--user-id` filter.
    #[must_use]
    pub const fn accepts_user_filter(self) -> bool {
        matches!(self, Self::Contributions)
    }
}

#[derive(Debug, Clone, Args)]
pub struct MetricArgs {
    #[arg(value_enum, value_name = "NAME")]
    pub metric: Metric,

    #[arg(long)]
    pub owner: String,

    #[arg(long)]
    pub repo: String,

    /// Time bucket: day, week, month or year (or D/W/M/Y). Unrecognized
    /// values fall back to week.
    #[arg(long, value_name = "G")]
    pub granularity: Option<String>,

    /// Restrict `contributions` to the user with this login.
    #[arg(long, value_name = "LOGIN", conflicts_with = "user_id")]
    pub user: Option<String>,

    /// Restrict `contributions` to this user id; non-positive means no filter.
    #[arg(long, value_name = "ID", allow_negative_numbers = true)]
    pub user_id: Option<i64>,
}

struct PendingWarning {
    code: &'static str,
    message: String,
    details: Value,
}

pub fn run(args: &MetricArgs, config: &RuntimeConfig) -> Result<()> {
    let command = format!("metric.{}", args.metric.name());
    let catalog = open_catalog(&command, config)?;
    let repo = resolve_repository(&catalog, &command, &args.owner, &args.repo)?;

    let mut warnings = Vec::new();
    let granularity = resolve_granularity(args, &mut warnings);
    let user = resolve_user_filter(&catalog, &command, args, &mut warnings)?;
    for warning in &warnings {
        warn!(code = warning.code, "{}", warning.message);
    }

    info!(metric = args.metric.name(), %repo, "running metric");
    let started = Instant::now();
    let table = execute_metric(&catalog, args.metric, repo, granularity, user).map_err(|error| {
        let (code, message) = failure_code(&error);
        QueryEnvelope::error(command.as_str(), code, message)
            .with_meta("repository_id", json!(repo))
            .with_error_details(json!({ "cause": describe(error) }))
            .into_failure()
    })?;
    let duration_ms = started.elapsed().as_millis() as u64;
    info!(
        metric = args.metric.name(),
        row_count = table.len(),
        duration_ms,
        "metric finished"
    );

    let mut envelope = QueryEnvelope::ok(command.as_str(), table.to_json())
        .with_meta("repository_id", json!(repo))
        .with_meta("row_count", json!(table.len()))
        .with_meta("duration_ms", json!(duration_ms));
    if args.metric.is_bucketed() {
        envelope = envelope.with_meta("granularity", json!(granularity.keyword()));
    }
    if args.metric.accepts_user_filter() {
        envelope = envelope.with_meta("user_id", json!(user));
    }
    for warning in warnings {
        envelope = envelope
            .with_warning(warning.code, warning.message)
            .with_warning_details(warning.details);
    }
    print_envelope(&envelope)
}

/// Runs one catalog operation. Non-bucketed metrics ignore `granularity`
/// and only `contributions` reads `user`.
pub fn execute_metric<S: DataStore>(
    catalog: &GhData<S>,
    metric: Metric,
    repo: RepositoryId,
    granularity: Granularity,
    user: Option<UserId>,
) -> crate::Result<ResultTable> {
    let bucket = granularity.keyword();
    match metric {
        Metric::Stargazers => catalog.stargazers_grouped(repo, bucket),
        Metric::Commits => catalog.commits_grouped(repo, bucket),
        Metric::Forks => catalog.forks_grouped(repo, bucket),
        Metric::Issues => catalog.issues_grouped(repo, bucket),
        Metric::Pulls => catalog.pulls_grouped(repo, bucket),
        Metric::IssuesWithClose => catalog.issues_with_close(repo),
        Metric::IssueActivity => catalog.issue_activity(repo),
        Metric::Contributors => catalog.contributors(repo),
        Metric::Contributions => catalog.contributions(repo, user),
        Metric::CommitterLocations => catalog.committer_locations(repo),
        Metric::IssueResponseTime => catalog.issue_response_time(repo),
        Metric::AverageIssueResponseTime => catalog.average_issue_response_time(repo),
        Metric::PullAcceptanceRate => catalog.pull_acceptance_rate(repo),
        Metric::RelativeActivityPm => catalog.relative_activity_pm(repo),
        Metric::RelativeActivityNonpm => catalog.relative_activity_nonpm(repo),
        Metric::RelativeActivity => catalog.relative_activity(repo),
        Metric::LinkingWebsites => catalog.linking_websites(repo),
    }
}

fn resolve_granularity(args: &MetricArgs, warnings: &mut Vec<PendingWarning>) -> Granularity {
    let Some(raw) = args.granularity.as_deref() else {
        return Granularity::default();
    };

    if !args.metric.is_bucketed() {
        warnings.push(PendingWarning {
            code: "granularity_ignored",
            message: format!("{} is not bucketed by time", args.metric.name()),
            details: json!({ "requested": raw }),
        });
        return Granularity::default();
    }

    match Granularity::parse(raw) {
        Some(granularity) => granularity,
        None => {
            let applied = Granularity::normalize(raw);
            warnings.push(PendingWarning {
                code: "granularity_unrecognized",
                message: format!("unrecognized granularity `{raw}`; using {applied}"),
                details: json!({ "requested": raw, "applied": applied.keyword() }),
            });
            applied
        }
    }
}

fn resolve_user_filter<S: DataStore>(
    catalog: &GhData<S>,
    command: &str,
    args: &MetricArgs,
    warnings: &mut Vec<PendingWarning>,
) -> Result<Option<UserId>> {
    let login = args
        .user
        .as_deref()
        .map(str::trim)
        .filter(|login| !login.is_empty());
    if login.is_none() && args.user_id.is_none() {
        return Ok(None);
    }

    if !args.metric.accepts_user_filter() {
        warnings.push(PendingWarning {
            code: "user_filter_ignored",
            message: format!("{} does not take a user filter", args.metric.name()),
            details: json!({ "user": login, "user_id": args.user_id }),
        });
        return Ok(None);
    }

    if let Some(login) = login {
        let user = catalog
            .user_id(login)
            .map_err(|error| lookup_failure(command, error))?;
        if user.is_none() {
            warnings.push(PendingWarning {
                code: "user_not_found",
                message: format!("user {login} not found; running without a user filter"),
                details: json!({ "user": login }),
            });
        }
        return Ok(user);
    }

    let raw = args.user_id.unwrap_or_default();
    let user = UserId::new(raw);
    if user.is_none() {
        warnings.push(PendingWarning {
            code: "user_id_not_positive",
            message: format!("user id {raw} is not positive; running without a user filter"),
            details: json!({ "user_id": raw }),
        });
    }
    Ok(user)
}

fn failure_code(error: &GhDataError) -> (&'static str, &'static str) {
    match error {
        GhDataError::MissingApiKey => ("search_unconfigured", "web search is not configured"),
        GhDataError::Search(_) | GhDataError::SearchStatus { .. } | GhDataError::SearchFormat { .. } => {
            ("search_failed", "web search failed")
        }
        GhDataError::Store { .. } | GhDataError::UnboundParameter(_) => {
            ("metric_failed", "metric query failed")
        }
    }
}
