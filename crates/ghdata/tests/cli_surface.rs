use std::path::Path;

use clap::Parser;
use ghdata::cli::app::{Cli, Command};
use ghdata::cli::commands::metric::Metric;

#[test]
fn parses_global_runtime_flags_for_repo_id() {
    let cli = Cli::parse_from([
        "ghdata",
        "--home-dir",
        "/home/tester",
        "--cwd",
        "/work/repo",
        "--database",
        "/data/msr14.sqlite",
        "repo-id",
        "--owner",
        "rails",
        "--repo",
        "rails",
    ]);

    assert_eq!(
        cli.runtime.home_dir.as_deref(),
        Some(Path::new("/home/tester"))
    );
    assert_eq!(cli.runtime.cwd.as_deref(), Some(Path::new("/work/repo")));
    assert_eq!(
        cli.runtime.database.as_deref(),
        Some(Path::new("/data/msr14.sqlite"))
    );

    match cli.command {
        Command::RepoId(args) => {
            assert_eq!(args.owner, "rails");
            assert_eq!(args.repo, "rails");
        }
        other => panic!("expected repo-id command, got {other:?}"),
    }
}

#[test]
fn global_flags_are_accepted_after_the_subcommand() {
    let cli = Cli::parse_from([
        "ghdata",
        "user-id",
        "--login",
        "dhh",
        "--publicwww-key",
        "k",
    ]);

    assert_eq!(cli.runtime.publicwww_key.as_deref(), Some("k"));
    match cli.command {
        Command::UserId(args) => assert_eq!(args.login, "dhh"),
        other => panic!("expected user-id command, got {other:?}"),
    }
}

#[test]
fn parses_metric_with_granularity_and_user_id() {
    let cli = Cli::parse_from([
        "ghdata",
        "metric",
        "contributions",
        "--owner",
        "rails",
        "--repo",
        "rails",
        "--granularity",
        "m",
        "--user-id",
        "-1",
    ]);

    match cli.command {
        Command::Metric(args) => {
            assert_eq!(args.metric, Metric::Contributions);
            assert_eq!(args.granularity.as_deref(), Some("m"));
            assert_eq!(args.user_id, Some(-1));
            assert!(args.user.is_none());
        }
        other => panic!("expected metric command, got {other:?}"),
    }
}

#[test]
fn metric_names_are_kebab_case() {
    let cli = Cli::parse_from([
        "ghdata",
        "metric",
        "average-issue-response-time",
        "--owner",
        "rails",
        "--repo",
        "rails",
    ]);

    match cli.command {
        Command::Metric(args) => assert_eq!(args.metric, Metric::AverageIssueResponseTime),
        other => panic!("expected metric command, got {other:?}"),
    }
}

#[test]
fn user_login_and_user_id_are_mutually_exclusive() {
    let error = Cli::try_parse_from([
        "ghdata",
        "metric",
        "contributions",
        "--owner",
        "rails",
        "--repo",
        "rails",
        "--user",
        "dhh",
        "--user-id",
        "2",
    ])
    .expect_err("conflicting user filters must be rejected");
    assert_eq!(error.kind(), clap::error::ErrorKind::ArgumentConflict);
}

#[test]
fn unknown_metric_is_rejected() {
    let error = Cli::try_parse_from([
        "ghdata", "metric", "downloads", "--owner", "rails", "--repo", "rails",
    ])
    .expect_err("unknown metric must be rejected");
    assert_eq!(error.kind(), clap::error::ErrorKind::InvalidValue);
}

#[test]
fn parses_schema_command() {
    let cli = Cli::parse_from(["ghdata", "schema"]);
    assert!(matches!(cli.command, Command::Schema));
}
