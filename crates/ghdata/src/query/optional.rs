use std::collections::BTreeSet;
use std::sync::OnceLock;

use regex::Regex;

use super::{REPOID_PARAM, USERID_PARAM};

pub const FRAGMENT_OPEN: &str = "[[";
pub const FRAGMENT_CLOSE: &str = "]]";

/// Final SQL text plus the names of the parameters it must be bound with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedQuery {
    pub sql: String,
    pub params: BTreeSet<&'static str>,
}

impl ComposedQuery {
    #[must_use]
    pub fn requires(&self, param: &str) -> bool {
        self.params.contains(param)
    }
}

/// Resolve every `[[ ... ]]` fragment of `template`.
///
/// With a user filter the delimiters are dropped and the enclosed predicate
/// stays; without one the whole fragment disappears. Text outside fragments
/// is never touched, so both variants select the same columns.
#[must_use]
pub fn compose_optional_clauses(template: &str, user_filter_requested: bool) -> ComposedQuery {
    let replacement = if user_filter_requested { "$body" } else { "" };
    let sql = fragment_regex()
        .replace_all(template, replacement)
        .into_owned();

    ComposedQuery {
        sql,
        params: required_params(user_filter_requested),
    }
}

fn fragment_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"(?s)\[\[(?P<body>.+?)\]\]").expect("optional fragment regex should compile")
    })
}

/// One activity category of the contributions time series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContributionSource {
    pub alias: &'static str,
    pub column: &'static str,
    pub timestamp: &'static str,
    /// `FROM ... WHERE ...` restricted to `:repoid`.
    pub source: &'static str,
    /// Compared against `:userid` when filtering by contributor.
    pub user_column: &'static str,
}

/// The first entry anchors the series: every other category is joined onto
/// its dates.
pub const CONTRIBUTION_SOURCES: [ContributionSource; 6] = [
    ContributionSource {
        alias: "coms",
        column: "commits",
        timestamp: "commits.created_at",
        source: "FROM commits INNER JOIN project_commits ON project_commits.commit_id = commits.id \
                 WHERE project_commits.project_id = :repoid",
        user_column: "commits.author_id",
    },
    ContributionSource {
        alias: "pulls",
        column: "pull_requests",
        timestamp: "pull_request_history.created_at",
        source: "FROM pull_request_history JOIN pull_requests ON pull_requests.id = pull_request_history.pull_request_id \
                 WHERE pull_requests.base_repo_id = :repoid AND pull_request_history.action = 'merged'",
        user_column: "pull_request_history.actor_id",
    },
    ContributionSource {
        alias: "iss",
        column: "issues",
        timestamp: "issues.created_at",
        source: "FROM issues WHERE issues.repo_id = :repoid",
        user_column: "issues.reporter_id",
    },
    ContributionSource {
        alias: "comcoms",
        column: "commit_comments",
        timestamp: "commit_comments.created_at",
        source: "FROM commit_comments JOIN project_commits ON project_commits.commit_id = commit_comments.commit_id \
                 WHERE project_commits.project_id = :repoid",
        user_column: "commit_comments.user_id",
    },
    ContributionSource {
        alias: "pullscoms",
        column: "pull_request_comments",
        timestamp: "pull_request_comments.created_at",
        source: "FROM pull_request_comments JOIN pull_requests ON pull_request_comments.pull_request_id = pull_requests.id \
                 WHERE pull_requests.base_repo_id = :repoid",
        user_column: "pull_request_comments.user_id",
    },
    ContributionSource {
        alias: "isscoms",
        column: "issue_comments",
        timestamp: "issue_comments.created_at",
        source: "FROM issue_comments JOIN issues ON issue_comments.issue_id = issues.id \
                 WHERE issues.repo_id = :repoid",
        user_column: "issue_comments.user_id",
    },
];

/// How the per-source user predicate is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UserPredicate {
    /// Wrapped in `[[ ... ]]` for [`compose_optional_clauses`].
    Fragment,
    Included,
    Omitted,
}

impl ContributionSource {
    fn daily_counts(&self, predicate: UserPredicate) -> String {
        let filter = format!(" AND {} = :{USERID_PARAM}", self.user_column);
        let filter = match predicate {
            UserPredicate::Fragment => format!("{FRAGMENT_OPEN}{filter}{FRAGMENT_CLOSE}"),
            UserPredicate::Included => filter,
            UserPredicate::Omitted => String::new(),
        };
        format!(
            "(SELECT DATE({ts}) AS day, COUNT(*) AS events {source}{filter} GROUP BY DATE({ts})) AS {alias}",
            ts = self.timestamp,
            source = self.source,
            alias = self.alias,
        )
    }
}

fn render_contributions(predicate: UserPredicate) -> String {
    let [anchor, rest @ ..] = &CONTRIBUTION_SOURCES;

    let mut columns = vec![format!("{}.day AS \"date\"", anchor.alias)];
    columns.extend(
        CONTRIBUTION_SOURCES
            .iter()
            .map(|source| format!("{}.events AS \"{}\"", source.alias, source.column)),
    );

    let mut sql = format!(
        "SELECT {}\nFROM {}\n",
        columns.join(",\n       "),
        anchor.daily_counts(predicate)
    );
    for source in rest {
        sql.push_str(&format!(
            "LEFT JOIN {} ON {}.day = {}.day\n",
            source.daily_counts(predicate),
            source.alias,
            anchor.alias
        ));
    }
    sql.push_str(&format!("ORDER BY {}.day", anchor.alias));
    sql
}

/// Daily contribution counts per category, with one `[[ ... ]]` user
/// predicate per category.
#[must_use]
pub fn contributions_template() -> String {
    render_contributions(UserPredicate::Fragment)
}

/// Both contributions variants rendered straight from
/// [`CONTRIBUTION_SOURCES`]; equal to composing [`contributions_template`].
#[must_use]
pub fn contributions_query(user_filter_requested: bool) -> ComposedQuery {
    let predicate = if user_filter_requested {
        UserPredicate::Included
    } else {
        UserPredicate::Omitted
    };
    ComposedQuery {
        sql: render_contributions(predicate),
        params: required_params(user_filter_requested),
    }
}

fn required_params(user_filter_requested: bool) -> BTreeSet<&'static str> {
    let mut params = BTreeSet::from([REPOID_PARAM]);
    if user_filter_requested {
        params.insert(USERID_PARAM);
    }
    params
}
