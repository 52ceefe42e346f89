use super::GhData;
use crate::error::Result;
use crate::models::{RepositoryId, ResultTable};
use crate::sqlite::DataStore;

/// Which side of the project-member line an activity count covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Membership {
    Members,
    NonMembers,
}

impl Membership {
    const fn predicate(self) -> &'static str {
        match self {
            Self::Members => "IN",
            Self::NonMembers => "NOT IN",
        }
    }
}

/// One row of per-kind contribution counts for the chosen side, plus `total`.
///
/// Pull requests count `opened` events; actors with no recorded identity
/// are on neither side.
#[must_use]
pub fn member_activity_query(membership: Membership) -> String {
    let side = membership.predicate();
    format!(
        r#"
SELECT activity.*,
       activity.commits + activity.issues + activity.issue_comments
         + activity.commit_comments + activity.pull_requests
         + activity.pull_request_comments AS "total"
FROM (
    SELECT
        (SELECT COUNT(*) FROM commits
         JOIN project_commits ON project_commits.commit_id = commits.id
         WHERE project_commits.project_id = :repoid
           AND commits.author_id {side} (SELECT user_id FROM project_members WHERE repo_id = :repoid)
        ) AS "commits",
        (SELECT COUNT(*) FROM issues
         WHERE issues.repo_id = :repoid
           AND issues.reporter_id {side} (SELECT user_id FROM project_members WHERE repo_id = :repoid)
        ) AS "issues",
        (SELECT COUNT(*) FROM issue_comments
         JOIN issues ON issues.id = issue_comments.issue_id
         WHERE issues.repo_id = :repoid
           AND issue_comments.user_id {side} (SELECT user_id FROM project_members WHERE repo_id = :repoid)
        ) AS "issue_comments",
        (SELECT COUNT(*) FROM commit_comments
         JOIN project_commits ON project_commits.commit_id = commit_comments.commit_id
         WHERE project_commits.project_id = :repoid
           AND commit_comments.user_id {side} (SELECT user_id FROM project_members WHERE repo_id = :repoid)
        ) AS "commit_comments",
        (SELECT COUNT(*) FROM pull_request_history
         JOIN pull_requests ON pull_requests.id = pull_request_history.pull_request_id
         WHERE pull_requests.base_repo_id = :repoid
           AND pull_request_history.action = 'opened'
           AND pull_request_history.actor_id {side} (SELECT user_id FROM project_members WHERE repo_id = :repoid)
        ) AS "pull_requests",
        (SELECT COUNT(*) FROM pull_request_comments
         JOIN pull_requests ON pull_requests.id = pull_request_comments.pull_request_id
         WHERE pull_requests.base_repo_id = :repoid
           AND pull_request_comments.user_id {side} (SELECT user_id FROM project_members WHERE repo_id = :repoid)
        ) AS "pull_request_comments"
) AS activity
"#
    )
}

/// Member versus outside totals and their ratio.
///
/// `ratio` is whatever the store yields for `pm / nonpm`; SQLite yields
/// `NULL` when there are no outside contributions.
#[must_use]
pub fn relative_activity_query() -> String {
    format!(
        r#"
SELECT pm.total AS "pm_contributions",
       nonpm.total AS "nonpm_contributions",
       CAST(pm.total AS REAL) / nonpm.total AS "ratio"
FROM ({}) AS pm,
     ({}) AS nonpm
"#,
        member_activity_query(Membership::Members),
        member_activity_query(Membership::NonMembers)
    )
}

impl<S: DataStore> GhData<S> {
    /// Contribution counts by project members.
    pub fn relative_activity_pm(&self, repo: RepositoryId) -> Result<ResultTable> {
        let sql = member_activity_query(Membership::Members);
        self.fetch_for_repo("relative_activity_pm", &sql, repo)
    }

    /// Contribution counts by everyone else.
    pub fn relative_activity_nonpm(&self, repo: RepositoryId) -> Result<ResultTable> {
        let sql = member_activity_query(Membership::NonMembers);
        self.fetch_for_repo("relative_activity_nonpm", &sql, repo)
    }

    /// `(pm_contributions, nonpm_contributions, ratio)` in a single row.
    pub fn relative_activity(&self, repo: RepositoryId) -> Result<ResultTable> {
        self.fetch_for_repo("relative_activity", &relative_activity_query(), repo)
    }
}
