use super::GhData;
use crate::error::Result;
use crate::models::{RepositoryId, ResultTable, UserId};
use crate::query::{REPOID_PARAM, USERID_PARAM, contributions_query};
use crate::sqlite::{DataStore, SqlParam};

const CONTRIBUTORS_SQL: &str = r#"
SELECT * FROM (
    SELECT users.id        AS "user_id",
           users.login     AS "login",
           com.count       AS "commits",
           pulls.count     AS "pull_requests",
           iss.count       AS "issues",
           comcoms.count   AS "commit_comments",
           pullscoms.count AS "pull_request_comments",
           isscoms.count   AS "issue_comments",
           COALESCE(com.count, 0) + COALESCE(pulls.count, 0) + COALESCE(iss.count, 0)
             + COALESCE(comcoms.count, 0) + COALESCE(pullscoms.count, 0)
             + COALESCE(isscoms.count, 0) AS "total"
    FROM users

    LEFT JOIN (SELECT commits.committer_id AS id, COUNT(*) AS count
               FROM commits
               INNER JOIN project_commits ON project_commits.commit_id = commits.id
               WHERE project_commits.project_id = :repoid
               GROUP BY commits.committer_id) AS com
           ON com.id = users.id

    LEFT JOIN (SELECT pull_request_history.actor_id AS id, COUNT(*) AS count
               FROM pull_request_history
               JOIN pull_requests ON pull_requests.id = pull_request_history.pull_request_id
               WHERE pull_requests.base_repo_id = :repoid
                 AND pull_request_history.action = 'merged'
               GROUP BY pull_request_history.actor_id) AS pulls
           ON pulls.id = users.id

    LEFT JOIN (SELECT issues.reporter_id AS id, COUNT(*) AS count
               FROM issues
               WHERE issues.repo_id = :repoid
               GROUP BY issues.reporter_id) AS iss
           ON iss.id = users.id

    LEFT JOIN (SELECT commit_comments.user_id AS id, COUNT(*) AS count
               FROM commit_comments
               JOIN project_commits ON project_commits.commit_id = commit_comments.commit_id
               WHERE project_commits.project_id = :repoid
               GROUP BY commit_comments.user_id) AS comcoms
           ON comcoms.id = users.id

    LEFT JOIN (SELECT pull_request_comments.user_id AS id, COUNT(*) AS count
               FROM pull_request_comments
               JOIN pull_requests ON pull_request_comments.pull_request_id = pull_requests.id
               WHERE pull_requests.base_repo_id = :repoid
               GROUP BY pull_request_comments.user_id) AS pullscoms
           ON pullscoms.id = users.id

    LEFT JOIN (SELECT issue_comments.user_id AS id, COUNT(*) AS count
               FROM issue_comments
               JOIN issues ON issue_comments.issue_id = issues.id
               WHERE issues.repo_id = :repoid
               GROUP BY issue_comments.user_id) AS isscoms
           ON isscoms.id = users.id
) AS user_activity
WHERE "total" > 0
ORDER BY "total" DESC, "user_id"
"#;

const COMMITTER_LOCATIONS_SQL: &str = r#"
SELECT users.login AS "login",
       users.location AS "location",
       COUNT(*) AS "commits"
FROM commits
JOIN project_commits ON project_commits.commit_id = commits.id
JOIN users ON users.id = commits.author_id
WHERE project_commits.project_id = :repoid
GROUP BY users.id
ORDER BY "commits" DESC, "login"
"#;

impl<S: DataStore> GhData<S> {
    /// Everyone with at least one contribution, with per-kind counts (`NULL`
    /// for kinds they never did) and a `total`, busiest first.
    pub fn contributors(&self, repo: RepositoryId) -> Result<ResultTable> {
        self.fetch_for_repo("contributors", CONTRIBUTORS_SQL, repo)
    }

    /// Daily contributions per kind, optionally restricted to one user.
    ///
    /// Dates come from the commit series; other kinds are joined onto those
    /// dates and are `NULL` where nothing happened.
    pub fn contributions(&self, repo: RepositoryId, user: Option<UserId>) -> Result<ResultTable> {
        let query = contributions_query(user.is_some());
        let params = query
            .params
            .iter()
            .filter_map(|name| match *name {
                REPOID_PARAM => Some((REPOID_PARAM, SqlParam::from(repo.get()))),
                USERID_PARAM => user.map(|user| (USERID_PARAM, SqlParam::from(user.get()))),
                _ => None,
            })
            .collect::<Vec<_>>();
        self.fetch("contributions", &query.sql, &params)
    }

    /// Commit authors with their profile location, as `(login, location, commits)`.
    pub fn committer_locations(&self, repo: RepositoryId) -> Result<ResultTable> {
        self.fetch_for_repo("committer_locations", COMMITTER_LOCATIONS_SQL, repo)
    }
}
