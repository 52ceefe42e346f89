use super::GhData;
use crate::error::Result;
use crate::models::{RepositoryId, ResultTable};
use crate::sqlite::DataStore;

const ISSUES_WITH_CLOSE_SQL: &str = r#"
SELECT issues.id AS "id",
       DATE(issues.created_at) AS "date",
       MAX(DATE(issue_events.created_at)) AS "closed"
FROM issues
LEFT JOIN issue_events
       ON issue_events.issue_id = issues.id
      AND issue_events.action = 'closed'
WHERE issues.repo_id = :repoid
GROUP BY issues.id
ORDER BY "date", issues.id
"#;

const ISSUE_ACTIVITY_SQL: &str = r#"
SELECT DATE(issue_events.created_at) AS "date",
       issue_events.action AS "action",
       COUNT(*) AS "count"
FROM issue_events
JOIN issues ON issues.id = issue_events.issue_id
WHERE issues.repo_id = :repoid
GROUP BY DATE(issue_events.created_at), issue_events.action
ORDER BY "date", "action"
"#;

// First comment on each issue written by a member of the issue's project.
// Issues nobody from the project answered are absent.
const ISSUE_RESPONSE_TIME_SQL: &str = r#"
SELECT issues.id AS "id",
       issues.created_at AS "created_at",
       MIN(issue_comments.created_at) AS "responded_at"
FROM issues
JOIN issue_comments ON issue_comments.issue_id = issues.id
JOIN project_members
  ON project_members.user_id = issue_comments.user_id
 AND project_members.repo_id = issues.repo_id
WHERE issues.repo_id = :repoid
GROUP BY issues.id
ORDER BY issues.created_at, issues.id
"#;

const AVERAGE_ISSUE_RESPONSE_TIME_SQL: &str = r#"
SELECT projects.name AS "repository",
       (
           SELECT AVG(julianday(first_response.responded_at) - julianday(first_response.created_at))
           FROM (
               SELECT issues.created_at AS created_at,
                      MIN(issue_comments.created_at) AS responded_at
               FROM issues
               JOIN issue_comments ON issue_comments.issue_id = issues.id
               JOIN project_members
                 ON project_members.user_id = issue_comments.user_id
                AND project_members.repo_id = issues.repo_id
               WHERE issues.repo_id = :repoid
               GROUP BY issues.id
           ) AS first_response
       ) AS "average_days"
FROM projects
WHERE projects.id = :repoid
"#;

impl<S: DataStore> GhData<S> {
    /// Every issue with its opening date and latest close date (`NULL` while
    /// open), as `(id, date, closed)`.
    pub fn issues_with_close(&self, repo: RepositoryId) -> Result<ResultTable> {
        self.fetch_for_repo("issues_with_close", ISSUES_WITH_CLOSE_SQL, repo)
    }

    /// Issue events per day and action, as `(date, action, count)`.
    pub fn issue_activity(&self, repo: RepositoryId) -> Result<ResultTable> {
        self.fetch_for_repo("issue_activity", ISSUE_ACTIVITY_SQL, repo)
    }

    /// `(id, created_at, responded_at)` for issues a project member answered.
    pub fn issue_response_time(&self, repo: RepositoryId) -> Result<ResultTable> {
        self.fetch_for_repo("issue_response_time", ISSUE_RESPONSE_TIME_SQL, repo)
    }

    /// One row `(repository, average_days)`; `average_days` is `NULL` when no
    /// issue got a member response.
    pub fn average_issue_response_time(&self, repo: RepositoryId) -> Result<ResultTable> {
        self.fetch_for_repo(
            "average_issue_response_time",
            AVERAGE_ISSUE_RESPONSE_TIME_SQL,
            repo,
        )
    }
}
