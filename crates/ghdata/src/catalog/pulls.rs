use super::GhData;
use crate::error::Result;
use crate::models::{Granularity, RepositoryId, ResultTable};
use crate::query::merged_pulls_by_bucket_query;
use crate::sqlite::DataStore;

/// Merge rate on days where pull requests were both opened and merged.
/// Days present on only one side are dropped.
const PULL_ACCEPTANCE_RATE_SQL: &str = r#"
SELECT opened.day AS "date",
       CAST(accepted.num_approved AS REAL) / opened.num_open AS "rate"
FROM (
    SELECT DATE(pull_request_history.created_at) AS day,
           COUNT(DISTINCT pull_request_history.pull_request_id) AS num_approved
    FROM pull_request_history
    JOIN pull_requests ON pull_requests.id = pull_request_history.pull_request_id
    WHERE pull_request_history.action = 'merged'
      AND pull_requests.base_repo_id = :repoid
    GROUP BY DATE(pull_request_history.created_at)
) AS accepted
JOIN (
    SELECT DATE(pull_request_history.created_at) AS day,
           COUNT(DISTINCT pull_request_history.pull_request_id) AS num_open
    FROM pull_request_history
    JOIN pull_requests ON pull_requests.id = pull_request_history.pull_request_id
    WHERE pull_request_history.action = 'opened'
      AND pull_requests.base_repo_id = :repoid
    GROUP BY DATE(pull_request_history.created_at)
) AS opened ON opened.day = accepted.day
ORDER BY opened.day
"#;

impl<S: DataStore> GhData<S> {
    /// Merged pull requests per week and the review comments they received,
    /// as `(date, pull_requests, comments)`.
    pub fn pulls(&self, repo: RepositoryId) -> Result<ResultTable> {
        self.pulls_grouped(repo, Granularity::Week.keyword())
    }

    pub fn pulls_grouped(&self, repo: RepositoryId, granularity: &str) -> Result<ResultTable> {
        let sql = merged_pulls_by_bucket_query(Granularity::normalize(granularity));
        self.fetch_for_repo("pulls", &sql, repo)
    }

    /// `(date, rate)` with `rate = merged / opened`.
    pub fn pull_acceptance_rate(&self, repo: RepositoryId) -> Result<ResultTable> {
        self.fetch_for_repo("pull_acceptance_rate", PULL_ACCEPTANCE_RATE_SQL, repo)
    }
}
