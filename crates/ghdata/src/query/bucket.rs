use crate::models::Granularity;

/// Count rows of `table` whose `filter_column` equals `:repoid`, one row per
/// time bucket of `created_at`.
///
/// Columns are `(date, count)`; `date` is the earliest calendar day seen in
/// the bucket. `table` and `filter_column` are written into the SQL verbatim
/// and must be trusted identifiers.
#[must_use]
pub fn count_by_bucket_query(
    table: &'static str,
    filter_column: &'static str,
    granularity: Granularity,
) -> String {
    let bucket = granularity.keyword();
    format!(
        "SELECT MIN(DATE(created_at)) AS \"date\", COUNT(*) AS \"count\"\n\
         FROM {table}\n\
         WHERE {filter_column} = :repoid\n\
         GROUP BY {bucket}(created_at)\n\
         ORDER BY \"date\""
    )
}

/// [`count_by_bucket_query`] for a granularity that has not been parsed yet.
#[must_use]
pub fn count_by_bucket_query_raw(
    table: &'static str,
    filter_column: &'static str,
    granularity: &str,
) -> String {
    count_by_bucket_query(table, filter_column, Granularity::normalize(granularity))
}

/// Pull requests merged into `:repoid` per bucket, with the number of review
/// comments those pull requests received.
#[must_use]
pub fn merged_pulls_by_bucket_query(granularity: Granularity) -> String {
    let bucket = granularity.keyword();
    format!(
        "SELECT MIN(DATE(pull_request_history.created_at)) AS \"date\",\n\
         COUNT(DISTINCT pull_requests.id) AS \"pull_requests\",\n\
         SUM((SELECT COUNT(*) FROM pull_request_comments\n\
         WHERE pull_request_comments.pull_request_id = pull_request_history.pull_request_id)) AS \"comments\"\n\
         FROM pull_request_history\n\
         INNER JOIN pull_requests ON pull_request_history.pull_request_id = pull_requests.id\n\
         WHERE pull_requests.base_repo_id = :repoid\n\
         AND pull_request_history.action = 'merged'\n\
         GROUP BY {bucket}(pull_request_history.created_at)\n\
         ORDER BY \"date\""
    )
}
