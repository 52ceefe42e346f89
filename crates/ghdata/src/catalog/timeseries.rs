use super::GhData;
use crate::error::Result;
use crate::models::{Granularity, RepositoryId, ResultTable};
use crate::query::count_by_bucket_query;
use crate::sqlite::DataStore;

/// Single-table series: table, column holding the project id.
const STARGAZERS: (&str, &str) = ("watchers", "repo_id");
const COMMITS: (&str, &str) = ("commits", "project_id");
const FORKS: (&str, &str) = ("projects", "forked_from");
const ISSUES: (&str, &str) = ("issues", "repo_id");

impl<S: DataStore> GhData<S> {
    /// New watchers per week, as `(date, count)`.
    pub fn stargazers(&self, repo: RepositoryId) -> Result<ResultTable> {
        self.stargazers_grouped(repo, Granularity::Week.keyword())
    }

    /// Like [`GhData::stargazers`] with a caller-chosen bucket; unrecognized
    /// granularities mean weeks.
    pub fn stargazers_grouped(&self, repo: RepositoryId, granularity: &str) -> Result<ResultTable> {
        self.count_series("stargazers", STARGAZERS, repo, granularity)
    }

    pub fn commits(&self, repo: RepositoryId) -> Result<ResultTable> {
        self.commits_grouped(repo, Granularity::Week.keyword())
    }

    pub fn commits_grouped(&self, repo: RepositoryId, granularity: &str) -> Result<ResultTable> {
        self.count_series("commits", COMMITS, repo, granularity)
    }

    /// Forks created per week.
    pub fn forks(&self, repo: RepositoryId) -> Result<ResultTable> {
        self.forks_grouped(repo, Granularity::Week.keyword())
    }

    pub fn forks_grouped(&self, repo: RepositoryId, granularity: &str) -> Result<ResultTable> {
        self.count_series("forks", FORKS, repo, granularity)
    }

    pub fn issues(&self, repo: RepositoryId) -> Result<ResultTable> {
        self.issues_grouped(repo, Granularity::Week.keyword())
    }

    pub fn issues_grouped(&self, repo: RepositoryId, granularity: &str) -> Result<ResultTable> {
        self.count_series("issues", ISSUES, repo, granularity)
    }

    fn count_series(
        &self,
        metric: &'static str,
        (table, filter_column): (&'static str, &'static str),
        repo: RepositoryId,
        granularity: &str,
    ) -> Result<ResultTable> {
        let sql = count_by_bucket_query(table, filter_column, Granularity::normalize(granularity));
        self.fetch_for_repo(metric, &sql, repo)
    }
}
