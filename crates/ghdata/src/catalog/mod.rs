//! Named metric queries over a GHTorrent-shaped database.
//!
//! Every operation issues exactly one statement against the [`DataStore`]
//! and returns the full result. Repository and user ids are always bound as
//! parameters.

mod activity;
mod contributors;
mod issues;
mod lookup;
mod pulls;
mod timeseries;
mod web;

pub use activity::Membership;

use std::time::Instant;

use tracing::debug;

use crate::error::Result;
use crate::models::{RepositoryId, ResultTable};
use crate::query::REPOID_PARAM;
use crate::search::WebSearch;
use crate::sqlite::{DataStore, SqlParam};

pub struct GhData<S> {
    store: S,
    search: Option<Box<dyn WebSearch>>,
}

impl<S: DataStore> GhData<S> {
    #[must_use]
    pub fn new(store: S) -> Self {
        Self {
            store,
            search: None,
        }
    }

    /// Enables [`GhData::linking_websites`].
    #[must_use]
    pub fn with_search(mut self, search: impl WebSearch + 'static) -> Self {
        self.search = Some(Box::new(search));
        self
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    fn fetch(
        &self,
        metric: &'static str,
        sql: &str,
        params: &[(&str, SqlParam<'_>)],
    ) -> Result<ResultTable> {
        let started = Instant::now();
        let table = self.store.execute(sql, params)?;
        debug!(
            metric,
            elapsed_ms = started.elapsed().as_millis() as u64,
            row_count = table.len(),
            "metric query finished"
        );
        Ok(table)
    }

    fn fetch_for_repo(
        &self,
        metric: &'static str,
        sql: &str,
        repo: RepositoryId,
    ) -> Result<ResultTable> {
        self.fetch(metric, sql, &[(REPOID_PARAM, repo.get().into())])
    }
}
