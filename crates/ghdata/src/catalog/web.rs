use tracing::{debug, info};

use super::GhData;
use crate::error::{GhDataError, Result};
use crate::models::{RepositoryId, ResultTable};
use crate::search::{encode_exact_phrase, parse_ranked_sites};
use crate::sqlite::DataStore;

impl<S: DataStore> GhData<S> {
    /// Websites whose source mentions the repository URL, as `(url, rank)`.
    ///
    /// An unknown repository id yields an empty table without contacting the
    /// search service.
    pub fn linking_websites(&self, repo: RepositoryId) -> Result<ResultTable> {
        let search = self.search.as_deref().ok_or(GhDataError::MissingApiKey)?;
        let Some(url) = self.repository_url(repo)? else {
            debug!(%repo, "no repository url; skipping website search");
            return Ok(ResultTable::new(["url", "rank"]));
        };

        let body = search.search(&encode_exact_phrase(&url))?;
        let table = parse_ranked_sites(&body)?;
        info!(%repo, sites = table.len(), "website search finished");
        Ok(table)
    }
}
