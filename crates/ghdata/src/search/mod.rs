use std::time::Duration;

use csv::{Position, ReaderBuilder, Trim};
use tracing::debug;

use crate::error::{GhDataError, Result};
use crate::models::{Cell, ResultTable};

pub const PUBLICWWW_BASE_URL: &str = "https://publicwww.com/websites";
pub const SEARCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Third-party full-text search over website sources.
pub trait WebSearch: Send + Sync {
    /// `encoded_query` is already URL-encoded. The response is a header-less
    /// `url;rank` table, one row per line.
    fn search(&self, encoded_query: &str) -> Result<String>;
}

/// Blocking client for the PublicWWW CSV export.
#[derive(Debug, Clone)]
pub struct PublicWwwClient {
    http: reqwest::blocking::Client,
    base_url: String,
    api_key: String,
}

impl PublicWwwClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_base_url(PUBLICWWW_BASE_URL, api_key)
    }

    pub fn with_base_url(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(SEARCH_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    #[must_use]
    pub fn request_url(&self, encoded_query: &str) -> String {
        format!(
            "{}/{encoded_query}/?export=csv&apikey={}",
            self.base_url,
            urlencoding::encode(&self.api_key)
        )
    }
}

impl WebSearch for PublicWwwClient {
    fn search(&self, encoded_query: &str) -> Result<String> {
        debug!(query = encoded_query, "requesting publicwww export");
        let response = self.http.get(self.request_url(encoded_query)).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(GhDataError::SearchStatus {
                status: status.as_u16(),
            });
        }
        Ok(response.text()?)
    }
}

/// Quoted, URL-encoded search phrase for pages mentioning `repository_url`.
#[must_use]
pub fn encode_exact_phrase(repository_url: &str) -> String {
    urlencoding::encode(&format!("\"{repository_url}\"")).into_owned()
}

/// Parse a `url;rank` export into a `(url, rank)` table. Fields may be
/// quoted. Blank lines are skipped; any other line that is not exactly a url
/// and an integer rank is an error.
pub fn parse_ranked_sites(body: &str) -> Result<ResultTable> {
    let mut reader = ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(body.as_bytes());

    let mut table = ResultTable::new(["url", "rank"]);
    for result in reader.records() {
        let record = result.map_err(|error| {
            let line_number = error.position().map_or(0, csv_line_number);
            malformed_line(body, line_number)
        })?;
        if record.iter().all(str::is_empty) {
            continue;
        }

        let line_number = record.position().map_or(0, csv_line_number);
        if record.len() != 2 {
            return Err(malformed_line(body, line_number));
        }
        let (url, rank): (String, i64) = record
            .deserialize(None)
            .map_err(|_| malformed_line(body, line_number))?;
        table.push_row(vec![Cell::Text(url), Cell::Integer(rank)]);
    }
    Ok(table)
}

fn csv_line_number(position: &Position) -> usize {
    usize::try_from(position.line()).unwrap_or(usize::MAX)
}

fn malformed_line(body: &str, line_number: usize) -> GhDataError {
    let line = line_number
        .checked_sub(1)
        .and_then(|index| body.lines().nth(index))
        .unwrap_or_default()
        .trim()
        .to_string();
    GhDataError::SearchFormat { line_number, line }
}
