use thiserror::Error;

pub type Result<T> = std::result::Result<T, GhDataError>;

#[derive(Debug, Error)]
pub enum GhDataError {
    #[error("failed to {operation}")]
    Store {
        operation: &'static str,
        #[source]
        source: rusqlite::Error,
    },

    #[error("query parameter `:{0}` is referenced by the statement but was not bound")]
    UnboundParameter(String),

    #[error("web search request failed")]
    Search(#[from] reqwest::Error),

    #[error("web search returned HTTP {status}")]
    SearchStatus { status: u16 },

    #[error("malformed web search line {line_number}: `{line}`")]
    SearchFormat { line_number: usize, line: String },

    #[error("no web search API key configured; pass --publicwww-key or set GHDATA_PUBLICWWW_KEY")]
    MissingApiKey,
}

impl GhDataError {
    pub(crate) fn store(operation: &'static str) -> impl FnOnce(rusqlite::Error) -> Self {
        move |source| Self::Store { operation, source }
    }
}
