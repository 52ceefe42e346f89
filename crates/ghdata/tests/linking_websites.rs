mod common;

use std::sync::{Arc, Mutex};

use ghdata::error::{GhDataError, Result};
use ghdata::models::{Cell, RepositoryId};
use ghdata::search::WebSearch;

use common::{catalog, rails};

#[derive(Clone, Default)]
struct RecordingSearch {
    body: String,
    queries: Arc<Mutex<Vec<String>>>,
}

impl RecordingSearch {
    fn recorded(&self) -> Vec<String> {
        self.queries
            .lock()
            .expect("query log should not be poisoned")
            .clone()
    }

    fn answering(body: &str) -> Self {
        Self {
            body: body.to_string(),
            queries: Arc::default(),
        }
    }
}

impl WebSearch for RecordingSearch {
    fn search(&self, encoded_query: &str) -> Result<String> {
        self.queries
            .lock()
            .expect("query log should not be poisoned")
            .push(encoded_query.to_string());
        Ok(self.body.clone())
    }
}

struct FailingSearch;

impl WebSearch for FailingSearch {
    fn search(&self, _encoded_query: &str) -> Result<String> {
        Err(GhDataError::SearchStatus { status: 503 })
    }
}

#[test]
fn searches_for_the_quoted_repository_url() {
    let search = RecordingSearch::answering("rubyonrails.org;1200\nexample.com;98000\n");
    let catalog = catalog().with_search(search.clone());

    let table = catalog.linking_websites(rails()).expect("search should run");
    assert_eq!(table.columns(), ["url", "rank"]);
    assert_eq!(
        table.rows(),
        [
            vec![Cell::from("rubyonrails.org"), Cell::Integer(1200)],
            vec![Cell::from("example.com"), Cell::Integer(98000)],
        ]
    );
    assert_eq!(
        search.recorded(),
        vec!["%22github.com%2Frails%2Frails%22".to_string()]
    );
}

#[test]
fn quoted_export_fields_are_unquoted() {
    let catalog = catalog().with_search(RecordingSearch::answering("\"rubyonrails.org\";1200\n"));
    let table = catalog.linking_websites(rails()).expect("search should run");
    assert_eq!(
        table.rows(),
        [vec![Cell::from("rubyonrails.org"), Cell::Integer(1200)]]
    );
}

#[test]
fn catalog_with_search_can_move_across_threads() {
    let search = RecordingSearch::answering("rubyonrails.org;1200\n");
    let catalog = Mutex::new(catalog().with_search(search.clone()));

    let rows = std::thread::spawn(move || {
        let catalog = catalog.lock().expect("catalog lock should not be poisoned");
        catalog.linking_websites(rails()).expect("search should run").len()
    })
    .join()
    .expect("search thread should not panic");

    assert_eq!(rows, 1);
    assert_eq!(search.recorded().len(), 1);
}

#[test]
fn empty_search_body_is_an_empty_table() {
    let catalog = catalog().with_search(RecordingSearch::answering(""));
    let table = catalog.linking_websites(rails()).expect("search should run");
    assert!(table.is_empty());
    assert_eq!(table.columns(), ["url", "rank"]);
}

#[test]
fn unknown_repository_skips_the_search() {
    let search = RecordingSearch::answering("unused.com;1\n");
    let catalog = catalog().with_search(search.clone());
    let missing = RepositoryId::new(424_242).expect("positive id");

    let table = catalog.linking_websites(missing).expect("search should run");
    assert!(table.is_empty());
    assert!(search.recorded().is_empty());
}

#[test]
fn missing_search_client_is_reported() {
    let error = catalog()
        .linking_websites(rails())
        .expect_err("search without a client must fail");
    assert!(
        matches!(error, GhDataError::MissingApiKey),
        "unexpected error: {error}"
    );
}

#[test]
fn search_failures_and_malformed_bodies_propagate() {
    let error = catalog()
        .with_search(FailingSearch)
        .linking_websites(rails())
        .expect_err("failing search must fail");
    assert!(
        matches!(error, GhDataError::SearchStatus { status: 503 }),
        "unexpected error: {error}"
    );

    let error = catalog()
        .with_search(RecordingSearch::answering("no rank here\n"))
        .linking_websites(rails())
        .expect_err("malformed body must fail");
    assert!(
        matches!(error, GhDataError::SearchFormat { line_number: 1, .. }),
        "unexpected error: {error}"
    );
}
