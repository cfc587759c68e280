#![allow(dead_code)]

pub mod fixtures;

use std::sync::Arc;
use sylvan_cardsearch::models::CardRecord;
use sylvan_cardsearch::{CardSearch, MemoryCardStore, Parameter, SearchResult, SearchService};

pub use fixtures::*;

pub fn service(cards: Vec<CardRecord>) -> SearchService {
    SearchService::new(Arc::new(MemoryCardStore::new(cards, sets())))
}

pub fn names(results: &[SearchResult]) -> Vec<String> {
    results.iter().map(|r| r.card.name.clone()).collect()
}

/// Run a textual query and return the result names in order.
pub async fn query_names(service: &SearchService, query: &str) -> Vec<String> {
    let results = CardSearch::from_query(query)
        .execute(service)
        .await
        .unwrap_or_else(|e| panic!("query {query:?} failed: {e}"));
    names(&results)
}

/// Run a structured search over the given parameters.
pub async fn structured_names(service: &SearchService, params: Vec<Parameter>) -> Vec<String> {
    let mut search = CardSearch::new();
    for param in params {
        search.add_parameter(param).expect("structured parameter");
    }
    let results = search.execute(service).await.expect("structured search");
    names(&results)
}
