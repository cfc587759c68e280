use crate::support::*;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use sylvan_cardsearch::models::{CardRecord, SetInfo};
use sylvan_cardsearch::{CardQuery, CardSearch, CardStore, Error, MemoryCardStore, SearchService};

/// Counts calls before handing them to an in-memory store.
#[derive(Default)]
struct CountingStore {
    inner: MemoryCardStore,
    fetches: AtomicUsize,
    set_loads: AtomicUsize,
}

#[async_trait]
impl CardStore for CountingStore {
    async fn fetch_cards(&self, query: &CardQuery) -> sylvan_cardsearch::Result<Vec<CardRecord>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.inner.fetch_cards(query).await
    }

    async fn load_sets(&self) -> sylvan_cardsearch::Result<Vec<SetInfo>> {
        self.set_loads.fetch_add(1, Ordering::SeqCst);
        self.inner.load_sets().await
    }
}

struct BrokenStore;

#[async_trait]
impl CardStore for BrokenStore {
    async fn fetch_cards(&self, _query: &CardQuery) -> sylvan_cardsearch::Result<Vec<CardRecord>> {
        Err(Error::Internal("connection reset".to_string()))
    }

    async fn load_sets(&self) -> sylvan_cardsearch::Result<Vec<SetInfo>> {
        Ok(sets())
    }
}

fn counting() -> Arc<CountingStore> {
    Arc::new(CountingStore {
        inner: MemoryCardStore::new(catalogue(), sets()),
        ..Default::default()
    })
}

#[tokio::test]
async fn test_catalog_loads_once() {
    let store = counting();
    let svc = SearchService::new(store.clone());
    for query in ["set:m10", "e:zendikar", "bolt"] {
        CardSearch::from_query(query).execute(&svc).await.unwrap();
    }
    assert_eq!(store.set_loads.load(Ordering::SeqCst), 1);
    assert_eq!(store.fetches.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_concurrent_searches_share_one_catalog_load() {
    let store = counting();
    let svc = Arc::new(SearchService::new(store.clone()));
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let svc = svc.clone();
            tokio::spawn(async move { CardSearch::from_query("set:lea").execute(&svc).await })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.await.unwrap().unwrap().len(), 3);
    }
    assert_eq!(store.set_loads.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_parse_errors_never_fetch_cards() {
    let store = counting();
    let svc = SearchService::new(store.clone());
    let err = CardSearch::from_query("power>=three")
        .execute(&svc)
        .await
        .expect_err("bad number");
    assert!(err.as_parse_error().is_some());
    assert_eq!(store.fetches.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_store_failures_pass_through() {
    let svc = SearchService::new(Arc::new(BrokenStore));
    let err = CardSearch::from_query("bolt")
        .execute(&svc)
        .await
        .expect_err("store failure");
    assert!(matches!(err, Error::Internal(_)));
}

#[tokio::test]
async fn test_preloaded_catalog_skips_the_store() {
    let store = counting();
    let svc = SearchService::new(store.clone())
        .with_catalog(sylvan_cardsearch::SetCatalog::new(sets()));
    CardSearch::from_query("set:m10").execute(&svc).await.unwrap();
    assert_eq!(store.set_loads.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_memory_store_dates_printings_from_catalog() {
    let mut bolt = CardBuilder::new(1, "Bolt")
        .printing("LEA", sylvan_cardsearch::models::Rarity::Common)
        .build();
    bolt.printings[0].release_date = None;
    let store = MemoryCardStore::new(vec![bolt], sets());
    assert_eq!(
        store.cards()[0].printings[0].release_date,
        chrono::NaiveDate::from_ymd_opt(1993, 8, 5)
    );

    let svc = SearchService::new(Arc::new(store));
    assert_eq!(query_names(&svc, "date<1994-01-01").await, vec!["Bolt"]);
}
