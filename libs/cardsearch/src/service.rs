//! Search service: runs [`CardSearch`] requests against a store.

use crate::catalog::{CatalogCache, SetCatalog};
use crate::db::CardStore;
use crate::error::Result;
use crate::search::{select_printing, CardSearch, PageLimits, SearchResult};
use std::sync::Arc;
use std::time::Instant;

/// Owns the store and the process-wide set catalog cache. Cheap to share
/// behind an `Arc`; holds no per-request state.
pub struct SearchService {
    store: Arc<dyn CardStore>,
    catalog: CatalogCache,
    limits: PageLimits,
}

impl SearchService {
    pub fn new(store: Arc<dyn CardStore>) -> Self {
        Self {
            store,
            catalog: CatalogCache::new(),
            limits: PageLimits::default(),
        }
    }

    pub fn with_page_limits(mut self, limits: PageLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Use an already loaded catalog instead of loading it from the store.
    pub fn with_catalog(mut self, catalog: SetCatalog) -> Self {
        self.catalog = CatalogCache::preloaded(catalog);
        self
    }

    pub fn store(&self) -> &dyn CardStore {
        self.store.as_ref()
    }

    pub fn page_limits(&self) -> &PageLimits {
        &self.limits
    }

    pub async fn catalog(&self) -> Result<Arc<SetCatalog>> {
        self.catalog.get_or_load(self.store.as_ref()).await
    }

    /// Compile and run a search in one card fetch. Parse and validation
    /// failures return before any cards are fetched; store failures are
    /// returned as they are.
    pub async fn execute(&self, search: CardSearch) -> Result<Vec<SearchResult>> {
        let started = Instant::now();
        let textual = search.is_textual();
        let catalog = self.catalog().await?;
        let compiled = search.compile(&catalog, &self.limits)?;

        let cards = self.store.fetch_cards(&compiled.query).await?;
        let results: Vec<SearchResult> = cards
            .into_iter()
            .map(|card| {
                let selected_printing =
                    select_printing(&card, compiled.preferred_set.as_deref(), &catalog).cloned();
                SearchResult {
                    card,
                    selected_printing,
                }
            })
            .collect();

        tracing::info!(
            textual,
            results = results.len(),
            preferred_set = compiled.preferred_set.as_deref().unwrap_or(""),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Search executed"
        );
        Ok(results)
    }
}
