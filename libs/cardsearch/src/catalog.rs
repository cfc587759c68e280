//! Set catalog and its populate-once cache.

use crate::db::CardStore;
use crate::error::{Error, Result};
use crate::models::SetInfo;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Every known set, looked up by code (case-insensitively) or by name.
#[derive(Debug, Clone, Default)]
pub struct SetCatalog {
    sets: Vec<SetInfo>,
    by_code: HashMap<String, usize>,
}

impl SetCatalog {
    pub fn new(sets: Vec<SetInfo>) -> Self {
        let by_code = sets
            .iter()
            .enumerate()
            .map(|(i, set)| (set.code.to_lowercase(), i))
            .collect();
        Self { sets, by_code }
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SetInfo> {
        self.sets.iter()
    }

    pub fn get(&self, code: &str) -> Option<&SetInfo> {
        self.by_code
            .get(&code.to_lowercase())
            .map(|&i| &self.sets[i])
    }

    /// Resolve user input to a set: exact code, then exact name, then a
    /// unique partial name. Among several partial matches a single non-promo
    /// set wins.
    pub fn resolve(&self, value: &str) -> Result<&SetInfo> {
        let needle = value.trim().to_lowercase();
        if let Some(set) = self.get(&needle) {
            return Ok(set);
        }

        if let Some(set) = self.sets.iter().find(|s| s.name.to_lowercase() == needle) {
            return Ok(set);
        }

        let partial: Vec<&SetInfo> = self
            .sets
            .iter()
            .filter(|s| s.name.to_lowercase().contains(&needle))
            .collect();
        match partial.as_slice() {
            [] => Err(Error::Validation(format!("Unknown set \"{}\"", value))),
            [only] => Ok(*only),
            many => {
                let mut non_promo = many.iter().copied().filter(|s| !s.is_promo());
                match (non_promo.next(), non_promo.next()) {
                    (Some(set), None) => Ok(set),
                    _ => Err(Error::Validation(format!(
                        "Multiple sets match \"{}\"",
                        value
                    ))),
                }
            }
        }
    }
}

/// Process-wide set catalog, loaded from the store on first use and never
/// invalidated.
#[derive(Debug, Default)]
pub struct CatalogCache {
    cell: OnceCell<Arc<SetCatalog>>,
}

impl CatalogCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// A cache that is already populated.
    pub fn preloaded(catalog: SetCatalog) -> Self {
        Self {
            cell: OnceCell::new_with(Some(Arc::new(catalog))),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.initialized()
    }

    /// Concurrent first callers wait on a single load; a failed load leaves
    /// the cache empty so the next call retries.
    pub async fn get_or_load(&self, store: &dyn CardStore) -> Result<Arc<SetCatalog>> {
        self.cell
            .get_or_try_init(|| async {
                let sets = store.load_sets().await?;
                tracing::debug!(sets = sets.len(), "Loaded set catalog");
                Ok::<_, Error>(Arc::new(SetCatalog::new(sets)))
            })
            .await
            .cloned()
    }
}
