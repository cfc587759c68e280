//! Persistence boundary.
//!
//! A [`CardStore`] executes a compiled [`CardQuery`] in one pass and loads
//! the set catalog. [`MemoryCardStore`] evaluates queries in process;
//! [`PgCardStore`] renders them to SQL.

mod colour_flags;
pub mod memory;
pub mod postgres;
pub mod query_builder;

pub use colour_flags::{colours_from_flags, flags_from_colours};
pub use memory::MemoryCardStore;
pub use postgres::PgCardStore;

use crate::error::Result;
use crate::filter::FilterExpr;
use crate::models::{CardRecord, SetInfo};
use crate::sort::SortSpec;
use async_trait::async_trait;

/// A fully compiled search, ready for a store.
#[derive(Debug, Clone, PartialEq)]
pub struct CardQuery {
    pub filter: FilterExpr,
    /// Multi-key ordering, already ending in the name tiebreak.
    pub order: Vec<SortSpec>,
    pub limit: Option<u32>,
    pub offset: u32,
}

impl CardQuery {
    pub fn new(filter: FilterExpr, order: Vec<SortSpec>) -> Self {
        Self {
            filter,
            order,
            limit: None,
            offset: 0,
        }
    }
}

#[async_trait]
pub trait CardStore: Send + Sync {
    /// Matching cards with all of their printings, filtered and ordered by
    /// the query, after `offset` and up to `limit`.
    async fn fetch_cards(&self, query: &CardQuery) -> Result<Vec<CardRecord>>;

    async fn load_sets(&self) -> Result<Vec<SetInfo>>;
}
