//! Card search core for the Sylvan card library.
//!
//! Builds searches over a trading-card catalogue either from typed
//! parameters or from a textual query language, and runs them against a
//! [`CardStore`](db::CardStore).
//!
//! # Architecture Overview
//!
//! ```text
//! Query string ──► Lexer ──► Parser ──┐
//!                                     ├──► Parameter tree ──► FilterExpr ──► CardStore
//! Typed parameters ───────────────────┘         │                               │
//!                                            describe()              MemoryCardStore / SQL
//! ```
//!
//! ```no_run
//! use std::sync::Arc;
//! use sylvan_cardsearch::{CardSearch, MemoryCardStore, SearchService};
//!
//! # async fn run() -> sylvan_cardsearch::Result<()> {
//! let service = SearchService::new(Arc::new(MemoryCardStore::default()));
//! let results = CardSearch::from_query("power>=3 -c:r sort:-mv")
//!     .execute(&service)
//!     .await?;
//! for result in results {
//!     println!("{}", result.card.name);
//! }
//! # Ok(())
//! # }
//! ```

#![allow(
    clippy::large_enum_variant, // Parameter variants differ in size
)]

pub mod catalog;
pub mod db;
pub mod error;
pub mod fields;
pub mod filter;
pub mod models;
pub mod parameters;
pub mod parser;
pub mod search;
pub mod service;
pub mod sort;

pub use catalog::{CatalogCache, SetCatalog};
pub use db::{CardQuery, CardStore, MemoryCardStore, PgCardStore};
pub use error::{Error, ParseError, Result};
pub use filter::FilterExpr;
pub use parameters::{BoolOp, BooleanParameter, Parameter, TextMode};
pub use parser::{parse_query, ParsedQuery};
pub use search::{CardSearch, CompiledSearch, PageLimits, SearchResult};
pub use service::SearchService;
pub use sort::{SortDirection, SortKey, SortSpec};
