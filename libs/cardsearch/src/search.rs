//! Search orchestrator.
//!
//! A [`CardSearch`] is one request: either built from parameters
//! (structured mode) or from a query string (textual mode), never both.
//! Compiling it resolves set names, adds the default ordering and produces
//! a [`CardQuery`]. Executing it consumes the request.

use crate::catalog::SetCatalog;
use crate::db::CardQuery;
use crate::error::{Error, Result};
use crate::models::{CardRecord, PrintingRecord};
use crate::parameters::{BooleanParameter, Parameter};
use crate::parser::parse_query;
use crate::service::SearchService;
use crate::sort::{with_name_tiebreak, SortSpec};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq)]
enum Mode {
    #[default]
    Unset,
    Structured(BooleanParameter),
    Textual(String),
}

/// Page size bounds applied when a search asks for a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimits {
    pub default_page_size: u32,
    pub max_page_size: u32,
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            default_page_size: 25,
            max_page_size: 200,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CardSearch {
    mode: Mode,
    sort: Vec<SortSpec>,
    preferred_set: Option<String>,
    page: Option<u32>,
    page_size: Option<u32>,
}

/// A search after parameter building, ready for a store.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledSearch {
    pub root: BooleanParameter,
    pub query: CardQuery,
    /// Set code whose printing each result should show, if any.
    pub preferred_set: Option<String>,
}

/// One result row: the card and the printing chosen to represent it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    pub card: CardRecord,
    pub selected_printing: Option<PrintingRecord>,
}

impl CardSearch {
    pub fn new() -> Self {
        Self::default()
    }

    /// A textual search over `query`.
    pub fn from_query(query: impl Into<String>) -> Self {
        Self {
            mode: Mode::Textual(query.into()),
            ..Self::default()
        }
    }

    /// Append a parameter to the root AND (structured mode).
    pub fn add_parameter(&mut self, param: impl Into<Parameter>) -> Result<()> {
        match &mut self.mode {
            Mode::Textual(_) => Err(Error::Validation(
                "Can't add parameters to a search built from a query string".to_string(),
            )),
            Mode::Structured(root) => root.add_parameter(param),
            Mode::Unset => {
                let mut root = BooleanParameter::and();
                root.add_parameter(param)?;
                self.mode = Mode::Structured(root);
                Ok(())
            }
        }
    }

    /// Set the query string (textual mode). A later call replaces the query.
    pub fn set_query(&mut self, query: impl Into<String>) -> Result<()> {
        if matches!(self.mode, Mode::Structured(_)) {
            return Err(Error::Validation(
                "Can't set a query string on a search built from parameters".to_string(),
            ));
        }
        self.mode = Mode::Textual(query.into());
        Ok(())
    }

    /// Explicit sorts come before any sort terms in the query string.
    pub fn add_sort(&mut self, spec: SortSpec) {
        self.sort.push(spec);
    }

    pub fn with_sort(mut self, spec: SortSpec) -> Self {
        self.add_sort(spec);
        self
    }

    /// Bias the printing shown for each result towards a set. Never
    /// filters.
    pub fn with_preferred_set(mut self, set: impl Into<String>) -> Self {
        self.preferred_set = Some(set.into());
        self
    }

    /// Request one page (1-based). `page_size` defaults to the service's.
    pub fn with_page(mut self, page: u32, page_size: Option<u32>) -> Self {
        self.page = Some(page);
        self.page_size = page_size;
        self
    }

    pub fn is_textual(&self) -> bool {
        matches!(self.mode, Mode::Textual(_))
    }

    /// The root tree, parsing the query string first in textual mode.
    pub fn root(&self) -> Result<(BooleanParameter, Vec<SortSpec>)> {
        let mut sort = self.sort.clone();
        let root = match &self.mode {
            Mode::Unset => BooleanParameter::and(),
            Mode::Structured(root) => root.clone(),
            Mode::Textual(query) => {
                let parsed = parse_query(query)?;
                sort.extend(parsed.sort);
                parsed.root
            }
        };
        Ok((root, sort))
    }

    /// Human-readable summary of what the search matches.
    pub fn describe(&self) -> Result<String> {
        let (root, _) = self.root()?;
        Ok(root.describe())
    }

    /// Finish parameter building and compile to a store query.
    pub fn compile(self, catalog: &SetCatalog, limits: &PageLimits) -> Result<CompiledSearch> {
        let (root, sort) = self.root()?;
        let mut root = Parameter::Boolean(root);
        root.resolve_sets(catalog)?;

        let preferred_set = match &self.preferred_set {
            Some(value) => Some(catalog.resolve(value)?.code.to_lowercase()),
            None => root.implied_set().map(str::to_string),
        };

        let filter = root.to_filter();
        tracing::debug!(
            atoms = filter.atom_count(),
            sorts = sort.len(),
            "Compiled search filter"
        );

        let mut query = CardQuery::new(filter, with_name_tiebreak(sort));
        if let Some(page) = self.page {
            if page == 0 {
                return Err(Error::Validation("Pages are numbered from 1".to_string()));
            }
            let requested = self.page_size.unwrap_or(limits.default_page_size);
            if requested == 0 {
                return Err(Error::Validation("Page size must be positive".to_string()));
            }
            let page_size = requested.min(limits.max_page_size);
            if page_size < requested {
                tracing::warn!(
                    requested,
                    max = limits.max_page_size,
                    "Page size clamped to maximum"
                );
            }
            query.limit = Some(page_size);
            query.offset = (page - 1).saturating_mul(page_size);
        }

        let Parameter::Boolean(root) = root else {
            return Err(Error::Internal("Search root is not a group".to_string()));
        };
        Ok(CompiledSearch {
            root,
            query,
            preferred_set,
        })
    }

    /// Run the search. The request is consumed.
    pub async fn execute(self, service: &SearchService) -> Result<Vec<SearchResult>> {
        service.execute(self).await
    }
}

/// Choose the printing shown for a card: the preferred set's printing when
/// the card has one, otherwise the most recent non-promo printing, otherwise
/// the most recent printing.
pub fn select_printing<'a>(
    card: &'a CardRecord,
    preferred_set: Option<&str>,
    catalog: &SetCatalog,
) -> Option<&'a PrintingRecord> {
    if let Some(code) = preferred_set {
        if let Some(printing) = card
            .printings
            .iter()
            .find(|p| p.set_code.eq_ignore_ascii_case(code))
        {
            return Some(printing);
        }
    }

    let release = |p: &PrintingRecord| catalog.get(&p.set_code).and_then(|s| s.release_date);
    let is_promo = |p: &PrintingRecord| catalog.get(&p.set_code).is_some_and(|s| s.is_promo());

    card.printings
        .iter()
        .filter(|p| !is_promo(*p))
        .max_by_key(|p| release(*p))
        .or_else(|| card.printings.iter().max_by_key(|p| release(*p)))
}
