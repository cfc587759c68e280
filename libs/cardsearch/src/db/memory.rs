use super::{CardQuery, CardStore};
use crate::catalog::SetCatalog;
use crate::error::Result;
use crate::models::{CardRecord, SetInfo};
use crate::sort::compare_cards;
use async_trait::async_trait;

/// In-process store over a fixed card list. Filters and orders exactly as
/// the SQL rendering does.
#[derive(Debug, Clone, Default)]
pub struct MemoryCardStore {
    cards: Vec<CardRecord>,
    catalog: SetCatalog,
}

impl MemoryCardStore {
    /// Printings without a release date take their set's.
    pub fn new(cards: Vec<CardRecord>, sets: Vec<SetInfo>) -> Self {
        let mut store = Self {
            cards: Vec::with_capacity(cards.len()),
            catalog: SetCatalog::new(sets),
        };
        for card in cards {
            store.push_card(card);
        }
        store
    }

    pub fn cards(&self) -> &[CardRecord] {
        &self.cards
    }

    pub fn push_card(&mut self, mut card: CardRecord) {
        for printing in &mut card.printings {
            if printing.release_date.is_none() {
                printing.release_date = self
                    .catalog
                    .get(&printing.set_code)
                    .and_then(|set| set.release_date);
            }
        }
        self.cards.push(card);
    }
}

#[async_trait]
impl CardStore for MemoryCardStore {
    async fn fetch_cards(&self, query: &CardQuery) -> Result<Vec<CardRecord>> {
        let mut matched: Vec<&CardRecord> = self
            .cards
            .iter()
            .filter(|card| query.filter.matches(card))
            .collect();
        matched.sort_by(|a, b| compare_cards(a, b, &query.order, &self.catalog));

        let limit = query.limit.map_or(usize::MAX, |l| l as usize);
        Ok(matched
            .into_iter()
            .skip(query.offset as usize)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn load_sets(&self) -> Result<Vec<SetInfo>> {
        Ok(self.catalog.iter().cloned().collect())
    }
}
