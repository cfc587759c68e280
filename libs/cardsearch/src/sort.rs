//! Sort strategy.
//!
//! A search orders by a list of [`SortSpec`]s applied as one multi-key
//! ordering. Missing values (a card without power, a card never priced) sort
//! last in either direction, and name ascending is always the final
//! tiebreak.

use crate::catalog::SetCatalog;
use crate::models::CardRecord;
use chrono::NaiveDate;
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Name,
    Power,
    Toughness,
    Loyalty,
    ManaValue,
    /// Cheapest known price across printings.
    Price,
    /// Colour sort order: mono colours in WUBRG order, then multicoloured,
    /// then colourless.
    Colour,
    /// Release date of the card's earliest printing.
    ReleaseDate,
    /// Most common rarity the card was printed at.
    Rarity,
}

impl SortKey {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "name" => Some(SortKey::Name),
            "power" | "pow" => Some(SortKey::Power),
            "toughness" | "tou" | "tough" => Some(SortKey::Toughness),
            "loyalty" | "loy" => Some(SortKey::Loyalty),
            "mv" | "cmc" | "manavalue" => Some(SortKey::ManaValue),
            "price" | "usd" => Some(SortKey::Price),
            "colour" | "color" => Some(SortKey::Colour),
            "date" | "released" | "release" => Some(SortKey::ReleaseDate),
            "rarity" => Some(SortKey::Rarity),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::Power => "power",
            SortKey::Toughness => "toughness",
            SortKey::Loyalty => "loyalty",
            SortKey::ManaValue => "mv",
            SortKey::Price => "price",
            SortKey::Colour => "colour",
            SortKey::ReleaseDate => "date",
            SortKey::Rarity => "rarity",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn asc(key: SortKey) -> Self {
        Self {
            key,
            direction: SortDirection::Ascending,
        }
    }

    pub fn desc(key: SortKey) -> Self {
        Self {
            key,
            direction: SortDirection::Descending,
        }
    }

    pub fn is_ascending(&self) -> bool {
        self.direction == SortDirection::Ascending
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let arrow = if self.is_ascending() { "asc" } else { "desc" };
        write!(f, "{} {}", self.key.as_str(), arrow)
    }
}

/// Append name ascending unless the list already orders by name.
pub fn with_name_tiebreak(mut specs: Vec<SortSpec>) -> Vec<SortSpec> {
    if !specs.iter().any(|s| s.key == SortKey::Name) {
        specs.push(SortSpec::asc(SortKey::Name));
    }
    specs
}

#[derive(Debug)]
enum SortValue<'a> {
    Text(String, &'a str),
    Number(f64),
    Date(NaiveDate),
}

impl SortValue<'_> {
    /// Total order; values of different kinds never meet under one key.
    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortValue::Text(x, raw_x), SortValue::Text(y, raw_y)) => {
                x.cmp(y).then_with(|| raw_x.cmp(raw_y))
            }
            (SortValue::Number(x), SortValue::Number(y)) => x.total_cmp(y),
            (SortValue::Date(x), SortValue::Date(y)) => x.cmp(y),
            _ => Ordering::Equal,
        }
    }
}

/// NaN sorts with the missing values.
fn number(value: Option<f64>) -> Option<SortValue<'static>> {
    value.filter(|v| !v.is_nan()).map(SortValue::Number)
}

fn sort_value<'a>(
    card: &'a CardRecord,
    key: SortKey,
    catalog: &SetCatalog,
) -> Option<SortValue<'a>> {
    match key {
        SortKey::Name => Some(SortValue::Text(card.name.to_lowercase(), &card.name)),
        SortKey::Power => number(card.power),
        SortKey::Toughness => number(card.toughness),
        SortKey::Loyalty => number(card.loyalty),
        SortKey::ManaValue => number(Some(card.mana_value)),
        SortKey::Price => number(
            card.printings
                .iter()
                .filter_map(|p| p.price)
                .filter(|v| !v.is_nan())
                .min_by(f64::total_cmp),
        ),
        SortKey::Colour => number(Some(f64::from(card.colours.sort_key()))),
        SortKey::ReleaseDate => card
            .printings
            .iter()
            .filter_map(|p| catalog.get(&p.set_code).and_then(|s| s.release_date))
            .min()
            .map(SortValue::Date),
        SortKey::Rarity => number(
            card.printings
                .iter()
                .map(|p| p.rarity)
                .min()
                .map(|r| f64::from(r.rank())),
        ),
    }
}

/// Compare two cards under a multi-key ordering, the way the SQL `ORDER BY`
/// built by the Postgres store does.
pub fn compare_cards(
    a: &CardRecord,
    b: &CardRecord,
    specs: &[SortSpec],
    catalog: &SetCatalog,
) -> Ordering {
    for spec in specs {
        let ordering = match (
            sort_value(a, spec.key, catalog),
            sort_value(b, spec.key, catalog),
        ) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(x), Some(y)) => {
                let ord = x.compare(&y);
                if spec.is_ascending() {
                    ord
                } else {
                    ord.reverse()
                }
            }
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    a.id.cmp(&b.id)
}
