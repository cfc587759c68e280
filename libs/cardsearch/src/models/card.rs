use super::{ColourSet, Rarity};
use chrono::NaiveDate;
use serde::Serialize;

/// A card as returned by the persistence layer, with all of its printings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardRecord {
    pub id: i64,
    pub name: String,
    pub type_line: String,
    pub rules_text: Option<String>,
    pub flavour_text: Option<String>,
    pub power: Option<f64>,
    pub toughness: Option<f64>,
    pub loyalty: Option<f64>,
    pub mana_value: f64,
    pub colours: ColourSet,
    pub colour_identity: ColourSet,
    pub has_colour_indicator: bool,
    pub layout: String,
    pub printings: Vec<PrintingRecord>,
}

/// One printing of a card in a set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrintingRecord {
    pub id: i64,
    pub set_code: String,
    pub number: String,
    pub rarity: Rarity,
    pub artist: Option<String>,
    pub price: Option<f64>,
    pub is_reprint: bool,
    pub watermark: Option<String>,
    /// Release date of the printing's set.
    pub release_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SetInfo {
    pub code: String,
    pub name: String,
    pub set_type: String,
    pub release_date: Option<NaiveDate>,
}

impl SetInfo {
    pub fn is_promo(&self) -> bool {
        self.set_type.eq_ignore_ascii_case("promo")
    }
}
