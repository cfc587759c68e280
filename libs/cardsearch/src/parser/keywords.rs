//! Search keys accepted in `key:value` terms.

use crate::fields::{ColourField, MembershipField, NumericField, TextField};
use phf::phf_map;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    Text(TextField),
    Numeric(NumericField),
    Membership(MembershipField),
    Rarity,
    Colour(ColourField),
    /// Release date of a printing's set
    Date,
    /// `is:` / `has:`
    FlagPresent,
    /// `not:`
    FlagAbsent,
    Sort,
}

static KEYS: phf::Map<&'static str, KeyKind> = phf_map! {
    "name" => KeyKind::Text(TextField::Name),
    "n" => KeyKind::Text(TextField::Name),
    "oracle" => KeyKind::Text(TextField::RulesText),
    "o" => KeyKind::Text(TextField::RulesText),
    "rules" => KeyKind::Text(TextField::RulesText),
    "text" => KeyKind::Text(TextField::RulesText),
    "type" => KeyKind::Text(TextField::TypeLine),
    "t" => KeyKind::Text(TextField::TypeLine),
    "flavour" => KeyKind::Text(TextField::FlavourText),
    "flavor" => KeyKind::Text(TextField::FlavourText),
    "ft" => KeyKind::Text(TextField::FlavourText),
    "artist" => KeyKind::Text(TextField::Artist),
    "art" => KeyKind::Text(TextField::Artist),
    "a" => KeyKind::Text(TextField::Artist),
    "power" => KeyKind::Numeric(NumericField::Power),
    "pow" => KeyKind::Numeric(NumericField::Power),
    "toughness" => KeyKind::Numeric(NumericField::Toughness),
    "tou" => KeyKind::Numeric(NumericField::Toughness),
    "tough" => KeyKind::Numeric(NumericField::Toughness),
    "loyalty" => KeyKind::Numeric(NumericField::Loyalty),
    "loy" => KeyKind::Numeric(NumericField::Loyalty),
    "mv" => KeyKind::Numeric(NumericField::ManaValue),
    "cmc" => KeyKind::Numeric(NumericField::ManaValue),
    "manavalue" => KeyKind::Numeric(NumericField::ManaValue),
    "price" => KeyKind::Numeric(NumericField::Price),
    "usd" => KeyKind::Numeric(NumericField::Price),
    "colour" => KeyKind::Colour(ColourField::Colours),
    "color" => KeyKind::Colour(ColourField::Colours),
    "col" => KeyKind::Colour(ColourField::Colours),
    "c" => KeyKind::Colour(ColourField::Colours),
    "identity" => KeyKind::Colour(ColourField::Identity),
    "id" => KeyKind::Colour(ColourField::Identity),
    "ci" => KeyKind::Colour(ColourField::Identity),
    "cc" => KeyKind::Numeric(NumericField::ColourCount),
    "colourcount" => KeyKind::Numeric(NumericField::ColourCount),
    "colorcount" => KeyKind::Numeric(NumericField::ColourCount),
    "identitycount" => KeyKind::Numeric(NumericField::IdentityCount),
    "date" => KeyKind::Date,
    "d" => KeyKind::Date,
    "set" => KeyKind::Membership(MembershipField::Set),
    "s" => KeyKind::Membership(MembershipField::Set),
    "e" => KeyKind::Membership(MembershipField::Set),
    "edition" => KeyKind::Membership(MembershipField::Set),
    "rarity" => KeyKind::Rarity,
    "r" => KeyKind::Rarity,
    "layout" => KeyKind::Membership(MembershipField::Layout),
    "is" => KeyKind::FlagPresent,
    "has" => KeyKind::FlagPresent,
    "not" => KeyKind::FlagAbsent,
    "sort" => KeyKind::Sort,
    "order" => KeyKind::Sort,
};

pub fn lookup(key: &str) -> Option<KeyKind> {
    KEYS.get(key.to_lowercase().as_str()).copied()
}
