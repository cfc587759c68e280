//! In-process evaluation of compiled filters against card records.

use super::{FilterExpr, NumericOperand, Predicate, ReleaseBound, TextMatch};
use crate::fields::{CardFlag, ColourField, MembershipField, NumericField, TextField};
use crate::filter::ComparisonOp;
use crate::models::{CardRecord, ColourSet, PrintingRecord};

impl FilterExpr {
    /// Whether the card matches. When any atom is printing-level the whole
    /// expression is evaluated against one printing at a time, so every
    /// printing-level term must hold for the same printing.
    pub fn matches(&self, card: &CardRecord) -> bool {
        if self.has_printing_terms() {
            card.printings
                .iter()
                .any(|printing| self.matches_row(card, Some(printing)))
        } else {
            self.matches_row(card, None)
        }
    }

    /// Evaluate against a single card/printing row. Printing-level atoms are
    /// false without a printing.
    pub fn matches_row(&self, card: &CardRecord, printing: Option<&PrintingRecord>) -> bool {
        match self {
            FilterExpr::All => true,
            FilterExpr::Nothing => false,
            FilterExpr::Atom(p) => p.matches_with(card, printing),
            FilterExpr::Not(inner) => !inner.matches_row(card, printing),
            FilterExpr::And(children) => children.iter().all(|c| c.matches_row(card, printing)),
            FilterExpr::Or(children) => children.iter().any(|c| c.matches_row(card, printing)),
        }
    }
}

impl Predicate {
    fn matches_with(&self, card: &CardRecord, printing: Option<&PrintingRecord>) -> bool {
        match self {
            Predicate::Text { field, matcher } => text_value(card, printing, *field)
                .map(|text| text_matches(matcher, text))
                .unwrap_or(false),
            Predicate::Numeric { field, op, operand } => {
                let Some(left) = numeric_value(card, printing, *field) else {
                    return false;
                };
                let right = match operand {
                    NumericOperand::Value(v) => *v,
                    NumericOperand::Field(other) => match numeric_value(card, printing, *other) {
                        Some(v) => v,
                        None => return false,
                    },
                };
                op.compare(left, right)
            }
            Predicate::OneOf { field, values } => {
                let actual = match field {
                    MembershipField::Set => printing.map(|p| p.set_code.to_lowercase()),
                    MembershipField::Rarity => printing.map(|p| p.rarity.as_str().to_string()),
                    MembershipField::Layout => Some(card.layout.to_lowercase()),
                };
                actual.is_some_and(|a| values.iter().any(|v| *v == a))
            }
            Predicate::Colours { field, op, colours } => {
                let actual = match field {
                    ColourField::Colours => &card.colours,
                    ColourField::Identity => &card.colour_identity,
                };
                colours_match(actual, *op, colours)
            }
            Predicate::Flag(flag) => match flag {
                CardFlag::Reprint => printing.is_some_and(|p| p.is_reprint),
                CardFlag::Watermark => printing.is_some_and(|p| p.watermark.is_some()),
                CardFlag::ColourIndicator => card.has_colour_indicator,
                CardFlag::Multicoloured => card.colours.len() >= 2,
                CardFlag::Vanilla => card
                    .rules_text
                    .as_deref()
                    .map(|t| t.trim().is_empty())
                    .unwrap_or(true),
            },
            // An unresolved set bound has no date to compare with
            Predicate::Released { op, bound } => {
                match (printing.and_then(|p| p.release_date), bound) {
                    (Some(released), ReleaseBound::Date(date)) => op.compare(released, *date),
                    _ => false,
                }
            }
        }
    }
}

fn text_value<'a>(
    card: &'a CardRecord,
    printing: Option<&'a PrintingRecord>,
    field: TextField,
) -> Option<&'a str> {
    match field {
        TextField::Name => Some(card.name.as_str()),
        TextField::RulesText => card.rules_text.as_deref(),
        TextField::TypeLine => Some(card.type_line.as_str()),
        TextField::FlavourText => card.flavour_text.as_deref(),
        TextField::Artist => printing.and_then(|p| p.artist.as_deref()),
    }
}

/// NaN reads as a missing value.
fn numeric_value(
    card: &CardRecord,
    printing: Option<&PrintingRecord>,
    field: NumericField,
) -> Option<f64> {
    let value = match field {
        NumericField::Power => card.power,
        NumericField::Toughness => card.toughness,
        NumericField::Loyalty => card.loyalty,
        NumericField::ManaValue => Some(card.mana_value),
        NumericField::Price => printing.and_then(|p| p.price),
        NumericField::ColourCount => Some(card.colours.len() as f64),
        NumericField::IdentityCount => Some(card.colour_identity.len() as f64),
    };
    value.filter(|v| !v.is_nan())
}

fn text_matches(matcher: &TextMatch, text: &str) -> bool {
    match matcher {
        TextMatch::Contains(needle) => text.to_lowercase().contains(needle.as_str()),
        TextMatch::Exact(needle) => text.to_lowercase() == *needle,
        TextMatch::Regex(pattern) => pattern.is_match(text),
    }
}

pub(crate) fn colours_match(actual: &ColourSet, op: ComparisonOp, wanted: &ColourSet) -> bool {
    match op {
        ComparisonOp::Eq => actual == wanted,
        ComparisonOp::Ne => actual != wanted,
        ComparisonOp::Ge => actual.is_superset(wanted),
        ComparisonOp::Gt => actual.is_superset(wanted) && actual != wanted,
        ComparisonOp::Le => actual.is_subset(wanted),
        ComparisonOp::Lt => actual.is_subset(wanted) && actual != wanted,
    }
}
