//! The closed set of searchable card attributes.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextField {
    Name,
    RulesText,
    TypeLine,
    FlavourText,
    Artist,
}

impl TextField {
    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::RulesText => "rules text",
            Self::TypeLine => "type",
            Self::FlavourText => "flavour text",
            Self::Artist => "artist",
        }
    }

    pub fn is_printing_level(self) -> bool {
        matches!(self, Self::Artist)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericField {
    Power,
    Toughness,
    Loyalty,
    ManaValue,
    Price,
    ColourCount,
    IdentityCount,
}

impl NumericField {
    pub fn label(self) -> &'static str {
        match self {
            Self::Power => "power",
            Self::Toughness => "toughness",
            Self::Loyalty => "loyalty",
            Self::ManaValue => "mana value",
            Self::Price => "price",
            Self::ColourCount => "colour count",
            Self::IdentityCount => "colour identity count",
        }
    }

    /// Field names usable on the right-hand side of a numeric comparison.
    pub fn from_operand_name(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "power" | "pow" => Some(Self::Power),
            "toughness" | "tough" | "tou" => Some(Self::Toughness),
            "loyalty" | "loy" => Some(Self::Loyalty),
            "mv" | "cmc" | "manavalue" => Some(Self::ManaValue),
            _ => None,
        }
    }

    pub fn is_printing_level(self) -> bool {
        matches!(self, Self::Price)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MembershipField {
    Set,
    Rarity,
    Layout,
}

impl MembershipField {
    pub fn label(self) -> &'static str {
        match self {
            Self::Set => "set",
            Self::Rarity => "rarity",
            Self::Layout => "layout",
        }
    }

    pub fn is_printing_level(self) -> bool {
        matches!(self, Self::Set | Self::Rarity)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColourField {
    Colours,
    Identity,
}

impl ColourField {
    pub fn label(self) -> &'static str {
        match self {
            Self::Colours => "colours",
            Self::Identity => "colour identity",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CardFlag {
    Reprint,
    Watermark,
    ColourIndicator,
    Multicoloured,
    Vanilla,
}

impl CardFlag {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "reprint" => Some(Self::Reprint),
            "watermark" => Some(Self::Watermark),
            "indicator" | "colourindicator" | "colorindicator" => Some(Self::ColourIndicator),
            "multicoloured" | "multicolored" | "multi" => Some(Self::Multicoloured),
            "vanilla" => Some(Self::Vanilla),
            _ => None,
        }
    }

    /// Phrases used when the flag holds and when it doesn't.
    pub fn phrases(self) -> (&'static str, &'static str) {
        match self {
            Self::Reprint => ("is a reprint", "isn't a reprint"),
            Self::Watermark => ("has a watermark", "doesn't have a watermark"),
            Self::ColourIndicator => ("has a colour indicator", "doesn't have a colour indicator"),
            Self::Multicoloured => ("is multicoloured", "isn't multicoloured"),
            Self::Vanilla => ("is vanilla", "isn't vanilla"),
        }
    }

    pub fn is_printing_level(self) -> bool {
        matches!(self, Self::Reprint | Self::Watermark)
    }
}
