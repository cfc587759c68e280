//! Card colours as a set of enum values.
//!
//! The search core only reasons about `ColourSet`; the integer flag encoding
//! used by the database lives in `db::colour_flags`.

use phf::phf_map;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Colour {
    White,
    Blue,
    Black,
    Red,
    Green,
}

impl Colour {
    /// All colours in canonical (WUBRG) order.
    pub const ALL: [Colour; 5] = [
        Colour::White,
        Colour::Blue,
        Colour::Black,
        Colour::Red,
        Colour::Green,
    ];

    pub fn symbol(self) -> char {
        match self {
            Colour::White => 'W',
            Colour::Blue => 'U',
            Colour::Black => 'B',
            Colour::Red => 'R',
            Colour::Green => 'G',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol.to_ascii_lowercase() {
            'w' => Some(Colour::White),
            'u' => Some(Colour::Blue),
            'b' => Some(Colour::Black),
            'r' => Some(Colour::Red),
            'g' => Some(Colour::Green),
            _ => None,
        }
    }
}

use Colour::{Black as B, Blue as U, Green as G, Red as R, White as W};

/// Named colour combinations accepted in queries.
static COLOUR_NICKNAMES: phf::Map<&'static str, &'static [Colour]> = phf_map! {
    "colourless" => &[],
    "colorless" => &[],
    "c" => &[],
    "white" => &[W],
    "blue" => &[U],
    "black" => &[B],
    "red" => &[R],
    "green" => &[G],
    "azorius" => &[W, U],
    "dimir" => &[U, B],
    "rakdos" => &[B, R],
    "gruul" => &[R, G],
    "selesnya" => &[G, W],
    "orzhov" => &[W, B],
    "izzet" => &[U, R],
    "golgari" => &[B, G],
    "boros" => &[R, W],
    "simic" => &[G, U],
    "esper" => &[W, U, B],
    "grixis" => &[U, B, R],
    "jund" => &[B, R, G],
    "naya" => &[R, G, W],
    "bant" => &[G, W, U],
    "abzan" => &[W, B, G],
    "jeskai" => &[U, R, W],
    "sultai" => &[B, G, U],
    "mardu" => &[R, W, B],
    "temur" => &[G, U, R],
    "chaos" => &[U, B, R, G],
    "aggression" => &[B, R, G, W],
    "altruism" => &[R, G, W, U],
    "growth" => &[G, W, U, B],
    "artifice" => &[W, U, B, R],
    "all" => &[W, U, B, R, G],
};

/// An unordered set of colours. Iteration is always in WUBRG order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct ColourSet(BTreeSet<Colour>);

impl ColourSet {
    pub fn colourless() -> Self {
        Self::default()
    }

    /// Parse a colour nickname (`azorius`), a full name (`red`) or a run of
    /// colour letters (`wr`).
    pub fn from_nickname(text: &str) -> Option<Self> {
        let lowered = text.trim().to_lowercase();
        if lowered.is_empty() {
            return None;
        }
        if let Some(colours) = COLOUR_NICKNAMES.get(lowered.as_str()) {
            return Some(colours.iter().copied().collect());
        }
        lowered.chars().map(Colour::from_symbol).collect()
    }

    pub fn contains(&self, colour: Colour) -> bool {
        self.0.contains(&colour)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_superset(&self, other: &ColourSet) -> bool {
        self.0.is_superset(&other.0)
    }

    pub fn is_subset(&self, other: &ColourSet) -> bool {
        self.0.is_subset(&other.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = Colour> + '_ {
        self.0.iter().copied()
    }

    /// Colour symbols in WUBRG order, `C` for colourless.
    pub fn symbols(&self) -> String {
        if self.is_empty() {
            return "C".to_string();
        }
        self.iter().map(Colour::symbol).collect()
    }

    /// Ordering key: mono colours in WUBRG order, then multicoloured, then
    /// colourless.
    pub fn sort_key(&self) -> i32 {
        match self.len() {
            0 => 7,
            1 => self
                .iter()
                .next()
                .and_then(|c| Colour::ALL.iter().position(|x| *x == c))
                .map(|i| i as i32 + 1)
                .unwrap_or(6),
            _ => 6,
        }
    }
}

impl FromIterator<Colour> for ColourSet {
    fn from_iter<I: IntoIterator<Item = Colour>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for ColourSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.symbols())
    }
}
