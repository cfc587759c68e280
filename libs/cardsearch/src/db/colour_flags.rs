//! Bitmask encoding of colour sets used by the `cards` table.

use crate::models::{Colour, ColourSet};

fn bit(colour: Colour) -> i32 {
    match colour {
        Colour::White => 1,
        Colour::Blue => 2,
        Colour::Black => 4,
        Colour::Red => 8,
        Colour::Green => 16,
    }
}

pub fn flags_from_colours(colours: &ColourSet) -> i32 {
    colours.iter().map(bit).fold(0, |acc, b| acc | b)
}

/// Unknown bits are ignored.
pub fn colours_from_flags(flags: i32) -> ColourSet {
    Colour::ALL
        .iter()
        .copied()
        .filter(|c| flags & bit(*c) != 0)
        .collect()
}
