//! Card, printing and set records shared by the search core and the stores.

mod card;
mod colour;
mod rarity;

pub use card::{CardRecord, PrintingRecord, SetInfo};
pub use colour::{Colour, ColourSet};
pub use rarity::Rarity;
