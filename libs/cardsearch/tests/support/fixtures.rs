use chrono::NaiveDate;
use sylvan_cardsearch::models::{CardRecord, ColourSet, PrintingRecord, Rarity, SetInfo};

pub fn set(code: &str, name: &str, set_type: &str, released: (i32, u32, u32)) -> SetInfo {
    SetInfo {
        code: code.to_string(),
        name: name.to_string(),
        set_type: set_type.to_string(),
        release_date: NaiveDate::from_ymd_opt(released.0, released.1, released.2),
    }
}

/// Sets shared by every fixture.
pub fn sets() -> Vec<SetInfo> {
    vec![
        set("LEA", "Limited Edition Alpha", "core", (1993, 8, 5)),
        set("M10", "Magic 2010", "core", (2009, 7, 17)),
        set("PM10", "Magic 2010 Promos", "promo", (2009, 7, 17)),
        set("ZEN", "Zendikar", "expansion", (2009, 10, 2)),
        set("DOM", "Dominaria", "expansion", (2018, 4, 27)),
    ]
}

/// Builder for card records
pub struct CardBuilder {
    card: CardRecord,
    next_printing: i64,
}

impl CardBuilder {
    pub fn new(id: i64, name: &str) -> Self {
        Self {
            card: CardRecord {
                id,
                name: name.to_string(),
                type_line: "Creature".to_string(),
                rules_text: None,
                flavour_text: None,
                power: None,
                toughness: None,
                loyalty: None,
                mana_value: 0.0,
                colours: ColourSet::colourless(),
                colour_identity: ColourSet::colourless(),
                has_colour_indicator: false,
                layout: "normal".to_string(),
                printings: Vec::new(),
            },
            next_printing: id * 100,
        }
    }

    pub fn type_line(mut self, type_line: &str) -> Self {
        self.card.type_line = type_line.to_string();
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.card.rules_text = Some(text.to_string());
        self
    }

    pub fn flavour(mut self, text: &str) -> Self {
        self.card.flavour_text = Some(text.to_string());
        self
    }

    /// Sets colours and identity alike.
    pub fn colours(mut self, colours: &str) -> Self {
        let colours = ColourSet::from_nickname(colours).expect("fixture colour");
        self.card.colour_identity = colours.clone();
        self.card.colours = colours;
        self
    }

    pub fn identity(mut self, colours: &str) -> Self {
        self.card.colour_identity = ColourSet::from_nickname(colours).expect("fixture colour");
        self
    }

    pub fn stats(mut self, power: f64, toughness: f64) -> Self {
        self.card.power = Some(power);
        self.card.toughness = Some(toughness);
        self
    }

    pub fn loyalty(mut self, loyalty: f64) -> Self {
        self.card.loyalty = Some(loyalty);
        self
    }

    pub fn mv(mut self, mana_value: f64) -> Self {
        self.card.mana_value = mana_value;
        self
    }

    pub fn printing(mut self, set_code: &str, rarity: Rarity) -> Self {
        self.next_printing += 1;
        let is_reprint = !self.card.printings.is_empty();
        let release_date = sets()
            .into_iter()
            .find(|s| s.code == set_code)
            .and_then(|s| s.release_date);
        self.card.printings.push(PrintingRecord {
            id: self.next_printing,
            set_code: set_code.to_string(),
            number: self.next_printing.to_string(),
            rarity,
            artist: None,
            price: None,
            is_reprint,
            watermark: None,
            release_date,
        });
        self
    }

    /// Adjusts the most recently added printing.
    pub fn priced(mut self, price: f64) -> Self {
        if let Some(p) = self.card.printings.last_mut() {
            p.price = Some(price);
        }
        self
    }

    pub fn artist(mut self, artist: &str) -> Self {
        if let Some(p) = self.card.printings.last_mut() {
            p.artist = Some(artist.to_string());
        }
        self
    }

    pub fn power_nan(mut self) -> Self {
        self.card.power = Some(f64::NAN);
        self
    }

    pub fn build(self) -> CardRecord {
        self.card
    }
}

/// Five cards: two red, two non-red with power 3 or more, one non-red
/// with less.
pub fn power_fixture() -> Vec<CardRecord> {
    vec![
        CardBuilder::new(1, "Ember Giant")
            .colours("r")
            .stats(5.0, 4.0)
            .mv(5.0)
            .printing("M10", Rarity::Uncommon)
            .build(),
        CardBuilder::new(2, "Goblin Guide")
            .colours("r")
            .stats(2.0, 2.0)
            .mv(1.0)
            .printing("ZEN", Rarity::Rare)
            .build(),
        CardBuilder::new(3, "Kraken")
            .colours("u")
            .stats(8.0, 8.0)
            .mv(7.0)
            .printing("DOM", Rarity::Mythic)
            .build(),
        CardBuilder::new(4, "Baloth")
            .colours("g")
            .stats(4.0, 4.0)
            .mv(4.0)
            .printing("ZEN", Rarity::Uncommon)
            .build(),
        CardBuilder::new(5, "Elvish Mystic")
            .colours("g")
            .stats(1.0, 1.0)
            .mv(1.0)
            .printing("M10", Rarity::Common)
            .build(),
    ]
}

/// A small mixed catalogue touching every searchable field.
pub fn catalogue() -> Vec<CardRecord> {
    vec![
        CardBuilder::new(10, "Lightning Bolt")
            .type_line("Instant")
            .colours("r")
            .mv(1.0)
            .text("Lightning Bolt deals 3 damage to any target.")
            .printing("LEA", Rarity::Common)
            .artist("Christopher Rush")
            .priced(400.0)
            .printing("M10", Rarity::Common)
            .artist("Christopher Moeller")
            .priced(1.5)
            .printing("PM10", Rarity::Special)
            .priced(12.0)
            .build(),
        CardBuilder::new(11, "Lightning")
            .type_line("Sorcery")
            .colours("r")
            .mv(2.0)
            .text("Draw a card.")
            .printing("ZEN", Rarity::Common)
            .build(),
        CardBuilder::new(12, "Bolt")
            .type_line("Instant")
            .colours("r")
            .mv(1.0)
            .printing("DOM", Rarity::Uncommon)
            .build(),
        CardBuilder::new(13, "Bolt of Lightning")
            .type_line("Instant")
            .colours("r")
            .mv(3.0)
            .text("Bolt of Lightning deals 4 damage to any target.")
            .printing("DOM", Rarity::Rare)
            .build(),
        CardBuilder::new(14, "Goblin Warchief")
            .type_line("Creature - Goblin Warrior")
            .colours("r")
            .stats(2.0, 2.0)
            .mv(3.0)
            .text("Goblin spells you cast cost {1} less to cast.")
            .printing("DOM", Rarity::Uncommon)
            .build(),
        CardBuilder::new(15, "Grizzly Bears")
            .type_line("Creature - Bear")
            .colours("g")
            .stats(2.0, 2.0)
            .mv(2.0)
            .flavour("Don't try to outrun one of Dominaria's grizzlies.")
            .printing("LEA", Rarity::Common)
            .printing("M10", Rarity::Common)
            .build(),
        CardBuilder::new(16, "Baneslayer Angel")
            .type_line("Creature - Angel")
            .colours("w")
            .stats(5.0, 5.0)
            .mv(5.0)
            .text("Flying, first strike, lifelink")
            .printing("M10", Rarity::Mythic)
            .priced(9.0)
            .build(),
        CardBuilder::new(17, "Sphinx of the Steel Wind")
            .type_line("Artifact Creature - Sphinx")
            .colours("esper")
            .stats(6.0, 6.0)
            .mv(8.0)
            .text("Flying, first strike, vigilance, lifelink, protection from red and from green")
            .printing("ZEN", Rarity::Mythic)
            .build(),
        CardBuilder::new(18, "Ornithopter")
            .type_line("Artifact Creature - Thopter")
            .stats(0.0, 2.0)
            .text("Flying")
            .printing("LEA", Rarity::Uncommon)
            .build(),
        CardBuilder::new(19, "Tarmogoyf")
            .type_line("Creature - Lhurgoyf")
            .colours("g")
            .mv(2.0)
            .text("Tarmogoyf's power is equal to the number of card types among cards in all graveyards.")
            .printing("DOM", Rarity::Mythic)
            .priced(30.0)
            .build(),
        CardBuilder::new(20, "Nissa, Worldwaker")
            .type_line("Legendary Planeswalker - Nissa")
            .colours("g")
            .loyalty(3.0)
            .mv(5.0)
            .text("+1: Target land you control becomes a 4/4 Elemental creature with trample.")
            .printing("M10", Rarity::Mythic)
            .build(),
        CardBuilder::new(21, "Dryad Arbor")
            .type_line("Land Creature - Forest Dryad")
            .identity("g")
            .stats(1.0, 1.0)
            .printing("ZEN", Rarity::Uncommon)
            .build(),
    ]
}
