use sylvan_cardsearch::fields::{CardFlag, NumericField, TextField};
use sylvan_cardsearch::{BooleanParameter, CardSearch, Parameter, TextMode};

fn describe(query: &str) -> String {
    CardSearch::from_query(query)
        .describe()
        .unwrap_or_else(|e| panic!("{query:?}: {e}"))
}

#[test]
fn test_leaf_descriptions() {
    assert_eq!(describe("power>3"), "power is greater than 3");
    assert_eq!(describe("-name:Bolt"), "name doesn't contain \"Bolt\"");
    assert_eq!(describe("t=Instant"), "type is \"Instant\"");
    assert_eq!(describe("o:/draw/"), "rules text matches /draw/");
    assert_eq!(describe("mv<=pow"), "mana value is less than or equal to power");
    assert_eq!(describe("r:rare"), "rarity is rare");
    assert_eq!(describe("-set:m10"), "set isn't m10");
    assert_eq!(describe("c:c"), "colours are colourless");
    assert_eq!(describe("id<=gw"), "colour identity is at most WG");
    assert_eq!(describe("is:reprint"), "is a reprint");
    assert_eq!(describe("not:reprint"), "isn't a reprint");
    assert_eq!(describe("-is:reprint"), "isn't a reprint");
}

#[test]
fn test_group_descriptions() {
    assert_eq!(describe(""), "all cards");
    assert_eq!(
        describe("t:goblin (c:r or c:g)"),
        "type contains \"goblin\" and (colours are at least R or colours are at least G)"
    );
    assert_eq!(
        describe("-(a or b)"),
        "not (name contains \"a\" or name contains \"b\")"
    );
    assert_eq!(
        describe("a or b c"),
        "name contains \"a\" or name contains \"b\" and name contains \"c\""
    );
}

#[test]
fn test_structured_descriptions_match_textual() {
    let mut search = CardSearch::new();
    search
        .add_parameter(Parameter::numeric(NumericField::Power, ">", 3.0, false).unwrap())
        .unwrap();
    search
        .add_parameter(
            Parameter::text(TextField::Name, "Bolt", TextMode::Contains, true).unwrap(),
        )
        .unwrap();
    assert_eq!(
        search.describe().unwrap(),
        describe("power>3 -name:Bolt")
    );
}

#[test]
fn test_empty_or_and_not_groups() {
    assert_eq!(Parameter::none().describe(), "no cards");
    assert_eq!(
        BooleanParameter::not(Parameter::flag(CardFlag::Vanilla, true, false)).describe(),
        "not (is vanilla)"
    );
}

#[test]
fn test_negated_leaf_reads_differently() {
    for query in ["power>3", "name:bolt", "set:m10", "c:r", "is:vanilla", "r>=rare"] {
        let plain = describe(query);
        let negated = describe(&format!("-{query}"));
        assert_ne!(plain, negated, "{query}");
    }
}

#[test]
fn test_release_dates_and_colour_counts() {
    assert_eq!(describe("date<2009-07-17"), "was released before 2009-07-17");
    assert_eq!(describe("-d>=m10"), "wasn't released on or after set m10");
    assert_eq!(describe("c:2"), "colour count is equal to 2");
    assert_eq!(describe("id<=1"), "colour identity count is less than or equal to 1");
}
