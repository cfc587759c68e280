use crate::support::*;
use sylvan_cardsearch::models::Rarity;
use sylvan_cardsearch::{CardSearch, Error};

async fn check(query: &str, expected: &[&str]) {
    let svc = service(catalogue());
    assert_eq!(query_names(&svc, query).await, expected, "{query}");
}

#[tokio::test]
async fn test_text_fields() {
    check("t:creature pow>=3", &["Baneslayer Angel", "Sphinx of the Steel Wind"]).await;
    check("o:flying -t:artifact", &["Baneslayer Angel"]).await;
    check("ft:grizzlies", &["Grizzly Bears"]).await;
    check("a:rush", &["Lightning Bolt"]).await;
    check("name=bolt", &["Bolt"]).await;
    check("!\"Lightning\"", &["Lightning"]).await;
    check("n:/^bolt/", &["Bolt", "Bolt of Lightning"]).await;
}

#[tokio::test]
async fn test_numeric_fields() {
    check("tou>pow", &["Ornithopter"]).await;
    check("loy=3", &["Nissa, Worldwaker"]).await;
    check("mv>=8", &["Sphinx of the Steel Wind"]).await;
    check("usd<2", &["Lightning Bolt"]).await;
    check("usd>=400", &["Lightning Bolt"]).await;
}

#[tokio::test]
async fn test_colours_and_identity() {
    check("c=esper", &["Sphinx of the Steel Wind"]).await;
    check("c:wu", &["Sphinx of the Steel Wind"]).await;
    check("c:c", &["Dryad Arbor", "Ornithopter"]).await;
    check(
        "id:g",
        &[
            "Dryad Arbor",
            "Grizzly Bears",
            "Nissa, Worldwaker",
            "Ornithopter",
            "Tarmogoyf",
        ],
    )
    .await;
    check("c>w", &["Sphinx of the Steel Wind"]).await;
}

#[tokio::test]
async fn test_membership_fields() {
    check(
        "r:mythic",
        &[
            "Baneslayer Angel",
            "Nissa, Worldwaker",
            "Sphinx of the Steel Wind",
            "Tarmogoyf",
        ],
    )
    .await;
    check("e:zendikar t:sorcery", &["Lightning"]).await;
    check("set:\"magic 2010\" c:w", &["Baneslayer Angel"]).await;
    check("set:[lea m10] t:bear", &["Grizzly Bears"]).await;
    check("layout:normal pow>5", &["Sphinx of the Steel Wind"]).await;
}

#[tokio::test]
async fn test_flags() {
    check("is:vanilla", &["Bolt", "Dryad Arbor", "Grizzly Bears"]).await;
    check("is:reprint", &["Grizzly Bears", "Lightning Bolt"]).await;
    check("is:multicoloured", &["Sphinx of the Steel Wind"]).await;
    check("not:vanilla t:instant", &["Bolt of Lightning", "Lightning Bolt"]).await;
}

#[tokio::test]
async fn test_or_groups() {
    check("t:planeswalker or t:land", &["Dryad Arbor", "Nissa, Worldwaker"]).await;
    check(
        "t:instant (c:g or mv=1)",
        &["Bolt", "Lightning Bolt"],
    )
    .await;
    check("t:[goblin angel]", &["Baneslayer Angel", "Goblin Warchief"]).await;
    check("t:(creature goblin)", &["Goblin Warchief"]).await;
}

#[tokio::test]
async fn test_release_dates() {
    check(
        "date<2000-01-01",
        &["Grizzly Bears", "Lightning Bolt", "Ornithopter"],
    )
    .await;
    check(
        "d>zen",
        &["Bolt", "Bolt of Lightning", "Goblin Warchief", "Tarmogoyf"],
    )
    .await;
    check(
        "date>=zendikar t:creature",
        &["Dryad Arbor", "Goblin Warchief", "Sphinx of the Steel Wind", "Tarmogoyf"],
    )
    .await;
    // The M10 printing of Lightning Bolt isn't the one released before 2000
    check("set:m10 date<2000-01-01", &[]).await;
    check("set:lea date<2000-01-01 t:instant", &["Lightning Bolt"]).await;
}

#[tokio::test]
async fn test_release_date_needs_a_known_set() {
    let svc = service(catalogue());
    let err = CardSearch::from_query("date>nowhere")
        .execute(&svc)
        .await
        .expect_err("unknown set");
    assert!(
        matches!(err, Error::Validation(_)),
        "{err:?}"
    );
}

#[tokio::test]
async fn test_colour_counts() {
    check("c:0", &["Dryad Arbor", "Ornithopter"]).await;
    check("c>=2", &["Sphinx of the Steel Wind"]).await;
    check("id:0", &["Ornithopter"]).await;
    check("cc>1 or id=0", &["Ornithopter", "Sphinx of the Steel Wind"]).await;
}

#[tokio::test]
async fn test_nan_stats_never_compare() {
    let cards = vec![
        CardBuilder::new(1, "Blank")
            .power_nan()
            .printing("M10", Rarity::Common)
            .build(),
        CardBuilder::new(2, "Bear")
            .stats(2.0, 2.0)
            .printing("M10", Rarity::Common)
            .build(),
    ];
    let svc = service(cards);
    assert_eq!(query_names(&svc, "pow>=0").await, vec!["Bear"]);
    assert_eq!(query_names(&svc, "pow<100").await, vec!["Bear"]);
    assert_eq!(query_names(&svc, "-pow>=0").await, vec!["Blank"]);
}
