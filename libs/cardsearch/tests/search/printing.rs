use crate::support::*;
use sylvan_cardsearch::models::Rarity;
use sylvan_cardsearch::{CardSearch, SearchResult, SearchService};

async fn chosen_set(svc: &SearchService, search: CardSearch) -> Vec<Option<String>> {
    let results: Vec<SearchResult> = search.execute(svc).await.unwrap();
    results
        .into_iter()
        .map(|r| r.selected_printing.map(|p| p.set_code))
        .collect()
}

#[tokio::test]
async fn test_most_recent_non_promo_by_default() {
    let svc = service(catalogue());
    assert_eq!(
        chosen_set(&svc, CardSearch::from_query("!\"lightning bolt\"")).await,
        vec![Some("M10".to_string())]
    );
}

#[tokio::test]
async fn test_set_term_implies_preferred_printing() {
    let svc = service(catalogue());
    assert_eq!(
        chosen_set(&svc, CardSearch::from_query("!\"lightning bolt\" set:lea")).await,
        vec![Some("LEA".to_string())]
    );
    // A set inside an OR picks nothing
    assert_eq!(
        chosen_set(
            &svc,
            CardSearch::from_query("!\"lightning bolt\" (set:lea or set:zen)")
        )
        .await,
        vec![Some("M10".to_string())]
    );
}

#[tokio::test]
async fn test_explicit_preferred_set() {
    let svc = service(catalogue());
    let search = CardSearch::from_query("!\"lightning bolt\"")
        .with_preferred_set("Limited Edition Alpha");
    assert_eq!(chosen_set(&svc, search).await, vec![Some("LEA".to_string())]);

    let search = CardSearch::from_query("!\"lightning bolt\"").with_preferred_set("pm10");
    assert_eq!(chosen_set(&svc, search).await, vec![Some("PM10".to_string())]);

    // Cards without a printing in the preferred set fall back
    let search = CardSearch::from_query("!\"lightning bolt\"").with_preferred_set("zen");
    assert_eq!(chosen_set(&svc, search).await, vec![Some("M10".to_string())]);
}

#[tokio::test]
async fn test_promo_only_card_keeps_its_promo() {
    let card = CardBuilder::new(90, "Promo Dragon")
        .printing("PM10", Rarity::Special)
        .build();
    let svc = service(vec![card]);
    assert_eq!(
        chosen_set(&svc, CardSearch::new()).await,
        vec![Some("PM10".to_string())]
    );
}

#[tokio::test]
async fn test_printing_terms_hold_on_one_printing() {
    let shock = CardBuilder::new(91, "Shock")
        .type_line("Instant")
        .colours("r")
        .mv(1.0)
        .printing("M10", Rarity::Common)
        .artist("Jon Foster")
        .printing("LEA", Rarity::Rare)
        .artist("Randy Gallegos")
        .build();
    let svc = service(vec![shock]);

    assert!(query_names(&svc, "set:m10 r:rare").await.is_empty());
    assert!(query_names(&svc, "set:lea a:foster").await.is_empty());
    assert_eq!(query_names(&svc, "set:lea r:rare").await, vec!["Shock"]);
    assert_eq!(query_names(&svc, "set:m10 (r:rare or a:foster)").await, vec!["Shock"]);
    // Each printing is tested on its own, so the negation also matches
    assert_eq!(query_names(&svc, "-(set:m10 r:rare)").await, vec!["Shock"]);
}
