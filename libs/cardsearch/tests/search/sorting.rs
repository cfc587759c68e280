use crate::support::*;
use sylvan_cardsearch::{CardSearch, SortKey, SortSpec};

#[tokio::test]
async fn test_price_sorts_missing_values_last() {
    let svc = service(catalogue());
    let ascending = query_names(&svc, "sort:price").await;
    assert_eq!(
        &ascending[..4],
        ["Lightning Bolt", "Baneslayer Angel", "Tarmogoyf", "Bolt"]
    );
    let descending = query_names(&svc, "sort:-price").await;
    assert_eq!(
        &descending[..4],
        ["Tarmogoyf", "Baneslayer Angel", "Lightning Bolt", "Bolt"]
    );
}

#[tokio::test]
async fn test_ties_fall_back_to_name() {
    let svc = service(catalogue());
    let by_mv = query_names(&svc, "sort:mv").await;
    assert_eq!(
        &by_mv[..4],
        ["Dryad Arbor", "Ornithopter", "Bolt", "Lightning Bolt"]
    );
}

#[tokio::test]
async fn test_descending_by_operator() {
    let svc = service(power_fixture());
    assert_eq!(
        query_names(&svc, "sort<power").await,
        vec!["Kraken", "Ember Giant", "Baloth", "Goblin Guide", "Elvish Mystic"]
    );
}

#[tokio::test]
async fn test_explicit_sort_precedes_query_sort() {
    let svc = service(catalogue());
    let search = CardSearch::from_query("t:instant sort:name")
        .with_sort(SortSpec::desc(SortKey::ManaValue));
    let results = search.execute(&svc).await.unwrap();
    assert_eq!(
        names(&results),
        vec!["Bolt of Lightning", "Bolt", "Lightning Bolt"]
    );
}

#[tokio::test]
async fn test_release_date_sort_uses_earliest_printing() {
    let svc = service(catalogue());
    let by_date = query_names(&svc, "t:instant sort:released").await;
    assert_eq!(by_date, vec!["Lightning Bolt", "Bolt", "Bolt of Lightning"]);
}

#[tokio::test]
async fn test_rarity_sort_uses_most_common_printing() {
    let svc = service(catalogue());
    assert_eq!(
        query_names(&svc, "t:instant sort:rarity").await,
        vec!["Lightning Bolt", "Bolt", "Bolt of Lightning"]
    );
    assert_eq!(
        query_names(&svc, "t:instant sort:-rarity").await,
        vec!["Bolt of Lightning", "Bolt", "Lightning Bolt"]
    );
}

#[tokio::test]
async fn test_nan_power_sorts_last() {
    let cards = (0..64)
        .map(|i| {
            let card = CardBuilder::new(i, &format!("Card {i:02}"));
            if i % 3 == 0 {
                card.power_nan().build()
            } else {
                card.stats((i % 5) as f64, 1.0).build()
            }
        })
        .collect();
    let svc = service(cards);
    for query in ["sort:power", "sort:-power"] {
        let ordered = query_names(&svc, query).await;
        assert_eq!(ordered.len(), 64);
        let nan_ids: Vec<i64> = ordered[42..]
            .iter()
            .map(|n| n.trim_start_matches("Card ").parse().unwrap())
            .collect();
        assert!(nan_ids.iter().all(|id| id % 3 == 0), "{query}: {nan_ids:?}");
        // Missing values fall back to the name tiebreak
        assert!(nan_ids.windows(2).all(|w| w[0] < w[1]), "{query}");
    }
}
