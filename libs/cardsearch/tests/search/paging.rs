use crate::support::*;
use sylvan_cardsearch::{CardSearch, Error, PageLimits};

#[tokio::test]
async fn test_pages_follow_the_ordering() {
    let svc = service(catalogue());
    let page = |n: u32| CardSearch::new().with_page(n, Some(5));

    let first = names(&page(1).execute(&svc).await.unwrap());
    assert_eq!(
        first,
        vec![
            "Baneslayer Angel",
            "Bolt",
            "Bolt of Lightning",
            "Dryad Arbor",
            "Goblin Warchief"
        ]
    );
    let second = names(&page(2).execute(&svc).await.unwrap());
    assert_eq!(
        second,
        vec![
            "Grizzly Bears",
            "Lightning",
            "Lightning Bolt",
            "Nissa, Worldwaker",
            "Ornithopter"
        ]
    );
    let third = names(&page(3).execute(&svc).await.unwrap());
    assert_eq!(third, vec!["Sphinx of the Steel Wind", "Tarmogoyf"]);
    assert!(page(4).execute(&svc).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_page_size_defaults_and_clamps() {
    let svc = service(catalogue()).with_page_limits(PageLimits {
        default_page_size: 3,
        max_page_size: 4,
    });
    let results = CardSearch::new().with_page(1, None).execute(&svc).await.unwrap();
    assert_eq!(results.len(), 3);
    let results = CardSearch::new()
        .with_page(1, Some(100))
        .execute(&svc)
        .await
        .unwrap();
    assert_eq!(results.len(), 4);
}

#[tokio::test]
async fn test_page_zero_is_rejected() {
    let svc = service(catalogue());
    let err = CardSearch::new()
        .with_page(0, Some(10))
        .execute(&svc)
        .await
        .expect_err("page zero");
    assert!(matches!(err, Error::Validation(_)));
    let err = CardSearch::new()
        .with_page(1, Some(0))
        .execute(&svc)
        .await
        .expect_err("empty page");
    assert!(matches!(err, Error::Validation(_)));
}
