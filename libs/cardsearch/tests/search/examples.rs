use crate::support::*;
use sylvan_cardsearch::fields::{ColourField, NumericField};
use sylvan_cardsearch::{CardSearch, Error, Parameter, SearchService};

#[tokio::test]
async fn test_power_and_not_red() {
    let svc = service(power_fixture());
    assert_eq!(
        query_names(&svc, "power>=3 AND NOT colour:red").await,
        vec!["Baloth", "Kraken"]
    );
}

#[tokio::test]
async fn test_quoted_phrase_keeps_whitespace() {
    let svc = service(catalogue());
    assert_eq!(
        query_names(&svc, "\"lightning bolt\"").await,
        vec!["Lightning Bolt"]
    );
    // Unquoted words are separate terms
    assert_eq!(
        query_names(&svc, "lightning bolt").await,
        vec!["Bolt of Lightning", "Lightning Bolt"]
    );
}

#[tokio::test]
async fn test_missing_value_reports_position() {
    let svc = service(catalogue());
    let err = CardSearch::from_query("colour:")
        .execute(&svc)
        .await
        .expect_err("missing value");
    let Error::Parse(parse) = err else {
        panic!("expected a parse error, got {err:?}");
    };
    assert_eq!(parse.position, 7);
}

#[tokio::test]
async fn test_default_order_is_name() {
    let svc = service(vec![
        CardBuilder::new(1, "Zeal").build(),
        CardBuilder::new(2, "Ambush").build(),
        CardBuilder::new(3, "Mend").build(),
    ]);
    assert_eq!(query_names(&svc, "").await, vec!["Ambush", "Mend", "Zeal"]);
    assert_eq!(
        structured_names(&svc, vec![]).await,
        vec!["Ambush", "Mend", "Zeal"]
    );
}

#[tokio::test]
async fn test_empty_groups() {
    let svc = service(power_fixture());
    assert_eq!(structured_names(&svc, vec![Parameter::all()]).await.len(), 5);
    assert!(structured_names(&svc, vec![Parameter::none()])
        .await
        .is_empty());
}

#[tokio::test]
async fn test_structured_and_textual_agree() {
    let svc = service(power_fixture());
    let structured = structured_names(
        &svc,
        vec![
            Parameter::numeric(NumericField::Power, ">=", 3.0, false).unwrap(),
            Parameter::colour(ColourField::Colours, ">=", "red", true).unwrap(),
        ],
    )
    .await;
    let textual = query_names(&svc, "power>=3 -c:r").await;
    assert_eq!(structured, textual);
    assert_eq!(structured, vec!["Baloth", "Kraken"]);
}

#[tokio::test]
async fn test_double_negation_is_identity() {
    let svc = service(catalogue());
    for query in ["t:creature", "o:flying", "c:r", "r:mythic", "is:reprint", "usd<2"] {
        assert_eq!(
            query_names(&svc, &format!("not not {query}")).await,
            query_names(&svc, query).await,
            "{query}"
        );
        assert_eq!(
            query_names(&svc, &format!("-(-{query})")).await,
            query_names(&svc, query).await,
            "{query}"
        );
    }
}

#[tokio::test]
async fn test_negation_complements() {
    let svc = service(catalogue());
    let all = query_names(&svc, "").await;
    for query in ["t:creature", "pow>=2", "c:r", "is:vanilla"] {
        let mut both = query_names(&svc, query).await;
        both.extend(query_names(&svc, &format!("-{query}")).await);
        both.sort_by_key(|n| n.to_lowercase());
        assert_eq!(both, all, "{query}");
    }
}

#[tokio::test]
async fn test_negated_printing_terms_cover_every_card() {
    let svc = service(catalogue());
    let all = query_names(&svc, "").await;
    for query in ["a:rush", "set:m10", "r:common"] {
        let positive = query_names(&svc, query).await;
        let negative = query_names(&svc, &format!("-{query}")).await;
        let mut both: Vec<String> = positive.iter().chain(negative.iter()).cloned().collect();
        both.sort_by_key(|n| n.to_lowercase());
        both.dedup();
        assert_eq!(both, all, "{query}");
    }
    // Lightning Bolt has printings in and out of M10
    assert!(query_names(&svc, "set:m10").await.contains(&"Lightning Bolt".to_string()));
    assert!(query_names(&svc, "-set:m10").await.contains(&"Lightning Bolt".to_string()));
}

#[tokio::test]
async fn test_mixing_modes_is_rejected() {
    let mut search = CardSearch::from_query("bolt");
    let err = search
        .add_parameter(Parameter::all())
        .expect_err("textual search takes no parameters");
    assert!(matches!(err, Error::Validation(_)));

    let mut search = CardSearch::new();
    search.add_parameter(Parameter::all()).unwrap();
    assert!(matches!(search.set_query("bolt"), Err(Error::Validation(_))));
}

#[tokio::test]
async fn test_unknown_set_is_a_validation_error() {
    let svc: SearchService = service(catalogue());
    let err = CardSearch::from_query("set:nowhere")
        .execute(&svc)
        .await
        .expect_err("unknown set");
    assert!(matches!(err, Error::Validation(_)), "{err:?}");
}
