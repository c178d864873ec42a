//! File-mediated flow between pipeline stages: what the collector or
//! enricher writes, the scorer reads back and ranks.

use beer_value_finder::models::BeerRecord;
use beer_value_finder::{scorer, store};

fn merged_fixture() -> Vec<BeerRecord> {
    serde_json::from_str(
        r#"[
            {
                "name": "Old Rasputin",
                "size": "4-12.0 Oz. Bottles",
                "price": "10.99",
                "style": "Imperial Stout",
                "style_rating": 97.0,
                "id": 1018,
                "abv": 9.0
            },
            {
                "name": "Ten FIDY",
                "size": "4-12.0 Oz. Cans",
                "price": "15.99",
                "style": "Imperial Stout",
                "style_rating": 99.0,
                "id": 33128
            },
            {
                "name": "Generic Stout",
                "size": "6-12.0 Oz. Cans",
                "price": "8.99",
                "style": "Imperial Stout",
                "style_rating": 62.0,
                "id": 7
            },
            {
                "name": "Never Matched",
                "size": "6-12.0 Oz. Cans",
                "price": "9.49"
            }
        ]"#,
    )
    .unwrap()
}

#[test]
fn saved_records_rank_after_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rated_beer.json");

    store::save_records(&merged_fixture(), &path).unwrap();
    let records = store::load_records(&path).unwrap();
    assert_eq!(records.len(), 4);
    // unknown fields survive the round trip
    assert_eq!(records[0].extra["abv"], serde_json::json!(9.0));

    let ranked = scorer::style_values(&records, "Imperial Stout").unwrap();
    assert_eq!(ranked.len(), 3, "unrated records are excluded");
    for pair in ranked.windows(2) {
        assert!(pair[0].score <= pair[1].score, "ranking must be ascending");
    }
    let total: f64 = ranked.iter().map(|s| s.score).sum();
    assert!(total.abs() < 1e-9);
}

#[test]
fn scoring_a_singleton_style_fails_instead_of_emitting_nan() {
    let records = merged_fixture();
    let err = scorer::style_values(&records, "Pilsner").unwrap_err();
    assert!(err.to_string().contains("at least 2"));
}

#[test]
fn save_creates_missing_output_directory() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("output").join("rated_beer.json");
    store::save_records(&merged_fixture(), &path).unwrap();
    assert!(path.exists());
}
