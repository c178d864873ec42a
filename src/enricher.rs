use std::path::Path;

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::models::BeerRecord;
use crate::ratings::{RatingsCandidate, RatingsClient};
use crate::store;

/// Relational fields of a search hit that never belong on a product
/// record.
const EXCLUDED_FIELDS: [&str; 2] = ["brewery", "brewed_at"];

/// Enrich every record that has no ratings identifier yet, then write the
/// full set back.
pub fn update_ratings(path: &Path) -> Result<()> {
    let client = RatingsClient::new()?;
    enrich_file(path, |name| client.search(name))
}

/// The write happens whether or not the lookup loop finished, so partial
/// progress survives a mid-run failure.
fn enrich_file(
    path: &Path,
    search: impl FnMut(&str) -> Result<Vec<RatingsCandidate>>,
) -> Result<()> {
    let mut records = store::load_records(path)?;
    let outcome = enrich_all(&mut records, search);
    let saved = store::save_records(&records, path);
    outcome.and(saved)
}

fn enrich_all(
    records: &mut [BeerRecord],
    mut search: impl FnMut(&str) -> Result<Vec<RatingsCandidate>>,
) -> Result<()> {
    let mut matched = 0;
    for record in records.iter_mut() {
        if record.id.is_some() {
            continue;
        }
        let name = record.name().to_string();
        let candidates = search(&name)?;
        match find_match(&name, &candidates) {
            Some(candidate) => {
                merge_candidate(record, candidate);
                matched += 1;
                info!(name, "merged rating");
            }
            None => warn!(name, "no exact-name match"),
        }
    }
    info!(matched, "rating enrichment pass complete");
    Ok(())
}

/// First exact-name hit that is not a stale alias.
fn find_match<'a>(
    name: &str,
    candidates: &'a [RatingsCandidate],
) -> Option<&'a RatingsCandidate> {
    candidates.iter().find(|candidate| {
        if candidate.name != name {
            return false;
        }
        if candidate.aliased {
            debug!(name, "skipping aliased entry");
            return false;
        }
        true
    })
}

/// Copy the candidate's fields onto the record, excluding the relational
/// ones. Known fields land typed; the rest go to `extra` verbatim.
fn merge_candidate(record: &mut BeerRecord, candidate: &RatingsCandidate) {
    for (key, value) in &candidate.fields {
        if EXCLUDED_FIELDS.contains(&key.as_str()) {
            continue;
        }
        match key.as_str() {
            "id" => record.id = Some(value.clone()),
            "style" => record.style = value.as_str().map(str::to_string),
            "style_rating" => record.style_rating = value.as_f64(),
            _ => {
                record.extra.insert(key.clone(), value.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn candidate(value: serde_json::Value) -> RatingsCandidate {
        serde_json::from_value(value).unwrap()
    }

    fn scraped_record(name: &str) -> BeerRecord {
        BeerRecord::new(Some(name.into()), Some("6-12.0".into()), Some("9.99".into()))
    }

    #[test]
    fn merge_copies_fields_and_types_the_known_ones() {
        let mut record = scraped_record("Pliny the Elder");
        let candidate = candidate(json!({
            "name": "Pliny the Elder",
            "id": 4934,
            "style": "Imperial IPA",
            "style_rating": 100.0,
            "abv": 8.0,
            "overall_rating": 100,
        }));

        merge_candidate(&mut record, &candidate);

        assert_eq!(record.id, Some(json!(4934)));
        assert_eq!(record.style.as_deref(), Some("Imperial IPA"));
        assert_eq!(record.style_rating, Some(100.0));
        assert_eq!(record.extra["abv"], json!(8.0));
        assert_eq!(record.extra["overall_rating"], json!(100));
    }

    #[test]
    fn merge_never_copies_relational_fields() {
        let mut record = scraped_record("Pliny the Elder");
        let candidate = candidate(json!({
            "name": "Pliny the Elder",
            "id": 4934,
            "brewery": {"name": "Russian River"},
            "brewed_at": {"name": "Russian River"},
        }));

        merge_candidate(&mut record, &candidate);

        assert!(!record.extra.contains_key("brewery"));
        assert!(!record.extra.contains_key("brewed_at"));
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("brewery").is_none());
        assert!(json.get("brewed_at").is_none());
    }

    #[test]
    fn match_requires_exact_name() {
        let candidates = vec![
            candidate(json!({"name": "Pliny the Younger"})),
            candidate(json!({"name": "Pliny the Elder"})),
        ];
        let found = find_match("Pliny the Elder", &candidates).unwrap();
        assert_eq!(found.name, "Pliny the Elder");
        assert!(find_match("Pliny", &candidates).is_none());
    }

    #[test]
    fn aliased_candidates_are_skipped() {
        let candidates = vec![candidate(json!({
            "name": "Pliny the Elder",
            "aliased": true,
        }))];
        assert!(find_match("Pliny the Elder", &candidates).is_none());
    }

    #[test]
    fn already_enriched_records_are_not_searched_again() {
        let mut enriched = scraped_record("Old Rasputin");
        enriched.id = Some(json!(1018));
        let mut records = vec![enriched];

        enrich_all(&mut records, |name| -> Result<Vec<RatingsCandidate>> {
            panic!("unexpected search for {name}");
        })
        .unwrap();
    }

    #[test]
    fn partial_progress_is_on_disk_when_the_loop_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rated_beer.json");
        store::save_records(
            &[scraped_record("Old Rasputin"), scraped_record("Ten FIDY")],
            &path,
        )
        .unwrap();

        let err = enrich_file(&path, |name| match name {
            "Old Rasputin" => Ok(vec![candidate(json!({
                "name": "Old Rasputin",
                "id": 1018,
                "style": "Imperial Stout",
                "style_rating": 97.0,
            }))]),
            _ => anyhow::bail!("ratings service unavailable"),
        })
        .unwrap_err();
        assert!(err.to_string().contains("unavailable"), "loop error surfaces");

        let saved = store::load_records(&path).unwrap();
        assert_eq!(saved[0].id, Some(json!(1018)), "merged record was written");
        assert_eq!(saved[0].style_rating, Some(97.0));
        assert!(saved[1].id.is_none());
    }
}
