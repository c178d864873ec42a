use std::collections::HashSet;
use std::path::Path;

use anyhow::Result;
use tracing::{info, warn};

use crate::fetcher;
use crate::models::BeerRecord;
use crate::parser;
use crate::store;

const START_URL: &str = "http://www.totalwine.com/beer/c/c0010";

/// Crawl the catalog listing page by page and overwrite the record file
/// with what was found. Prior enrichment is discarded; re-running the
/// ratings pass restores it.
pub fn update_pricing(path: &Path) -> Result<()> {
    let client = fetcher::build_client()?;
    let records = crawl(START_URL, |url| {
        let html = fetcher::fetch_html(&client, url)?;
        fetcher::throttle();
        Ok(html)
    })?;
    store::save_records(&records, path)?;
    Ok(())
}

/// Follow next-page links until the catalog is exhausted. A next link
/// that points back to an already-crawled URL ends the crawl instead of
/// looping on it.
fn crawl(
    start_url: &str,
    mut fetch_page: impl FnMut(&str) -> Result<String>,
) -> Result<Vec<BeerRecord>> {
    let mut visited: HashSet<String> = HashSet::new();
    let mut records = Vec::new();
    let mut url = start_url.to_string();
    let mut pages = 0u32;

    loop {
        visited.insert(url.clone());
        pages += 1;
        info!(page = pages, url = %url, "fetching catalog page");
        let html = fetch_page(&url)?;
        let page = parser::parse_catalog_page(&html, &url)?;
        info!(page = pages, products = page.products.len(), "parsed listing");
        records.extend(page.products);

        match page.next_page {
            Some(next) if visited.contains(&next) => {
                warn!(url = %next, "next link points at a crawled page, stopping");
                break;
            }
            Some(next) => url = next,
            None => break,
        }
    }

    info!(pages, products = records.len(), "catalog crawl complete");
    Ok(records)
}
