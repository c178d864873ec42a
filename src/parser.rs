use scraper::{ElementRef, Html, Selector};
use anyhow::Result;
use url::Url;

use crate::models::BeerRecord;

/// One parsed catalog listing page: its product cards and, when present,
/// the absolute URL of the next page.
pub struct CatalogPage {
    pub products: Vec<BeerRecord>,
    pub next_page: Option<String>,
}

pub fn parse_catalog_page(html: &str, page_url: &str) -> Result<CatalogPage> {
    let doc = Html::parse_document(html);
    let card_selector = Selector::parse("div.plp-product-desc-wrap").unwrap();
    let name_selector = Selector::parse("a.analyticsProductName").unwrap();
    let size_selector = Selector::parse("div.plp-product-qty").unwrap();
    let price_selector = Selector::parse("span.price").unwrap();
    let next_selector = Selector::parse("a.plp-pagination-next").unwrap();

    let products = doc
        .select(&card_selector)
        .map(|card| {
            BeerRecord::new(
                select_text(&card, &name_selector),
                select_text(&card, &size_selector),
                select_text(&card, &price_selector).map(strip_currency),
            )
        })
        .collect();

    let base = Url::parse(page_url)?;
    let next_page = doc
        .select(&next_selector)
        .next()
        .and_then(|a| a.value().attr("href"))
        .and_then(|href| base.join(href).ok())
        .map(|u| u.to_string());

    Ok(CatalogPage { products, next_page })
}

fn select_text(card: &ElementRef, selector: &Selector) -> Option<String> {
    card.select(selector)
        .next()
        .map(|e| e.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty())
}

fn strip_currency(price: String) -> String {
    price.trim().trim_start_matches('$').to_string()
}
