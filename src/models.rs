use serde::{Serialize, Deserialize};
use serde_json::{Map, Value};

use crate::size;

/// One entry of the rated-beer JSON file.
///
/// The known fields come from the catalog crawl; everything the ratings
/// lookup adds beyond them lands in `extra` and round-trips verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BeerRecord {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
    /// Scraped as text with the currency symbol stripped; the ratings
    /// service may report it as a number, so both shapes are accepted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style_rating: Option<f64>,
    /// Ratings-service identifier. Present means already enriched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scraped_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BeerRecord {
    pub fn new(name: Option<String>, size: Option<String>, price: Option<String>) -> Self {
        BeerRecord {
            name,
            size,
            price: price.map(Value::String),
            style: None,
            style_rating: None,
            id: None,
            scraped_at: Some(chrono::Utc::now().to_rfc3339()),
            extra: Map::new(),
        }
    }

    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("Unknown")
    }
}

/// Parsed, scorer-facing view of a record.
#[derive(Debug, Clone)]
pub struct BeerProduct {
    pub name: String,
    pub quantity: u32,
    pub container_size_ounces: f64,
    pub price: f64,
    pub style: String,
    pub style_rating: Option<f64>,
}

impl BeerProduct {
    pub fn from_record(record: &BeerRecord) -> Self {
        let parsed = size::parse_size(record.size.as_deref().unwrap_or("0-0"));
        BeerProduct {
            name: record.name().to_string(),
            quantity: parsed.quantity,
            container_size_ounces: parsed.container_ounces,
            price: record.price.as_ref().map(parse_price).unwrap_or(0.0),
            style: record.style.clone().unwrap_or_else(|| "Unknown".into()),
            style_rating: record.style_rating,
        }
    }

    pub fn total_volume_ounces(&self) -> f64 {
        f64::from(self.quantity) * self.container_size_ounces
    }

    /// Price-efficiency proxy. Zero price or zero volume yields the 0.0
    /// sentinel rather than an error.
    pub fn volume_per_price(&self) -> f64 {
        let total = self.total_volume_ounces();
        if total > 0.0 && self.price > 0.0 {
            total / self.price
        } else {
            0.0
        }
    }
}

fn parse_price(price: &Value) -> f64 {
    match price {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s
            .trim()
            .trim_start_matches('$')
            .parse::<f64>()
            .unwrap_or(0.0),
        _ => 0.0,
    }
}
