use anyhow::{Result, bail};
use tracing::debug;

use crate::models::{BeerProduct, BeerRecord};

#[derive(Debug, Clone)]
pub struct ScoredProduct {
    pub product: BeerProduct,
    pub score: f64,
}

impl ScoredProduct {
    /// `name, quantity x ounces, $price` — the line the ranking prints.
    pub fn label(&self) -> String {
        format!(
            "{}, {} x {:.1}, ${:.2}",
            self.product.name,
            self.product.quantity,
            self.product.container_size_ounces,
            self.product.price,
        )
    }
}

/// Rank every rated product regardless of style.
pub fn best_values(records: &[BeerRecord]) -> Result<Vec<ScoredProduct>> {
    rank(select_products(records, None))
}

/// Rank the products of one style against each other.
pub fn style_values(records: &[BeerRecord], style: &str) -> Result<Vec<ScoredProduct>> {
    rank(select_products(records, Some(style)))
}

/// Keep products that have a style rating and a usable price, optionally
/// restricted to one style.
fn select_products(records: &[BeerRecord], style: Option<&str>) -> Vec<BeerProduct> {
    records
        .iter()
        .map(BeerProduct::from_record)
        .filter(|p| p.style_rating.is_some() && p.volume_per_price() > 0.0)
        .filter(|p| style.is_none_or(|s| p.style == s))
        .collect()
}

/// Ascending by composite z-score: z(volume/price) + z(style rating).
fn rank(products: Vec<BeerProduct>) -> Result<Vec<ScoredProduct>> {
    let volumes_per_price: Vec<f64> = products.iter().map(|p| p.volume_per_price()).collect();
    let ratings: Vec<f64> = products
        .iter()
        .map(|p| p.style_rating.unwrap_or_default())
        .collect();

    let (vpp_mean, vpp_stdev) = attribute_stats(&volumes_per_price)?;
    let (rating_mean, rating_stdev) = attribute_stats(&ratings)?;
    debug!(vpp_mean, vpp_stdev, rating_mean, rating_stdev, "group statistics");

    let mut scored: Vec<ScoredProduct> = products
        .into_iter()
        .zip(volumes_per_price)
        .zip(ratings)
        .map(|((product, vpp), rating)| ScoredProduct {
            score: z_score(vpp, vpp_mean, vpp_stdev)
                + z_score(rating, rating_mean, rating_stdev),
            product,
        })
        .collect();

    scored.sort_by(|a, b| a.score.total_cmp(&b.score));
    Ok(scored)
}

/// Mean and sample (Bessel-corrected) standard deviation. Groups too
/// small or too uniform to normalize are an error, not a NaN.
fn attribute_stats(values: &[f64]) -> Result<(f64, f64)> {
    if values.len() < 2 {
        bail!("need at least 2 rated products to rank, got {}", values.len());
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    let stdev = variance.sqrt();
    if stdev == 0.0 {
        bail!("all {} products have identical values, cannot rank", values.len());
    }
    Ok((mean, stdev))
}

fn z_score(value: f64, mean: f64, stdev: f64) -> f64 {
    (value - mean) / stdev
}
