//! Product records returned by the two search paths.

use serde::{Deserialize, Serialize};

/// A product scraped from a third-party retail site.
///
/// Every adapter normalizes into this shape regardless of per-site markup.
/// `price` stays as display text because source sites format currency
/// inconsistently ("Rs 240", "Rs. 1,099", ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapedProduct {
    pub name: String,
    pub price: String,
    /// Product page URL. May be empty or site-relative.
    pub link: String,
    /// Thumbnail URL. May be empty.
    pub image: String,
    /// Which site produced this item, e.g. "Naheed".
    pub source: String,
}

/// A marketplace product row joined with its store's metadata.
///
/// The database query returns these as one flat record so the response
/// envelope has stable field names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductHit {
    pub product_id: i32,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub stock: i32,
    pub category: String,
    pub image: String,
    pub store: String,
    pub address: String,
    pub contact: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub maps_url: Option<String>,
    /// Always "database"; mirrors the `source` field on scraped items.
    pub source: String,
}
