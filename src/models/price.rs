use serde::{Deserialize, Serialize};

/// One observation in the prices CSV. Field order is the column order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PriceRecord {
    pub timestamp: String,
    pub date: String,
    pub price_usd: String,
    pub source: String,
    pub url: String,
}

impl PriceRecord {
    pub const HEADER: [&'static str; 5] = ["timestamp", "date", "price_usd", "source", "url"];

    pub fn new(price: f64, source: &str, url: &str) -> Self {
        Self {
            timestamp: crate::utils::time::iso_timestamp(),
            date: crate::utils::time::today_ymd(),
            price_usd: format!("{price:.2}"),
            source: source.to_string(),
            url: url.to_string(),
        }
    }
}
