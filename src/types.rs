use crate::error::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Values one source reported for one canonical category. Every field is
/// independently optional: a source reporting only an average is valid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValueRecord {
    /// Average price for the category.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prom: Option<f64>,
    /// Highest price observed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    /// Lowest price observed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    /// Average per lot, where the source publishes it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prom_bulto: Option<f64>,
    /// Weekly reference value (ACG). Serialized as "ref"; reserved word in Rust.
    #[serde(rename = "ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<f64>,
}

impl ValueRecord {
    /// True when no field carries a number. Rows like this are discarded.
    pub fn is_empty(&self) -> bool {
        self.prom.is_none()
            && self.max.is_none()
            && self.min.is_none()
            && self.prom_bulto.is_none()
            && self.reference.is_none()
    }
}

/// Successful scrape of one source: the url used, the page's own "as of"
/// date when one could be found, and the per-category values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceReport {
    pub url: String,
    pub as_of: Option<NaiveDate>,
    pub categories: BTreeMap<String, ValueRecord>,
}

/// Per-source entry in the unified output: url and as-of date on success,
/// an error description on failure. Never both.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceStatus {
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub as_of: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Core trait every market-price source must implement.
#[async_trait::async_trait]
pub trait PriceSource: Send + Sync {
    /// Unique identifier for this source.
    fn source_name(&self) -> &'static str;

    /// The page this source scrapes.
    fn url(&self) -> &'static str;

    /// Fetch the page and extract per-category values.
    async fn fetch_prices(&self) -> Result<SourceReport>;
}
