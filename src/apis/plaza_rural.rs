use crate::apis::{http_client, scrape_price_table};
use crate::canon::Canonicalizer;
use crate::constants::PLAZA_RURAL_SOURCE;
use crate::error::Result;
use crate::types::{PriceSource, SourceReport};
use tracing::{info, warn};

const URL: &str = "https://plazarural.com.uy/promedios";

/// Plaza Rural publishes post-auction averages with per-lot averages
/// ("Prom. Bulto") alongside the usual average/max/min columns.
pub struct PlazaRuralCrawler {
    client: reqwest::Client,
    canonicalizer: Canonicalizer,
}

impl PlazaRuralCrawler {
    pub fn new(canonicalizer: Canonicalizer) -> Self {
        Self {
            client: http_client(),
            canonicalizer,
        }
    }
}

#[async_trait::async_trait]
impl PriceSource for PlazaRuralCrawler {
    fn source_name(&self) -> &'static str {
        PLAZA_RURAL_SOURCE
    }

    fn url(&self) -> &'static str {
        URL
    }

    async fn fetch_prices(&self) -> Result<SourceReport> {
        info!("Fetching averages from Plaza Rural");
        let report = scrape_price_table(&self.client, URL, &self.canonicalizer).await?;
        info!("Parsed {} categories from Plaza Rural", report.categories.len());
        if report.categories.is_empty() {
            warn!("No categories found - the page structure may have changed");
        }
        Ok(report)
    }
}
