use crate::apis::{http_client, scrape_price_table};
use crate::canon::Canonicalizer;
use crate::constants::LOTE21_SOURCE;
use crate::error::Result;
use crate::types::{PriceSource, SourceReport};
use tracing::{info, warn};

const URL: &str = "https://www.lote21.uy/promedios.asp";

/// Lote 21 spells its headers out in full ("Promedio", "Máximo", "Mínimo")
/// and has shipped them mojibake-encoded more than once; the column resolver
/// absorbs both. No per-lot column on this site.
pub struct Lote21Crawler {
    client: reqwest::Client,
    canonicalizer: Canonicalizer,
}

impl Lote21Crawler {
    pub fn new(canonicalizer: Canonicalizer) -> Self {
        Self {
            client: http_client(),
            canonicalizer,
        }
    }
}

#[async_trait::async_trait]
impl PriceSource for Lote21Crawler {
    fn source_name(&self) -> &'static str {
        LOTE21_SOURCE
    }

    fn url(&self) -> &'static str {
        URL
    }

    async fn fetch_prices(&self) -> Result<SourceReport> {
        info!("Fetching averages from Lote 21");
        let report = scrape_price_table(&self.client, URL, &self.canonicalizer).await?;
        info!("Parsed {} categories from Lote 21", report.categories.len());
        if report.categories.is_empty() {
            warn!("No categories found - the page structure may have changed");
        }
        Ok(report)
    }
}
