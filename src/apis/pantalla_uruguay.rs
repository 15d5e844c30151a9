use crate::apis::{http_client, scrape_price_table};
use crate::canon::Canonicalizer;
use crate::constants::PANTALLA_URUGUAY_SOURCE;
use crate::error::Result;
use crate::types::{PriceSource, SourceReport};
use tracing::{info, warn};

const URL: &str = "https://www.pantallauruguay.com.uy/promedios/";

/// Pantalla Uruguay's averages page, same column vocabulary as Plaza Rural
/// modulo abbreviations ("Prom.", "Máximo").
pub struct PantallaUruguayCrawler {
    client: reqwest::Client,
    canonicalizer: Canonicalizer,
}

impl PantallaUruguayCrawler {
    pub fn new(canonicalizer: Canonicalizer) -> Self {
        Self {
            client: http_client(),
            canonicalizer,
        }
    }
}

#[async_trait::async_trait]
impl PriceSource for PantallaUruguayCrawler {
    fn source_name(&self) -> &'static str {
        PANTALLA_URUGUAY_SOURCE
    }

    fn url(&self) -> &'static str {
        URL
    }

    async fn fetch_prices(&self) -> Result<SourceReport> {
        info!("Fetching averages from Pantalla Uruguay");
        let report = scrape_price_table(&self.client, URL, &self.canonicalizer).await?;
        info!(
            "Parsed {} categories from Pantalla Uruguay",
            report.categories.len()
        );
        if report.categories.is_empty() {
            warn!("No categories found - the page structure may have changed");
        }
        Ok(report)
    }
}
