use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{info, warn};

use crate::apis::http_client;
use crate::canon::Canonicalizer;
use crate::constants::ACG_SOURCE;
use crate::error::Result;
use crate::extract::date::extract_as_of;
use crate::extract::numeric::parse_decimal;
use crate::types::{PriceSource, SourceReport, ValueRecord};

const URL: &str = "https://acg.com.uy/?post_type=precio_semanal";

/// The weekly reference cards name the class in a link and put the price
/// somewhere shortly after it; anchor on the class label and take the first
/// number that follows.
static REFERENCE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)(novillo|vaca|vaquillona)[^<]{0,80}</a>.*?([\d.,]+)").unwrap()
});

/// ACG publishes weekly reference prices per slaughter class rather than an
/// auction table, so this crawler scans the page text for labeled amounts.
/// Each value doubles as both the average and the reference: for this source
/// they are defined as the same number.
pub struct AcgCrawler {
    client: reqwest::Client,
    canonicalizer: Canonicalizer,
}

impl AcgCrawler {
    pub fn new(canonicalizer: Canonicalizer) -> Self {
        Self {
            client: http_client(),
            canonicalizer,
        }
    }

    fn reference_label(class: &str) -> Option<&'static str> {
        match class {
            "novillo" => Some("Novillo gordo"),
            "vaca" => Some("Vaca gorda"),
            "vaquillona" => Some("Vaquillona gorda"),
            _ => None,
        }
    }

    fn parse_references(&self, body: &str) -> BTreeMap<String, ValueRecord> {
        let mut categories = BTreeMap::new();
        for caps in REFERENCE_RE.captures_iter(body) {
            let class = caps[1].to_lowercase();
            let Some(label) = Self::reference_label(&class) else { continue };
            let Some(value) = parse_decimal(&caps[2]) else { continue };

            let category = self.canonicalizer.canonicalize(label);
            // First card wins; later matches are older weeks.
            categories.entry(category).or_insert(ValueRecord {
                prom: Some(value),
                reference: Some(value),
                ..Default::default()
            });
        }
        categories
    }
}

#[async_trait::async_trait]
impl PriceSource for AcgCrawler {
    fn source_name(&self) -> &'static str {
        ACG_SOURCE
    }

    fn url(&self) -> &'static str {
        URL
    }

    async fn fetch_prices(&self) -> Result<SourceReport> {
        info!("Fetching weekly reference prices from ACG");
        let body = self
            .client
            .get(URL)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let categories = self.parse_references(&body);
        info!("Parsed {} reference prices from ACG", categories.len());
        if categories.is_empty() {
            warn!("No reference prices found - the page structure may have changed");
        }

        Ok(SourceReport {
            url: URL.to_string(),
            as_of: extract_as_of(&body),
            categories,
        })
    }
}
