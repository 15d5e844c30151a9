//! One crawler per market-price source. The three auction sites publish
//! tabular averages and share the extraction path; ACG publishes weekly
//! reference prices as free text and gets its own parser.

pub mod acg;
pub mod lote21;
pub mod pantalla_uruguay;
pub mod plaza_rural;

use std::time::Duration;

use scraper::Html;
use tracing::info;

use crate::canon::Canonicalizer;
use crate::error::Result;
use crate::extract::date::extract_as_of;
use crate::extract::table::select_price_table;
use crate::extract::table_to_records;
use crate::types::SourceReport;

/// HTTP client shared in shape by all crawlers: browser User-Agent (some of
/// the sites reject the default one) and a 60 s timeout.
pub(crate) fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent("Mozilla/5.0")
        .timeout(Duration::from_secs(60))
        .build()
        .expect("reqwest client construction")
}

/// Fetch a tabular source and run it through the extraction engine:
/// table selection, column resolution, per-row canonicalization and numeric
/// parsing, plus the best-effort as-of date.
pub(crate) async fn scrape_price_table(
    client: &reqwest::Client,
    url: &str,
    canonicalizer: &Canonicalizer,
) -> Result<SourceReport> {
    let body = client.get(url).send().await?.error_for_status()?.text().await?;

    let (categories, as_of) = {
        // Html is not Send; keep it off the await points.
        let document = Html::parse_document(&body);
        let table = select_price_table(&document, url)?;
        info!(rows = table.rows.len(), "selected price table");
        let categories = table_to_records(&table, canonicalizer);
        (categories, extract_as_of(&body))
    };

    Ok(SourceReport {
        url: url.to_string(),
        as_of,
        categories,
    })
}
