use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{error, info, warn};

use hacienda_scraper::aggregate::build_unified;
use hacienda_scraper::apis::acg::AcgCrawler;
use hacienda_scraper::apis::lote21::Lote21Crawler;
use hacienda_scraper::apis::pantalla_uruguay::PantallaUruguayCrawler;
use hacienda_scraper::apis::plaza_rural::PlazaRuralCrawler;
use hacienda_scraper::canon::Canonicalizer;
use hacienda_scraper::config::AliasConfig;
use hacienda_scraper::constants;
use hacienda_scraper::error::{Result, ScraperError};
use hacienda_scraper::logging;
use hacienda_scraper::output::write_unified;
use hacienda_scraper::types::{PriceSource, SourceReport};

#[derive(Parser)]
#[command(name = "hacienda_scraper")]
#[command(about = "Unified Uruguayan livestock market price scraper")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape the sources and write the unified dataset
    Run {
        /// Specific sources to run (comma-separated). Default: all of them
        #[arg(long)]
        sources: Option<String>,
        /// Output file
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// List supported source names
    ListSources,
}

fn create_source(name: &str, canonicalizer: &Canonicalizer) -> Option<Box<dyn PriceSource>> {
    match name {
        constants::PLAZA_RURAL_SOURCE => {
            Some(Box::new(PlazaRuralCrawler::new(canonicalizer.clone())))
        }
        constants::LOTE21_SOURCE => Some(Box::new(Lote21Crawler::new(canonicalizer.clone()))),
        constants::PANTALLA_URUGUAY_SOURCE => {
            Some(Box::new(PantallaUruguayCrawler::new(canonicalizer.clone())))
        }
        constants::ACG_SOURCE => Some(Box::new(AcgCrawler::new(canonicalizer.clone()))),
        _ => None,
    }
}

/// Scrape the given sources one at a time. One source failing never stops
/// the others; every source ends up with an entry, success or error.
async fn run_sources(
    source_names: &[String],
    canonicalizer: &Canonicalizer,
) -> Vec<(String, Result<SourceReport>)> {
    let mut results = Vec::new();
    for (i, name) in source_names.iter().enumerate() {
        let span = tracing::info_span!("Running source", source = %name);
        let _enter = span.enter();

        let Some(source) = create_source(name, canonicalizer) else {
            warn!("Unknown source specified");
            println!("⚠️  Unknown source: {}", name);
            continue;
        };

        // Politeness pause between sites, not before the first one.
        if i > 0 {
            tokio::time::sleep(Duration::from_millis(constants::INTER_SOURCE_DELAY_MS)).await;
        }

        info!(url = source.url(), "Starting scrape");
        let result = source.fetch_prices().await;
        match &result {
            Ok(report) => {
                info!(categories = report.categories.len(), "Scrape finished");
                println!(
                    "   ✅ {}: {} categories{}",
                    source.source_name(),
                    report.categories.len(),
                    report
                        .as_of
                        .map(|d| format!(" (as of {})", d))
                        .unwrap_or_default()
                );
            }
            Err(e) => {
                error!("Scrape failed: {}", e);
                println!("   ❌ {}: {}", source.source_name(), e);
            }
        }
        results.push((source.source_name().to_string(), result));
    }
    results
}

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    logging::init_logging();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { sources, out } => {
            let source_names: Vec<String> = match sources {
                Some(list) => list.split(',').map(|s| s.trim().to_string()).collect(),
                None => constants::get_supported_sources()
                    .into_iter()
                    .map(String::from)
                    .collect(),
            };
            let out = out.unwrap_or_else(|| PathBuf::from(constants::DEFAULT_OUTPUT_FILE));

            let aliases = match AliasConfig::load(constants::ALIAS_FILE) {
                Ok(config) => config,
                Err(ScraperError::Config(msg)) => {
                    warn!("{}", msg);
                    AliasConfig::default()
                }
                Err(e) => return Err(e.into()),
            };
            let canonicalizer = Canonicalizer::new(&aliases);

            println!("📥 Scraping {} sources...", source_names.len());
            let results = run_sources(&source_names, &canonicalizer).await;

            let unified = build_unified(results);
            let category_count = unified.categories.len();
            write_unified(&unified, &out)?;
            println!(
                "📊 Wrote {} with {} categories",
                out.display(),
                category_count
            );
        }
        Commands::ListSources => {
            for name in constants::get_supported_sources() {
                println!("{}", name);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_supported_source_is_constructible_and_self_describing() {
        let canonicalizer = Canonicalizer::new(&AliasConfig::default());
        for name in constants::get_supported_sources() {
            let source = create_source(name, &canonicalizer)
                .unwrap_or_else(|| panic!("no crawler for {}", name));
            assert_eq!(source.source_name(), name);
            assert!(source.url().starts_with("https://"));
        }
    }

    #[test]
    fn unknown_source_names_are_rejected() {
        let canonicalizer = Canonicalizer::new(&AliasConfig::default());
        assert!(create_source("mercado_inventado", &canonicalizer).is_none());
    }
}
