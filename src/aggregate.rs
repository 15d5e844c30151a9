//! Merging per-source reports into the unified, ordered dataset.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};

use crate::canon::CANONICAL_ORDER;
use crate::error::ScraperError;
use crate::types::{SourceReport, SourceStatus, ValueRecord};

/// The run's final product: per-source status plus the category → source →
/// values matrix. `categories` is an explicitly ordered sequence, not a map:
/// the two-tier ordering is the externally visible contract.
#[derive(Debug)]
pub struct UnifiedDataset {
    pub last_updated_utc: DateTime<Utc>,
    pub sources: Vec<(String, SourceStatus)>,
    pub categories: Vec<(String, BTreeMap<String, ValueRecord>)>,
}

/// Merge all source outcomes. Successful and failed sources both get an
/// entry; categories are ordered canonical-taxonomy-first, then any
/// unexpected ones lexically.
pub fn build_unified(
    results: Vec<(String, Result<SourceReport, ScraperError>)>,
) -> UnifiedDataset {
    let mut sources = Vec::new();
    let mut by_category: BTreeMap<String, BTreeMap<String, ValueRecord>> = BTreeMap::new();

    for (name, result) in results {
        match result {
            Ok(report) => {
                for (category, record) in &report.categories {
                    by_category
                        .entry(category.clone())
                        .or_default()
                        .insert(name.clone(), record.clone());
                }
                sources.push((
                    name,
                    SourceStatus {
                        url: Some(report.url),
                        as_of: report.as_of,
                        error: None,
                    },
                ));
            }
            Err(e) => {
                sources.push((
                    name,
                    SourceStatus {
                        url: None,
                        as_of: None,
                        error: Some(e.to_string()),
                    },
                ));
            }
        }
    }

    UnifiedDataset {
        last_updated_utc: Utc::now(),
        sources,
        categories: order_categories(by_category),
    }
}

/// Canonical taxonomy order first (present categories only), then everything
/// else lexically.
fn order_categories(
    mut by_category: BTreeMap<String, BTreeMap<String, ValueRecord>>,
) -> Vec<(String, BTreeMap<String, ValueRecord>)> {
    let mut ordered = Vec::with_capacity(by_category.len());
    for canonical in CANONICAL_ORDER {
        if let Some(records) = by_category.remove(*canonical) {
            ordered.push(((*canonical).to_string(), records));
        }
    }
    // BTreeMap iteration is already lexical for the leftovers.
    let extras: BTreeSet<String> = by_category.keys().cloned().collect();
    for category in extras {
        if let Some(records) = by_category.remove(&category) {
            ordered.push((category, records));
        }
    }
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn report(categories: &[(&str, ValueRecord)]) -> SourceReport {
        SourceReport {
            url: "http://example.test".into(),
            as_of: None,
            categories: categories
                .iter()
                .map(|(c, r)| (c.to_string(), r.clone()))
                .collect(),
        }
    }

    fn avg(value: f64) -> ValueRecord {
        ValueRecord {
            prom: Some(value),
            ..Default::default()
        }
    }

    #[test]
    fn canonical_order_then_lexical_extras() {
        // Terneros and Ovejas are canonical (Terneros first); "Zafra
        // Especial" is not in the taxonomy and goes last.
        let results = vec![
            (
                "a".to_string(),
                Ok(report(&[("Terneros", avg(3.1)), ("Ovejas", avg(2.0))])),
            ),
            (
                "b".to_string(),
                Ok(report(&[("Ovejas", avg(2.1)), ("Zafra Especial", avg(9.9))])),
            ),
        ];
        let unified = build_unified(results);
        let order: Vec<&str> = unified.categories.iter().map(|(c, _)| c.as_str()).collect();
        assert_eq!(order, vec!["Terneros", "Ovejas", "Zafra Especial"]);

        let ovejas = &unified.categories[1].1;
        assert_eq!(ovejas["a"].prom, Some(2.0));
        assert_eq!(ovejas["b"].prom, Some(2.1));
    }

    #[test]
    fn failed_source_is_recorded_and_isolated() {
        let results = vec![
            ("ok".to_string(), Ok(report(&[("Terneros", avg(3.0))]))),
            (
                "down".to_string(),
                Err(ScraperError::NoUsableTable("http://down.test".into())),
            ),
        ];
        let unified = build_unified(results);

        assert_eq!(unified.sources.len(), 2);
        let (_, ok_status) = &unified.sources[0];
        assert!(ok_status.error.is_none());
        let (name, down_status) = &unified.sources[1];
        assert_eq!(name, "down");
        assert!(down_status.url.is_none());
        assert!(down_status.error.as_deref().unwrap().contains("no usable price table"));

        // The failing source contributes no categories but removes none.
        assert_eq!(unified.categories.len(), 1);
    }
}
