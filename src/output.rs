//! Serialization of the unified dataset to `unified.json`.
//!
//! `serde_json` is built with `preserve_order`, so maps serialize in
//! insertion order and the aggregator's category ordering survives into the
//! file byte-for-byte.

use std::fs;
use std::path::Path;

use serde_json::{Map, Value};

use crate::aggregate::UnifiedDataset;
use crate::error::Result;

/// Output keys follow the original publication format: `fuentes` for the
/// per-source statuses, `categorias` for the merged matrix.
pub fn to_json(dataset: &UnifiedDataset) -> Result<Value> {
    let mut root = Map::new();
    root.insert(
        "last_updated_utc".into(),
        Value::String(dataset.last_updated_utc.format("%Y-%m-%dT%H:%M:%SZ").to_string()),
    );

    let mut fuentes = Map::new();
    for (name, status) in &dataset.sources {
        fuentes.insert(name.clone(), serde_json::to_value(status)?);
    }
    root.insert("fuentes".into(), Value::Object(fuentes));

    let mut categorias = Map::new();
    for (category, per_source) in &dataset.categories {
        let mut entry = Map::new();
        for (source, record) in per_source {
            entry.insert(source.clone(), serde_json::to_value(record)?);
        }
        categorias.insert(category.clone(), Value::Object(entry));
    }
    root.insert("categorias".into(), Value::Object(categorias));

    Ok(Value::Object(root))
}

/// Write the dataset as pretty-printed JSON.
pub fn write_unified(dataset: &UnifiedDataset, path: impl AsRef<Path>) -> Result<()> {
    let json = to_json(dataset)?;
    fs::write(path, serde_json::to_string_pretty(&json)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{SourceStatus, ValueRecord};
    use chrono::TimeZone;
    use std::collections::BTreeMap;

    fn sample() -> UnifiedDataset {
        let mut per_source = BTreeMap::new();
        per_source.insert(
            "plaza_rural".to_string(),
            ValueRecord {
                prom: Some(3.1),
                max: Some(3.4),
                ..Default::default()
            },
        );
        UnifiedDataset {
            last_updated_utc: chrono::Utc.with_ymd_and_hms(2025, 8, 12, 10, 0, 0).unwrap(),
            sources: vec![(
                "plaza_rural".to_string(),
                SourceStatus {
                    url: Some("https://plazarural.com.uy/promedios".into()),
                    as_of: None,
                    error: None,
                },
            )],
            categories: vec![("Terneros".to_string(), per_source)],
        }
    }

    #[test]
    fn timestamp_is_utc_iso_format() {
        let json = to_json(&sample()).unwrap();
        assert_eq!(json["last_updated_utc"], "2025-08-12T10:00:00Z");
    }

    #[test]
    fn absent_fields_are_omitted() {
        let json = to_json(&sample()).unwrap();
        let record = &json["categorias"]["Terneros"]["plaza_rural"];
        assert_eq!(record["prom"], 3.1);
        assert!(record.get("min").is_none());
        assert!(record.get("ref").is_none());
    }

    #[test]
    fn writes_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("unified.json");
        write_unified(&sample(), &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert!(parsed["fuentes"]["plaza_rural"]["url"]
            .as_str()
            .unwrap()
            .contains("plazarural"));
    }
}
