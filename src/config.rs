use crate::error::{Result, ScraperError};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::info;

/// Curated alias overrides for category labels that the pattern rules get
/// wrong. Keys are raw labels as they appear on the source pages; values are
/// canonical category ids.
#[derive(Debug, Default, Deserialize)]
pub struct AliasConfig {
    #[serde(default)]
    pub aliases: HashMap<String, String>,
}

impl AliasConfig {
    /// Load aliases from a TOML file. A missing file is not an error: the
    /// canonicalizer simply runs without an alias tier.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            info!("no alias file at {}, continuing without overrides", path.display());
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|e| {
            ScraperError::Config(format!("Failed to read alias file '{}': {}", path.display(), e))
        })?;
        let config: AliasConfig = toml::from_str(&content).map_err(|e| {
            ScraperError::Config(format!("Failed to parse alias file '{}': {}", path.display(), e))
        })?;
        info!("loaded {} category aliases from {}", config.aliases.len(), path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_yields_empty_alias_set() {
        let config = AliasConfig::load("does/not/exist.toml").unwrap();
        assert!(config.aliases.is_empty());
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("aliases.toml");
        std::fs::write(&path, "[aliases\nbroken").unwrap();

        let err = AliasConfig::load(&path).unwrap_err();
        assert!(matches!(err, crate::error::ScraperError::Config(_)));
    }

    #[test]
    fn parses_alias_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("aliases.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[aliases]").unwrap();
        writeln!(file, "\"nov. holando\" = \"Holando\"").unwrap();
        drop(file);

        let config = AliasConfig::load(&path).unwrap();
        assert_eq!(config.aliases.get("nov. holando").map(String::as_str), Some("Holando"));
    }
}
