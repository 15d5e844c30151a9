/// Source name constants to ensure consistency across the codebase.
/// These are the keys used in the CLI, in logs and in the `fuentes` section
/// of the unified output.

pub const PLAZA_RURAL_SOURCE: &str = "plaza_rural";
pub const LOTE21_SOURCE: &str = "lote21";
pub const PANTALLA_URUGUAY_SOURCE: &str = "pantalla_uruguay";
pub const ACG_SOURCE: &str = "acg";

/// Default output file for the unified dataset.
pub const DEFAULT_OUTPUT_FILE: &str = "unified.json";

/// Optional alias-override file read at startup.
pub const ALIAS_FILE: &str = "aliases.toml";

/// Pause between source fetches. Politeness policy, not an engine concern.
pub const INTER_SOURCE_DELAY_MS: u64 = 1500;

/// Get all supported source names, in the order they are scraped.
pub fn get_supported_sources() -> Vec<&'static str> {
    vec![
        PLAZA_RURAL_SOURCE,
        LOTE21_SOURCE,
        PANTALLA_URUGUAY_SOURCE,
        ACG_SOURCE,
    ]
}
