//! Category canonicalization.
//!
//! Every source spells livestock categories its own way: "NOVILLOS 1 A 2
//! AÑOS", "Novillo 1-2 años" and "novillos 1 a 2 anos" are all the same
//! market category. Canonicalization runs three tiers in order:
//!
//! 1. an exact alias lookup on the normalized label (curated overrides,
//!    loaded from `aliases.toml`),
//! 2. family-grouped pattern rules, evaluated strictly in sequence with
//!    first-match-wins,
//! 3. a title-cased fallback, so every label yields some deterministic id
//!    and unmapped ones stay visually distinguishable for curation.
//!
//! Rule order is part of the contract: within a family the specific weight
//! and age bands come before the family's general fallback, and families
//! without a catch-all (steers, heifers) deliberately let "Novillo gordo" /
//! "Vaquillona gorda" fall through to the ACG family at the end.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::config::AliasConfig;
use crate::text::normalize_key;

/// The canonical taxonomy, in presentation order. This order defines the
/// first tier of the unified output's category ordering.
pub const CANONICAL_ORDER: &[&str] = &[
    "Terneros hasta 140kg",
    "Terneros entre 140 y 180kg",
    "Terneros más de 180kg",
    "Terneros",
    "Terneras",
    "Terneros y terneras",
    "Holando",
    "Novillos 1-2 años",
    "Novillos 2-3 años",
    "Novillos más de 3 años",
    "Vaquillonas 1-2 años",
    "Vaquillonas más de 2 años",
    "Vaquillonas sin servicio",
    "Vaquillonas preñadas",
    "Vacas preñadas",
    "Vacas de invernada",
    "Piezas de cría",
    "Corderos",
    "Borregos",
    "Capones",
    "Ovejas",
    "Novillo gordo (ACG)",
    "Vaca gorda (ACG)",
    "Vaquillona gorda (ACG)",
];

/// An ordered block of (pattern, canonical id) rules for one livestock
/// family. Patterns match against the normalized label.
struct FamilyRules {
    family: &'static str,
    rules: Vec<(Regex, &'static str)>,
}

fn rule(pattern: &str, target: &'static str) -> (Regex, &'static str) {
    (Regex::new(pattern).expect("static rule pattern"), target)
}

/// Family evaluation order is fixed; first match anywhere wins.
static FAMILY_RULES: Lazy<Vec<FamilyRules>> = Lazy::new(|| {
    vec![
        FamilyRules {
            family: "lanares",
            rules: vec![
                rule(r"^corderos?\b", "Corderos"),
                rule(r"^borregos?\b", "Borregos"),
                rule(r"^capones?\b", "Capones"),
                rule(r"^ovejas?\b", "Ovejas"),
            ],
        },
        FamilyRules {
            family: "terneros",
            rules: vec![
                rule(r"^terneros?(/as)? hasta 140", "Terneros hasta 140kg"),
                rule(
                    r"^terneros?(/as)? (?:entre )?140\s*(?:y|a|-)\s*180",
                    "Terneros entre 140 y 180kg",
                ),
                rule(r"^terneros?(/as)? (?:de )?mas de 180", "Terneros más de 180kg"),
                rule(r"^terneros?(/as)? holando\b", "Holando"),
                rule(r"^terneros? y terneras\b", "Terneros y terneras"),
                rule(r"^terneras\b", "Terneras"),
                rule(r"^terneros?(/as)?\b", "Terneros"),
            ],
        },
        FamilyRules {
            family: "novillos",
            // No bare catch-all: "novillo gordo" must reach the ACG family.
            rules: vec![
                rule(r"^novillos? 1\s*(?:a|-)\s*2\b", "Novillos 1-2 años"),
                rule(r"^novillos? 2\s*(?:a|-)\s*3\b", "Novillos 2-3 años"),
                rule(r"^novillos? (?:de )?mas de 3\b", "Novillos más de 3 años"),
            ],
        },
        FamilyRules {
            family: "razas",
            rules: vec![rule(r"\bholando\b", "Holando")],
        },
        FamilyRules {
            family: "vaquillonas",
            rules: vec![
                rule(r"^vaquillonas? 1\s*(?:a|-)\s*2\b", "Vaquillonas 1-2 años"),
                rule(r"^vaquillonas? (?:de )?mas de 2\b", "Vaquillonas más de 2 años"),
                rule(r"^vaquillonas? sin servicio\b", "Vaquillonas sin servicio"),
            ],
        },
        FamilyRules {
            family: "cria",
            rules: vec![
                rule(r"^vaquillonas? prenadas?\b", "Vaquillonas preñadas"),
                rule(r"^vacas? prenadas?\b", "Vacas preñadas"),
                rule(r"^vacas? de invernada\b", "Vacas de invernada"),
                rule(r"^piezas? de cria\b", "Piezas de cría"),
            ],
        },
        FamilyRules {
            family: "gordo_acg",
            rules: vec![
                rule(r"^novillos? gordos?\b", "Novillo gordo (ACG)"),
                rule(r"^vacas? gordas?\b", "Vaca gorda (ACG)"),
                rule(r"^vaquillonas? gordas?\b", "Vaquillona gorda (ACG)"),
            ],
        },
    ]
});

/// Maps raw category labels onto the canonical taxonomy. Holds the alias
/// overrides loaded at startup; the pattern rules are static. Constructed
/// once and shared by every source adapter.
#[derive(Debug, Clone, Default)]
pub struct Canonicalizer {
    aliases: HashMap<String, String>,
}

impl Canonicalizer {
    /// Alias keys are normalized the same way lookups are, so the file can
    /// spell them with or without accents and in any case.
    pub fn new(config: &AliasConfig) -> Self {
        let aliases = config
            .aliases
            .iter()
            .map(|(raw, target)| (normalize_key(raw), target.clone()))
            .collect();
        Self { aliases }
    }

    /// Map a raw label to exactly one canonical id. Total: every non-blank
    /// input yields a non-empty id; a blank input yields the empty string,
    /// which callers treat as "no category, discard the row".
    pub fn canonicalize(&self, raw: &str) -> String {
        let key = normalize_key(raw);
        if key.is_empty() {
            return String::new();
        }

        if let Some(target) = self.aliases.get(&key) {
            return target.clone();
        }

        for family in FAMILY_RULES.iter() {
            for (pattern, target) in &family.rules {
                if pattern.is_match(&key) {
                    debug!(family = family.family, rule = *target, "rule matched");
                    return (*target).to_string();
                }
            }
        }

        debug!(label = raw, "no alias or rule matched, using title-cased fallback");
        title_case_fallback(&key)
    }
}

/// Deterministic fallback for unmapped labels: strip surrounding separator
/// runs and capitalize each word.
fn title_case_fallback(key: &str) -> String {
    key.trim_matches(|c: char| c == '-' || c == '—' || c.is_whitespace())
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canon() -> Canonicalizer {
        Canonicalizer::new(&AliasConfig::default())
    }

    #[test]
    fn same_category_across_source_spellings() {
        let c = canon();
        assert_eq!(c.canonicalize("NOVILLOS 1 A 2 AÑOS"), "Novillos 1-2 años");
        assert_eq!(c.canonicalize("Novillo 1-2 años"), "Novillos 1-2 años");
        assert_eq!(c.canonicalize("novillos 1 a 2 anos"), "Novillos 1-2 años");
    }

    #[test]
    fn weight_band_beats_general_calf_rule() {
        let c = canon();
        assert_eq!(
            c.canonicalize("Terneros entre 140 y 180 Kg."),
            "Terneros entre 140 y 180kg"
        );
        assert_eq!(c.canonicalize("Terneros hasta 140 kg"), "Terneros hasta 140kg");
        assert_eq!(c.canonicalize("Terneros/as"), "Terneros");
        assert_eq!(c.canonicalize("Terneras"), "Terneras");
    }

    #[test]
    fn gorda_labels_fall_through_to_acg_family() {
        let c = canon();
        assert_eq!(c.canonicalize("Novillo gordo"), "Novillo gordo (ACG)");
        assert_eq!(c.canonicalize("VACA GORDA"), "Vaca gorda (ACG)");
        assert_eq!(c.canonicalize("Vaquillona gorda especial"), "Vaquillona gorda (ACG)");
    }

    #[test]
    fn cria_and_invernada_categories() {
        let c = canon();
        assert_eq!(c.canonicalize("Vacas de Invernada"), "Vacas de invernada");
        assert_eq!(c.canonicalize("vacas preñadas"), "Vacas preñadas");
        assert_eq!(c.canonicalize("Piezas de cría"), "Piezas de cría");
    }

    #[test]
    fn aliases_override_rules_regardless_of_case() {
        let mut config = AliasConfig::default();
        config
            .aliases
            .insert("terneros especiales".into(), "Terneros".into());
        config
            .aliases
            .insert("Novillitos É".into(), "Novillos 1-2 años".into());
        let c = Canonicalizer::new(&config);
        assert_eq!(c.canonicalize("TERNEROS   Especiales"), "Terneros");
        assert_eq!(c.canonicalize("novillitos é"), "Novillos 1-2 años");
    }

    #[test]
    fn fallback_is_title_cased_and_total() {
        let c = canon();
        assert_eq!(c.canonicalize("burros viejos"), "Burros Viejos");
        assert_eq!(c.canonicalize("— lanares varios —"), "Lanares Varios");
        assert!(!c.canonicalize("categoría inventada").is_empty());
    }

    #[test]
    fn blank_input_yields_empty_id() {
        let c = canon();
        assert_eq!(c.canonicalize(""), "");
        assert_eq!(c.canonicalize("   "), "");
    }
}
