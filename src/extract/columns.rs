//! Header-to-role resolution.
//!
//! Each source names its columns differently ("Prom", "Promedio",
//! "Promedios", "Máx" …), sometimes with the accents mangled by a mismatched
//! encoding ("CategorÃ­a"). Roles are resolved by fragment containment over
//! folded header text, with an extra raw-text tier for the mojibake forms.

use std::collections::HashMap;

use crate::text::fold;

/// Semantic meaning of a table column, independent of its literal header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnRole {
    Category,
    Average,
    Max,
    Min,
    AveragePerLot,
}

/// Acceptable name fragments per role. `fragments` are matched against the
/// folded header; `raw_fragments` are matched against the raw header text and
/// carry the common UTF-8-decoded-as-Latin-1 corruptions.
struct HeaderCandidates {
    role: ColumnRole,
    fragments: &'static [&'static str],
    raw_fragments: &'static [&'static str],
}

/// Resolution order matters: AveragePerLot must claim its header before
/// Average, whose "prom" fragment is contained in "prom. bulto".
const CANDIDATES: &[HeaderCandidates] = &[
    HeaderCandidates {
        role: ColumnRole::Category,
        fragments: &["categoria", "cat."],
        raw_fragments: &["CategorÃ­a", "categorÃ­a"],
    },
    HeaderCandidates {
        role: ColumnRole::AveragePerLot,
        fragments: &["prom. bulto", "prom bulto", "bulto"],
        raw_fragments: &[],
    },
    HeaderCandidates {
        role: ColumnRole::Average,
        fragments: &["promedio", "prom"],
        raw_fragments: &[],
    },
    HeaderCandidates {
        role: ColumnRole::Max,
        fragments: &["maximo", "max"],
        raw_fragments: &["MÃ¡ximo", "mÃ¡ximo", "mÃ¡x"],
    },
    HeaderCandidates {
        role: ColumnRole::Min,
        fragments: &["minimo", "min"],
        raw_fragments: &["MÃ­nimo", "mÃ­nimo", "mÃ­n"],
    },
];

/// Role → column index for one table. A header is claimed by at most one role.
#[derive(Debug, Default)]
pub struct ColumnRoleMap {
    map: HashMap<ColumnRole, usize>,
}

impl ColumnRoleMap {
    pub fn get(&self, role: ColumnRole) -> Option<usize> {
        self.map.get(&role).copied()
    }

    /// Neither a category nor an average column was found by name. Resolving
    /// positionally against an arbitrary table would misread it, so callers
    /// gate the fallback on this.
    pub fn needs_positional_fallback(&self) -> bool {
        self.get(ColumnRole::Category).is_none() && self.get(ColumnRole::Average).is_none()
    }

    /// Assume the conventional first-four-columns layout:
    /// category / average / max / min.
    pub fn apply_positional_fallback(&mut self, header_count: usize) {
        const POSITIONAL: [ColumnRole; 4] = [
            ColumnRole::Category,
            ColumnRole::Average,
            ColumnRole::Max,
            ColumnRole::Min,
        ];
        self.map.clear();
        for (idx, role) in POSITIONAL.into_iter().enumerate().take(header_count) {
            self.map.insert(role, idx);
        }
    }
}

/// Does this header match the role's candidate set? Shared with the table
/// selector's scoring.
pub(crate) fn header_matches(header: &str, role: ColumnRole) -> bool {
    let candidates = CANDIDATES
        .iter()
        .find(|c| c.role == role)
        .expect("every role has a candidate set");
    let folded = fold(header);
    candidates.fragments.iter().any(|f| folded.contains(f))
        || candidates.raw_fragments.iter().any(|f| header.contains(f))
}

/// Resolve each role to the first header containing one of its fragments,
/// trying fragments in priority order and headers in document order.
/// Unmatched roles are simply absent from the returned map.
pub fn resolve_roles(headers: &[String]) -> ColumnRoleMap {
    let mut map = HashMap::new();
    let mut claimed = vec![false; headers.len()];

    for candidates in CANDIDATES {
        'fragments: for fragment in candidates.fragments {
            for (idx, header) in headers.iter().enumerate() {
                if claimed[idx] {
                    continue;
                }
                if fold(header).contains(fragment) {
                    claimed[idx] = true;
                    map.insert(candidates.role, idx);
                    break 'fragments;
                }
            }
        }
        if map.contains_key(&candidates.role) {
            continue;
        }
        'raw: for fragment in candidates.raw_fragments {
            for (idx, header) in headers.iter().enumerate() {
                if claimed[idx] {
                    continue;
                }
                if header.contains(fragment) {
                    claimed[idx] = true;
                    map.insert(candidates.role, idx);
                    break 'raw;
                }
            }
        }
    }

    ColumnRoleMap { map }
}
