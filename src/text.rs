//! Text helpers shared by header matching and category canonicalization.
//!
//! The source sites publish Spanish labels whose accents matter for matching
//! but not for meaning ("Categoría" vs "Categoria" vs "CATEGORÍA"). Folding
//! covers the Spanish repertoire only; mojibake sequences from mis-decoded
//! pages are handled separately by raw-fragment matching in the column
//! resolver.

/// Lower-case and strip Spanish diacritics.
pub fn fold(s: &str) -> String {
    s.chars()
        .flat_map(char::to_lowercase)
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ä' => 'a',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'í' | 'ì' | 'î' | 'ï' => 'i',
            'ó' | 'ò' | 'ô' | 'ö' => 'o',
            'ú' | 'ù' | 'û' | 'ü' => 'u',
            'ñ' => 'n',
            other => other,
        })
        .collect()
}

/// Normalization applied before alias lookup and rule matching: fold, then
/// collapse internal whitespace runs (including NBSP) to single spaces.
pub fn normalize_key(s: &str) -> String {
    fold(s)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
