//! Table extraction and candidate selection.
//!
//! Price pages usually carry several `<table>` elements (navigation, layout,
//! the actual data). Rather than hardcoding per-site selectors that break on
//! every redesign, every table is scored on structural signal: price-like
//! headers plus numeric cell density.

use scraper::{Html, Selector};
use tracing::debug;

use crate::error::{Result, ScraperError};
use crate::extract::columns::{header_matches, ColumnRole};

/// Score contribution of a category-like or average-like header.
pub const STRONG_HEADER_WEIGHT: f64 = 2.0;
/// Score contribution of a max-like or min-like header.
pub const WEAK_HEADER_WEIGHT: f64 = 1.0;
/// Per-cell bonus for cells containing at least one digit.
pub const DIGIT_CELL_WEIGHT: f64 = 0.05;
/// Cap on the total numeric-density bonus.
pub const DIGIT_BONUS_CAP: f64 = 1.0;
/// A best candidate must score strictly above this to be usable.
pub const MIN_TABLE_SCORE: f64 = 0.0;

/// One HTML table, reduced to header strings and cell text. Ephemeral;
/// lives only for the duration of one source scrape.
#[derive(Debug, Clone)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn cell<'a>(&'a self, row: &'a [String], column: usize) -> Option<&'a str> {
        row.get(column).map(String::as_str)
    }

    fn score(&self) -> f64 {
        let mut score = 0.0;
        for (role, weight) in [
            (ColumnRole::Category, STRONG_HEADER_WEIGHT),
            (ColumnRole::Average, STRONG_HEADER_WEIGHT),
            (ColumnRole::Max, WEAK_HEADER_WEIGHT),
            (ColumnRole::Min, WEAK_HEADER_WEIGHT),
        ] {
            if self.headers.iter().any(|h| header_matches(h, role)) {
                score += weight;
            }
        }

        let digit_cells = self
            .rows
            .iter()
            .flatten()
            .filter(|cell| cell.bytes().any(|b| b.is_ascii_digit()))
            .count();
        score + (digit_cells as f64 * DIGIT_CELL_WEIGHT).min(DIGIT_BONUS_CAP)
    }
}

/// Pull every table out of the document. The first row supplies the headers,
/// the rest the data cells.
pub fn extract_tables(document: &Html) -> Vec<RawTable> {
    let table_selector = Selector::parse("table").unwrap();
    let row_selector = Selector::parse("tr").unwrap();
    let cell_selector = Selector::parse("th, td").unwrap();

    let mut tables = Vec::new();
    for table in document.select(&table_selector) {
        let mut rows = table.select(&row_selector).map(|row| {
            row.select(&cell_selector)
                .map(|cell| cell.text().collect::<String>().trim().to_string())
                .collect::<Vec<_>>()
        });

        let Some(headers) = rows.next() else { continue };
        if headers.is_empty() {
            continue;
        }
        tables.push(RawTable {
            headers,
            rows: rows.filter(|r| !r.is_empty()).collect(),
        });
    }
    tables
}

/// Pick the table that actually holds price data, or fail with
/// `NoUsableTable` when nothing on the page clears a zero score. Ties go to
/// the table with more rows.
pub fn select_price_table(document: &Html, url: &str) -> Result<RawTable> {
    let tables = extract_tables(document);

    let mut best: Option<(f64, RawTable)> = None;
    for (idx, table) in tables.into_iter().enumerate() {
        let score = table.score();
        debug!(table = idx, score, rows = table.rows.len(), "scored table candidate");
        let replace = match &best {
            None => true,
            Some((best_score, best_table)) => {
                score > *best_score
                    || (score == *best_score && table.rows.len() > best_table.rows.len())
            }
        };
        if replace {
            best = Some((score, table));
        }
    }

    match best {
        Some((score, table)) if score > MIN_TABLE_SCORE => Ok(table),
        _ => Err(ScraperError::NoUsableTable(url.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRICE_PAGE: &str = r#"
        <html><body>
        <table><tr><td>Inicio</td><td>Contacto</td></tr></table>
        <table>
            <tr><th>Categoría</th><th>Prom</th><th>Máx</th><th>Mín</th></tr>
            <tr><td>Terneros</td><td>3,10</td><td>3,45</td><td>2,80</td></tr>
            <tr><td>Novillos 1 a 2 años</td><td>2,55</td><td>2,70</td><td>2,40</td></tr>
        </table>
        <table><tr><td>Semana</td><td>del 12/08/2025</td></tr></table>
        </body></html>
    "#;

    #[test]
    fn picks_the_price_table_among_decorative_ones() {
        let document = Html::parse_document(PRICE_PAGE);
        let table = select_price_table(&document, "http://example.test").unwrap();
        assert_eq!(table.headers[0], "Categoría");
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[1][0], "Novillos 1 a 2 años");
    }

    #[test]
    fn all_decorative_candidates_fail() {
        let html = r#"
            <table><tr><td>Inicio</td><td>Contacto</td></tr></table>
            <table><tr><td>Links</td></tr><tr><td>Otra página</td></tr></table>
        "#;
        let document = Html::parse_document(html);
        let err = select_price_table(&document, "http://example.test").unwrap_err();
        assert!(matches!(err, ScraperError::NoUsableTable(_)));
    }

    #[test]
    fn no_tables_fails() {
        let document = Html::parse_document("<p>sin tablas</p>");
        assert!(select_price_table(&document, "http://example.test").is_err());
    }

    #[test]
    fn ties_prefer_more_rows() {
        let html = r#"
            <table>
                <tr><th>Categoría</th><th>Prom</th></tr>
                <tr><td>Terneros</td><td>3,10</td></tr>
            </table>
            <table>
                <tr><th>Categoría</th><th>Prom</th></tr>
                <tr><td>Terneros</td><td>3,10</td></tr>
                <tr><td>Ovejas</td><td>s/d</td></tr>
            </table>
        "#;
        let document = Html::parse_document(html);
        let table = select_price_table(&document, "http://example.test").unwrap();
        assert_eq!(table.rows.len(), 2);
    }
}
