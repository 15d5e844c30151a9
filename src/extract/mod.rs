//! The extraction engine: table selection, column roles, numeric and date
//! parsing, and the shared row walk used by every tabular source.

pub mod columns;
pub mod date;
pub mod numeric;
pub mod table;

use std::collections::BTreeMap;

use tracing::debug;

use crate::canon::Canonicalizer;
use crate::extract::columns::{resolve_roles, ColumnRole};
use crate::extract::numeric::parse_decimal;
use crate::extract::table::RawTable;
use crate::types::ValueRecord;

/// Walk a price table's rows into a category → values map.
///
/// Per row: canonicalize the category (an empty canonical id means "no
/// category", the row is dropped) and parse each numeric field
/// independently. A row is dropped only when every numeric field comes out
/// absent; partial rows are kept as-is.
pub fn table_to_records(
    table: &RawTable,
    canonicalizer: &Canonicalizer,
) -> BTreeMap<String, ValueRecord> {
    let mut roles = resolve_roles(&table.headers);
    if roles.needs_positional_fallback() {
        debug!("no category/average header matched, assuming positional columns");
        roles.apply_positional_fallback(table.headers.len());
    }

    let category_col = roles.get(ColumnRole::Category);
    let cell_number = |row: &[String], role: ColumnRole| -> Option<f64> {
        roles
            .get(role)
            .and_then(|col| table.cell(row, col))
            .and_then(parse_decimal)
    };

    let mut records = BTreeMap::new();
    for row in &table.rows {
        let raw_category = category_col.and_then(|col| table.cell(row, col)).unwrap_or("");
        let category = canonicalizer.canonicalize(raw_category);
        if category.is_empty() {
            continue;
        }

        let record = ValueRecord {
            prom: cell_number(row, ColumnRole::Average),
            max: cell_number(row, ColumnRole::Max),
            min: cell_number(row, ColumnRole::Min),
            prom_bulto: cell_number(row, ColumnRole::AveragePerLot),
            reference: None,
        };
        if record.is_empty() {
            continue;
        }
        records.insert(category, record);
    }
    records
}
