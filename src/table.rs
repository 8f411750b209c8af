// src/table.rs
//! Raw extracted grids and their normalization into variable records.
//!
//! Documentation pages carry many tables; only those with the
//! `Simulation Variable` / `Description` / `Units` columns describe variables.
//! Everything else is dropped here without error.

use std::path::Path;

use crate::config::consts::{COL_DESCRIPTION, COL_NAME, COL_TOPIC, COL_UNITS};
use crate::core::sanitize::{canonical_var_name, is_na_marker};
use crate::error::{Error, Result};

/// Columns a documentation table must carry, in projection order.
pub const VARIABLE_COLUMNS: [&str; 3] = [COL_NAME, COL_DESCRIPTION, COL_UNITS];

/// Header layout of harvested tables.
pub const RECORD_HEADERS: [&str; 4] = [COL_TOPIC, COL_NAME, COL_UNITS, COL_DESCRIPTION];

/// A loosely-typed grid: one header row plus data rows of any width.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(header: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { header, rows }
    }

    /// First row is the header. `None` for an empty grid.
    pub fn from_grid(mut grid: Vec<Vec<String>>) -> Option<Self> {
        if grid.is_empty() { return None; }
        let header = grid.remove(0);
        Some(Self { header, rows: grid })
    }

    pub fn column(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|h| h.trim() == name)
    }

    /// Select `columns` (in that order) from every row.
    /// `None` if any column is missing; short rows are padded with empty cells.
    pub fn project(&self, columns: &[&str]) -> Option<Vec<Vec<String>>> {
        let ix = columns
            .iter()
            .map(|c| self.column(c))
            .collect::<Option<Vec<usize>>>()?;

        let rows = self
            .rows
            .iter()
            .map(|r| ix.iter().map(|&i| r.get(i).cloned().unwrap_or_default()).collect())
            .collect();
        Some(rows)
    }
}

/// One documented simulation variable.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VariableRecord {
    pub topic: String,
    pub name: String,
    pub units: String,
    pub description: String,
}

impl VariableRecord {
    /// Row in `RECORD_HEADERS` order.
    pub fn to_row(&self) -> Vec<String> {
        vec![self.topic.clone(), self.name.clone(), self.units.clone(), self.description.clone()]
    }
}

/// Merge every variable table found in `tables` into records tagged with `topic`.
///
/// Tables lacking any of `VARIABLE_COLUMNS` are skipped. Row order is kept
/// across tables. Fails with `EmptyResult` if none survive.
pub fn normalize(tables: &[RawTable], topic: &str) -> Result<Vec<VariableRecord>> {
    let mut records = Vec::new();
    let mut kept = 0usize;

    for (i, table) in tables.iter().enumerate() {
        let Some(rows) = table.project(&VARIABLE_COLUMNS) else {
            logd!("{topic}: table {i} has no variable columns, skipped");
            continue;
        };
        kept += 1;
        records.extend(rows.into_iter().map(|r| {
            let mut cells = r.into_iter();
            let mut next = || cells.next().unwrap_or_default();
            let (name, description, units) = (next(), next(), next());
            VariableRecord {
                topic: topic.to_string(),
                name: canonical_var_name(&name),
                units,
                description,
            }
        }));
    }

    if kept == 0 {
        return Err(Error::EmptyResult { topic: topic.to_string() });
    }
    logf!("{topic}: {} variable(s) from {kept}/{} table(s)", records.len(), tables.len());
    Ok(records)
}

/// Read records back from a harvested table (csv/xlsx grid).
///
/// Only `Simulation Variable` is required; `topic`, `Units` and `Description`
/// default to empty. `NA`/`na` cells read as empty.
pub fn records_from_table(table: &RawTable, path: &Path) -> Result<Vec<VariableRecord>> {
    let name_ix = table.column(COL_NAME).ok_or_else(|| Error::MissingColumn {
        path: path.to_path_buf(),
        column: COL_NAME,
    })?;
    let topic_ix = table.column(COL_TOPIC);
    let units_ix = table.column(COL_UNITS);
    let desc_ix = table.column(COL_DESCRIPTION);

    let cell = |row: &[String], ix: Option<usize>| -> String {
        match ix.and_then(|i| row.get(i)) {
            Some(c) if !is_na_marker(c) => c.clone(),
            _ => s!(),
        }
    };

    Ok(table
        .rows
        .iter()
        .map(|r| VariableRecord {
            topic: cell(r.as_slice(), topic_ix),
            name: canonical_var_name(&cell(r.as_slice(), Some(name_ix))),
            units: cell(r.as_slice(), units_ix),
            description: cell(r.as_slice(), desc_ix),
        })
        .collect())
}
