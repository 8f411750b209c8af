// src/source/snapshot.rs
// Values captured earlier into a table file. Two layouts are read:
// a previous scan output (`Simulation Variable` + `value` columns), or a bare
// two-column `name;value` table with a header row.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::{ValueSession, ValueSource};
use crate::config::consts::{COL_NAME, COL_VALUE};
use crate::core::sanitize::{canonical_var_name, is_na_marker};
use crate::error::{QueryError, Result};
use crate::file;
use crate::table::RawTable;

pub struct SnapshotSource {
    path: PathBuf,
}

impl SnapshotSource {
    pub fn new(path: &Path) -> Self {
        Self { path: path.to_path_buf() }
    }
}

impl ValueSource for SnapshotSource {
    fn connect(&self) -> Result<Box<dyn ValueSession>> {
        let table = file::read_table(&self.path)?;
        let values = snapshot_values(&table);
        logd!("snapshot {}: {} value(s)", self.path.display(), values.len());
        Ok(Box::new(SnapshotSession { values }))
    }

    fn describe(&self) -> String {
        format!("snapshot '{}'", self.path.display())
    }
}

fn snapshot_values(table: &RawTable) -> HashMap<String, String> {
    let (name_ix, value_ix) = match (table.column(COL_NAME), table.column(COL_VALUE)) {
        (Some(n), Some(v)) => (n, v),
        (Some(n), None) => {
            loge!("snapshot has a '{COL_NAME}' column (#{n}) but no '{COL_VALUE}' column; reading columns 0 and 1");
            (0, 1)
        }
        _ => (0, 1),
    };

    table
        .rows
        .iter()
        .filter_map(|r| {
            let name = canonical_var_name(r.get(name_ix)?);
            let value = r.get(value_ix)?.trim();
            if name.is_empty() || value.is_empty() || is_na_marker(value) || value == "None" {
                return None;
            }
            Some((name, value.to_string()))
        })
        .collect()
}

struct SnapshotSession {
    values: HashMap<String, String>,
}

impl ValueSession for SnapshotSession {
    fn query(&mut self, name: &str) -> std::result::Result<String, QueryError> {
        self.values.get(name).cloned().ok_or(QueryError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_two_column_layout() {
        let t = RawTable::new(
            row!["name", "value"],
            vec![row!["ENGINE RPM:1", "1500"], row!["X", "na"], row!["Y", ""], row!["short"]],
        );
        let v = snapshot_values(&t);
        assert_eq!(v.len(), 1);
        assert_eq!(v["ENGINE_RPM:1"], "1500");
    }

    #[test]
    fn scan_output_layout() {
        let t = RawTable::new(
            row!["topic", "Simulation Variable", "value", "Units", "Description"],
            vec![row!["T", "PLANE_ALTITUDE", "3200.5", "ft", "d"], row!["T", "FLAPS:index", "None", "", ""]],
        );
        let mut s = SnapshotSession { values: snapshot_values(&t) };
        assert_eq!(s.query("PLANE_ALTITUDE").unwrap(), "3200.5");
        assert_eq!(s.query("FLAPS:index"), Err(QueryError::NotFound));
    }

    #[test]
    fn harvest_layout_falls_back_to_first_two_columns() {
        let t = RawTable::new(
            row!["topic", "Simulation Variable", "Units", "Description"],
            vec![row!["Engine", "GENERAL ENG RPM:index", "RPM", "d"]],
        );
        let v = snapshot_values(&t);
        assert_eq!(v.len(), 1);
        assert_eq!(v["Engine"], "GENERAL ENG RPM:index");
    }
}
