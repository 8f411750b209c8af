// src/results.rs
use crate::config::consts::{COL_DESCRIPTION, COL_NAME, COL_TOPIC, COL_UNITS, COL_VALUE};
use crate::resolve::ResolvedValue;
use crate::table::VariableRecord;

/// Header layout of scan output.
pub const RESULT_HEADERS: [&str; 5] = [COL_TOPIC, COL_NAME, COL_VALUE, COL_UNITS, COL_DESCRIPTION];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultRow {
    pub record: VariableRecord,
    pub value: ResolvedValue,
}

impl ResultRow {
    /// Row in `RESULT_HEADERS` order.
    pub fn to_row(&self) -> Vec<String> {
        let r = &self.record;
        vec![r.topic.clone(), r.name.clone(), self.value.render(), r.units.clone(), r.description.clone()]
    }
}

/// Pair records with their values, position for position.
///
/// # Panics
/// If the two sequences differ in length.
pub fn build(records: Vec<VariableRecord>, values: Vec<ResolvedValue>) -> Vec<ResultRow> {
    assert_eq!(records.len(), values.len(), "one resolved value per record");
    records
        .into_iter()
        .zip(values)
        .map(|(record, value)| ResultRow { record, value })
        .collect()
}

pub fn to_rows(rows: &[ResultRow]) -> Vec<Vec<String>> {
    rows.iter().map(ResultRow::to_row).collect()
}
