// src/scan.rs
//! Live scan: every variable of an input table is resolved against the value
//! source and written back with a `value` column.
//!
//! ```text
//! load_records → [process check] → Scoped::connect
//!              → classify + Resolver::resolve per row → results::build → save
//! ```

use std::path::{Path, PathBuf};

use crate::classify::classify;
use crate::config::consts::{SCAN_NA, TARGET_PROCESS};
use crate::config::options::{ExportFormat, ScanOptions};
use crate::core::process;
use crate::error::{Error, Result};
use crate::file::{self, write_table};
use crate::progress::Progress;
use crate::resolve::{ResolvedValue, Resolver};
use crate::results::{self, RESULT_HEADERS, ResultRow};
use crate::source::{self, Scoped, ValueSession, ValueSource};
use crate::table::{VariableRecord, records_from_table};

#[derive(Debug)]
pub struct ScanSummary {
    pub rows: Vec<ResultRow>,
    pub out_dir: PathBuf,
    pub files_written: Vec<PathBuf>,
}

/// Variables of a harvested (or hand-made) csv/xlsx table.
pub fn load_records(path: &Path) -> Result<Vec<VariableRecord>> {
    let table = file::read_table(path)?;
    records_from_table(&table, path)
}

/// Full scan: load, check the simulator is up, connect, resolve, save.
pub fn run(opts: &ScanOptions, progress: &mut dyn Progress) -> Result<ScanSummary> {
    progress.log(&format!("Loading: {}", opts.table.display()));
    let records = load_records(&opts.table)?;

    if opts.check_process && !process::is_running(TARGET_PROCESS) {
        return Err(Error::NotRunning { process: s!(TARGET_PROCESS) });
    }

    let source = source::from_spec(&opts.source)?;
    run_with_source(opts, records, source.as_ref(), progress)
}

/// Scan `records` against an explicit source. The session is held only while resolving.
pub fn run_with_source(
    opts: &ScanOptions,
    records: Vec<VariableRecord>,
    source: &dyn ValueSource,
    progress: &mut dyn Progress,
) -> Result<ScanSummary> {
    let values = {
        let mut session = Scoped::connect(source)?;
        resolve_all(&records, opts, &mut *session, progress)
    };

    let rows = results::build(records, values);
    let out_dir = output_dir(&opts.out_dir, progress);
    let files_written = save(opts, &out_dir, &rows, progress)?;

    Ok(ScanSummary { rows, out_dir, files_written })
}

/// One value per record, in record order.
pub fn resolve_all(
    records: &[VariableRecord],
    opts: &ScanOptions,
    session: &mut dyn ValueSession,
    progress: &mut dyn Progress,
) -> Vec<ResolvedValue> {
    let mut resolver = Resolver::new(opts.query_pause);
    let indexes = opts.indexes();

    progress.begin(records.len());
    progress.log(&format!("Reading {} variables", records.len()));

    let values = records
        .iter()
        .enumerate()
        .map(|(pos, rec)| {
            let var = classify(&rec.name);
            let value = resolver.resolve(&var, indexes, |name| session.query(name));
            progress.item_done(pos, &rec.name, &value.render());
            value
        })
        .collect();

    progress.finish();
    values
}

/// `dir` if it exists, otherwise the current directory.
fn output_dir(dir: &Path, progress: &mut dyn Progress) -> PathBuf {
    if dir.is_dir() {
        return dir.to_path_buf();
    }
    progress.log(&format!("ERROR: Output path '{}' not found. Default '.'", dir.display()));
    PathBuf::from(".")
}

fn save(opts: &ScanOptions, dir: &Path, rows: &[ResultRow], progress: &mut dyn Progress) -> Result<Vec<PathBuf>> {
    let table = results::to_rows(rows);
    let mut written = Vec::with_capacity(2);

    progress.log("Saving files:");
    for format in [ExportFormat::Xlsx, ExportFormat::Csv] {
        let path = opts.out_path(dir, format);
        if let Err(e) = write_table(&path, format, &RESULT_HEADERS, &table, SCAN_NA) {
            progress.log(&format!("Failed! Reason: {e}"));
            return Err(e);
        }
        progress.log(&format!("- '{}'", path.display()));
        written.push(path);
    }
    Ok(written)
}
