// src/file.rs
// Table persistence: `;`-separated text or a single-sheet workbook.
// Neither format carries a row-index column.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use calamine::{Reader, open_workbook_auto};
use rust_xlsxwriter::{Format, Workbook};

use crate::config::consts::FIELD_SEP;
use crate::config::options::ExportFormat;
use crate::csv::{parse_rows, write_row};
use crate::error::{Error, Result};
use crate::table::RawTable;

/// Write `headers` + `rows` to `path` in `format`. Empty cells become `na`.
pub fn write_table(
    path: &Path,
    format: ExportFormat,
    headers: &[&str],
    rows: &[Vec<String>],
    na: &str,
) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }

    match format {
        ExportFormat::Csv => write_csv(path, headers, rows, na)?,
        ExportFormat::Xlsx => write_xlsx(path, headers, rows, na)?,
    }
    logf!("wrote {} row(s) to {}", rows.len(), path.display());
    Ok(())
}

fn write_csv(path: &Path, headers: &[&str], rows: &[Vec<String>], na: &str) -> Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    write_row(&mut out, headers, FIELD_SEP, na)?;
    for row in rows {
        write_row(&mut out, row, FIELD_SEP, na)?;
    }
    out.flush()?;
    Ok(())
}

fn write_xlsx(path: &Path, headers: &[&str], rows: &[Vec<String>], na: &str) -> Result<()> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();
    let sheet = workbook.add_worksheet();

    for (c, h) in headers.iter().enumerate() {
        sheet.write_string_with_format(0, c as u16, *h, &bold)?;
    }
    for (r, row) in rows.iter().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            let text = if cell.is_empty() { na } else { cell.as_str() };
            sheet.write_string(r as u32 + 1, c as u16, text)?;
        }
    }
    workbook.save(path)?;
    Ok(())
}

/// Load a csv (`;`) or Excel table; the first row is the header.
pub fn read_table(path: &Path) -> Result<RawTable> {
    if !path.exists() {
        return Err(Error::InputMissing { path: path.to_path_buf() });
    }
    let format = ExportFormat::from_path(path)
        .ok_or_else(|| Error::UnsupportedFormat { path: path.to_path_buf() })?;
    logd!("loading {}", path.display());

    let grid = match format {
        ExportFormat::Csv => parse_rows(&fs::read_to_string(path)?, FIELD_SEP),
        ExportFormat::Xlsx => {
            let mut workbook = open_workbook_auto(path)?;
            match workbook.worksheet_range_at(0).transpose()? {
                Some(range) => range
                    .rows()
                    .map(|r| r.iter().map(|c| c.to_string()).collect())
                    .collect(),
                None => Vec::new(),
            }
        }
    };
    Ok(RawTable::from_grid(grid).unwrap_or_default())
}

pub fn ensure_directory(dir: &Path) -> Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(Error::NotADirectory { path: dir.to_path_buf() });
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}
