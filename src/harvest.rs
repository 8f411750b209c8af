// src/harvest.rs
//! Documentation harvest: one table file per page plus a merged file.
//!
//! A page that cannot be fetched, or that carries no variable table, is
//! reported and skipped; the rest of the run continues. Write failures abort.

use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use crate::config::consts::{HARVEST_NA, PAGE_JITTER_MS};
use crate::config::options::{DocPage, HarvestOptions};
use crate::core::{html, net};
use crate::error::{Error, Result};
use crate::file::write_table;
use crate::progress::Progress;
use crate::table::{self, RECORD_HEADERS, VariableRecord};

/// Summary of what was produced.
#[derive(Debug, Default)]
pub struct HarvestSummary {
    pub files_written: Vec<PathBuf>,
    pub pages_skipped: Vec<String>,
    pub records: usize,
}

/// Records of one already-fetched page.
pub fn harvest_doc(doc: &str, topic: &str) -> Result<Vec<VariableRecord>> {
    let tables = html::extract_tables(doc);
    table::normalize(&tables, topic)
}

/// Harvest every configured page over HTTPS.
pub fn run(opts: &HarvestOptions, progress: &mut dyn Progress) -> Result<HarvestSummary> {
    let client = net::client()?;
    run_with(opts, progress, |url| net::http_get(&client, url))
}

/// Same as `run`, with the page fetch supplied by the caller.
pub fn run_with<F>(opts: &HarvestOptions, progress: &mut dyn Progress, mut fetch: F) -> Result<HarvestSummary>
where
    F: FnMut(&str) -> Result<String>,
{
    if !opts.out_dir.is_dir() {
        return Err(Error::NotADirectory { path: opts.out_dir.clone() });
    }

    progress.begin(opts.pages.len());
    progress.log(&format!("Download start in '{}'", opts.out_dir.display()));

    let mut summary = HarvestSummary::default();
    let mut all: Vec<Vec<String>> = Vec::new();

    for (i, page) in opts.pages.iter().enumerate() {
        if i > 0 {
            thread::sleep(page_pause(opts.page_pause, i));
        }

        let records = match fetch(&page.url).and_then(|doc| harvest_doc(&doc, &page.topic)) {
            Ok(r) => r,
            Err(e) => {
                loge!("{}: {e}", page.topic);
                progress.item_skipped(i, &page.topic, &e.to_string());
                summary.pages_skipped.push(page.topic.clone());
                continue;
            }
        };

        let rows: Vec<Vec<String>> = records.iter().map(VariableRecord::to_row).collect();
        let path = opts.page_path(&page.topic);
        write_table(&path, opts.format, &RECORD_HEADERS, &rows, HARVEST_NA)?;

        progress.item_done(i, &page.topic, &format!("{} variables", rows.len()));
        summary.records += rows.len();
        summary.files_written.push(path);
        all.extend(rows);
    }

    if !all.is_empty() {
        let merged = opts.merged_path();
        write_table(&merged, opts.format, &RECORD_HEADERS, &all, HARVEST_NA)?;
        progress.log(&format!("All sim vars in {}", merged.display()));
        summary.files_written.push(merged);
    }

    progress.finish();
    Ok(summary)
}

/// Base pause plus a deterministic 0..PAGE_JITTER_MS spread, so requests don't tick
/// at a fixed rate. No jitter when the base pause is zero.
fn page_pause(base: Duration, page_ix: usize) -> Duration {
    if base.is_zero() {
        return base;
    }
    let jitter = (page_ix as u64).wrapping_mul(7_919) % PAGE_JITTER_MS;
    base + Duration::from_millis(jitter)
}

/// Pages for `harvest`, built-in unless overridden.
pub fn pages_or_builtin(pages: Vec<DocPage>) -> Vec<DocPage> {
    if pages.is_empty() { DocPage::builtin() } else { pages }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pause_spreads_but_stays_bounded() {
        let base = Duration::from_millis(1_000);
        for i in 1..20 {
            let p = page_pause(base, i);
            assert!(p >= base && p < base + Duration::from_millis(PAGE_JITTER_MS));
        }
        assert_ne!(page_pause(base, 1), page_pause(base, 2));
        assert!(page_pause(Duration::ZERO, 5).is_zero());
    }

    #[test]
    fn doc_without_variable_tables_is_empty_result() {
        let err = harvest_doc("<table><tr><th>Key</th></tr></table>", "Camera").unwrap_err();
        assert!(matches!(err, Error::EmptyResult { .. }));
    }

    #[test]
    fn builtin_pages_when_none_given() {
        assert!(!pages_or_builtin(vec![]).is_empty());
        let one = vec![DocPage { topic: s!("T"), url: s!("u") }];
        assert_eq!(pages_or_builtin(one.clone()), one);
    }
}
