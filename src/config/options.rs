// src/config/options.rs
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::consts::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Xlsx,
}

impl ExportFormat {
    pub fn ext(&self) -> &'static str {
        match self { ExportFormat::Csv => "csv", ExportFormat::Xlsx => "xlsx" }
    }

    /// Format implied by a file extension (case-insensitive). `.xls` reads as Excel.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" => Some(ExportFormat::Csv),
            "xlsx" | "xls" => Some(ExportFormat::Xlsx),
            _ => None,
        }
    }
}

/// One documentation page to harvest.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocPage {
    pub topic: String,
    pub url: String,
}

impl DocPage {
    pub fn builtin() -> Vec<DocPage> {
        SIMVAR_PAGES
            .iter()
            .map(|(topic, path)| DocPage { topic: s!(*topic), url: format!("{DOCS_BASE}{path}") })
            .collect()
    }

    /// Parse `TOPIC=URL`.
    pub fn parse(spec: &str) -> Option<DocPage> {
        let (topic, url) = spec.split_once('=')?;
        let (topic, url) = (topic.trim(), url.trim());
        if topic.is_empty() || url.is_empty() { return None; }
        Some(DocPage { topic: s!(topic), url: s!(url) })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HarvestOptions {
    pub out_dir: PathBuf,
    pub pages: Vec<DocPage>,
    pub format: ExportFormat,
    pub page_pause: Duration,
}

impl HarvestOptions {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            pages: DocPage::builtin(),
            format: ExportFormat::Xlsx,
            page_pause: Duration::from_millis(PAGE_PAUSE_MS),
        }
    }

    pub fn page_path(&self, topic: &str) -> PathBuf {
        self.out_dir.join(format!("{topic}.{}", self.format.ext()))
    }

    pub fn merged_path(&self) -> PathBuf {
        self.out_dir.join(format!("{MERGED_STEM}.{}", self.format.ext()))
    }
}

/// Where live values come from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SourceSpec {
    /// A captured `name;value` table (csv or xlsx).
    Snapshot(PathBuf),
    /// A bridge answering `GET <base>/<name>` with the value as text.
    Http(String),
}

impl SourceSpec {
    pub fn parse(s: &str) -> Self {
        let lc = s.to_ascii_lowercase();
        if lc.starts_with("http://") || lc.starts_with("https://") {
            SourceSpec::Http(s.trim_end_matches('/').to_string())
        } else {
            SourceSpec::Snapshot(PathBuf::from(s))
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScanOptions {
    pub table: PathBuf,
    pub indexes: Vec<u32>,
    pub sim_name: String,
    pub out_dir: PathBuf,
    pub source: SourceSpec,
    pub check_process: bool,
    pub query_pause: Duration,
}

impl ScanOptions {
    pub fn new(table: impl Into<PathBuf>, source: SourceSpec) -> Self {
        Self {
            table: table.into(),
            indexes: Vec::new(),
            sim_name: s!(DEFAULT_SIM_NAME),
            out_dir: PathBuf::from("."),
            source,
            check_process: true,
            query_pause: Duration::from_millis(QUERY_PAUSE_MS),
        }
    }

    /// Requested indexes, or the default `[1]` when none were given.
    pub fn indexes(&self) -> &[u32] {
        if self.indexes.is_empty() { DEFAULT_INDEXES } else { &self.indexes }
    }

    /// `<input stem>-<sim name>`
    pub fn out_stem(&self) -> String {
        let stem = self
            .table
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| s!("table"));
        format!("{stem}-{}", self.sim_name)
    }

    pub fn out_path(&self, dir: &Path, format: ExportFormat) -> PathBuf {
        dir.join(format!("{}.{}", self.out_stem(), format.ext()))
    }
}
