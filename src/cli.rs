// src/cli.rs
use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{Result, WrapErr};

use crate::config::consts::{DEFAULT_SIM_NAME, QUERY_PAUSE_MS};
use crate::config::options::{DocPage, ExportFormat, HarvestOptions, ScanOptions, SourceSpec};
use crate::progress::ConsoleProgress;
use crate::{harvest, scan};

#[derive(Parser, Debug)]
#[command(name = "simvars", version, about = "MSFS simulation variables: harvest tables from the SDK docs, scan live values")]
pub struct Cli {
    /// More log output (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Append log events to this file instead of stderr
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Download simulation variable tables from the documentation pages
    Harvest {
        /// Output directory for the table files (must exist)
        outdir: PathBuf,

        #[arg(long, value_enum, default_value_t = FormatArg::Xlsx)]
        format: FormatArg,

        /// Harvest TOPIC=URL instead of the built-in page list (repeatable)
        #[arg(long = "page", value_parser = parse_page)]
        pages: Vec<DocPage>,
    },
    /// Read variable values from the running simulation into a new table
    Scan {
        /// Table of simulation variables (.csv with ';' or .xlsx)
        filetab: PathBuf,

        /// Indexes for indexed variables (default: 1)
        indexes: Vec<u32>,

        /// Name of the current simulation, used in output file names
        #[arg(short = 's', long, default_value = DEFAULT_SIM_NAME)]
        simname: String,

        /// Output directory
        #[arg(short = 'o', long, default_value = ".")]
        outdir: PathBuf,

        /// Value source: snapshot table file or http(s) bridge URL
        #[arg(long)]
        source: String,

        /// Do not require the simulator process to be running
        #[arg(long)]
        skip_process_check: bool,

        /// Minimum pause between queries, in milliseconds
        #[arg(long, default_value_t = QUERY_PAUSE_MS)]
        pause_ms: u64,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Csv,
    Xlsx,
}

impl From<FormatArg> for ExportFormat {
    fn from(f: FormatArg) -> Self {
        match f { FormatArg::Csv => ExportFormat::Csv, FormatArg::Xlsx => ExportFormat::Xlsx }
    }
}

fn parse_page(s: &str) -> std::result::Result<DocPage, String> {
    DocPage::parse(s).ok_or_else(|| format!("expected TOPIC=URL, got '{s}'"))
}

fn harvest_options(outdir: PathBuf, format: FormatArg, pages: Vec<DocPage>) -> HarvestOptions {
    let mut opts = HarvestOptions::new(outdir);
    opts.format = format.into();
    opts.pages = harvest::pages_or_builtin(pages);
    opts
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    crate::log::init(cli.verbose, cli.log_file.as_deref()).wrap_err("cannot open log file")?;
    dispatch(cli.command)
}

pub fn dispatch(command: Commands) -> Result<()> {
    let mut progress = ConsoleProgress::default();

    match command {
        Commands::Harvest { outdir, format, pages } => {
            let opts = harvest_options(outdir, format, pages);
            let summary = harvest::run(&opts, &mut progress).wrap_err("harvest failed")?;
            if !summary.pages_skipped.is_empty() {
                println!("Skipped: {}", summary.pages_skipped.join(", "));
            }
            println!("\nEnd");
        }
        Commands::Scan { filetab, indexes, simname, outdir, source, skip_process_check, pause_ms } => {
            let mut opts = ScanOptions::new(filetab, SourceSpec::parse(&source));
            opts.indexes = indexes;
            opts.sim_name = simname;
            opts.out_dir = outdir;
            opts.check_process = !skip_process_check;
            opts.query_pause = Duration::from_millis(pause_ms);

            let summary = scan::run(&opts, &mut progress).wrap_err("scan failed")?;
            println!("in '{}'", summary.out_dir.display());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_args_parse() {
        let cli = Cli::try_parse_from([
            "simvars", "scan", "Engine.xlsx", "1", "2", "-s", "c172", "--source", "dump.csv", "--skip-process-check",
        ])
        .unwrap();
        match cli.command {
            Commands::Scan { indexes, simname, skip_process_check, pause_ms, outdir, .. } => {
                assert_eq!(indexes, vec![1, 2]);
                assert_eq!(simname, "c172");
                assert!(skip_process_check);
                assert_eq!(pause_ms, QUERY_PAUSE_MS);
                assert_eq!(outdir, PathBuf::from("."));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn scan_rejects_non_integer_indexes() {
        assert!(Cli::try_parse_from(["simvars", "scan", "t.csv", "x", "--source", "d.csv"]).is_err());
    }

    #[test]
    fn harvest_args_parse_pages() {
        let cli = Cli::try_parse_from([
            "simvars", "-v", "harvest", "out", "--format", "csv", "--page", "Camera=https://h/c.htm",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 1);
        let Commands::Harvest { outdir, format, pages } = cli.command else { panic!("not harvest") };
        let opts = harvest_options(outdir, format, pages);
        assert_eq!(opts.format, ExportFormat::Csv);
        assert_eq!(opts.pages.len(), 1);
        assert_eq!(opts.page_path("Camera"), PathBuf::from("out").join("Camera.csv"));
    }

    #[test]
    fn harvest_rejects_bad_page() {
        assert!(Cli::try_parse_from(["simvars", "harvest", "out", "--page", "nope"]).is_err());
    }
}
