// tests/scan_e2e.rs
mod common;

use std::fs;
use std::time::Duration;

use common::{MapSource, Recorder, tmp_dir};
use msfs_simvars::config::options::{ScanOptions, SourceSpec};
use msfs_simvars::error::Error;
use msfs_simvars::scan;

fn write_input(dir: &std::path::Path, body: &str) -> std::path::PathBuf {
    let p = dir.join("Engine.csv");
    fs::write(&p, body).unwrap();
    p
}

fn options(table: std::path::PathBuf, out: std::path::PathBuf) -> ScanOptions {
    let mut o = ScanOptions::new(table, SourceSpec::Snapshot("unused.csv".into()));
    o.out_dir = out;
    o.check_process = false;
    o.query_pause = Duration::ZERO;
    o
}

#[test]
fn scalar_and_indexed_rows_end_to_end() {
    let dir = tmp_dir("e2e");
    let input = write_input(
        &dir,
        "topic;Simulation Variable;Units;Description\n\
         T;ENGINE_RPM:1;RPM;desc\n\
         T;FLAPS_INDEX;pos;desc\n\
         T;FLAPS HANDLE:index;pos;NA\n\
         T;GENERAL ENG RPM:index;RPM;rpm\n",
    );
    let mut opts = options(input.clone(), dir.clone());
    opts.indexes = vec![1, 2];
    opts.sim_name = "c172".into();

    let source = MapSource::new(&[("ENGINE_RPM:1", "1500"), ("GENERAL_ENG_RPM:1", "2400")]);
    let records = scan::load_records(&input).unwrap();
    let mut progress = Recorder::default();
    let summary = scan::run_with_source(&opts, records, &source, &mut progress).unwrap();

    let values: Vec<String> = summary.rows.iter().map(|r| r.value.render()).collect();
    // FLAPS_INDEX has no lowercase "index" token, so it is a scalar that fails.
    assert_eq!(values, ["1500", "na", "None", "['2400', 'None']"]);
    assert_eq!(source.queries.get(), 1 + 1 + 2 + 2);
    assert_eq!(source.closes.get(), 1);

    assert!(progress.lines.iter().any(|l| l == "1:FLAPS_INDEX=na"));

    let csv = fs::read_to_string(dir.join("Engine-c172.csv")).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "topic;Simulation Variable;value;Units;Description");
    assert_eq!(lines[1], "T;ENGINE_RPM:1;1500;RPM;desc");
    assert_eq!(lines[3], "T;FLAPS_HANDLE:index;None;pos;na");
    assert!(dir.join("Engine-c172.xlsx").is_file());
    assert_eq!(summary.files_written.len(), 2);
}

#[test]
fn default_index_is_one() {
    let dir = tmp_dir("default_index");
    let input = write_input(&dir, "Simulation Variable\nFUEL TANK:index\n");
    let opts = options(input.clone(), dir.clone());

    let source = MapSource::new(&[("FUEL_TANK:1", "12")]);
    let records = scan::load_records(&input).unwrap();
    let summary = scan::run_with_source(&opts, records, &source, &mut Recorder::default()).unwrap();

    assert_eq!(summary.rows[0].value.render(), "['12']");
    assert_eq!(summary.rows[0].record.topic, "");
}

#[test]
fn missing_out_dir_falls_back_to_cwd_with_notice() {
    let dir = tmp_dir("fallback");
    let input = write_input(&dir, "Simulation Variable\nX\n");
    let mut opts = options(input.clone(), dir.join("does-not-exist"));
    opts.sim_name = format!("fallback{}", std::process::id());

    let mut progress = Recorder::default();
    let records = scan::load_records(&input).unwrap();
    let summary = scan::run_with_source(&opts, records, &MapSource::new(&[]), &mut progress).unwrap();

    assert_eq!(summary.out_dir, std::path::PathBuf::from("."));
    assert!(progress.lines.iter().any(|l| l.contains("not found. Default '.'")));
    for p in &summary.files_written {
        let _ = fs::remove_file(p);
    }
}

#[test]
fn write_failure_surfaces_and_session_is_released() {
    let dir = tmp_dir("write_fail");
    let input = write_input(&dir, "Simulation Variable\nX\n");
    let opts = options(input.clone(), dir.clone());
    // a directory squatting on the output file name
    fs::create_dir_all(dir.join("Engine-simvars.xlsx")).unwrap();

    let source = MapSource::new(&[("X", "1")]);
    let records = scan::load_records(&input).unwrap();
    let mut progress = Recorder::default();
    let err = scan::run_with_source(&opts, records, &source, &mut progress).unwrap_err();

    assert!(matches!(err, Error::Xlsx(_) | Error::Io(_)), "{err:?}");
    assert!(progress.lines.iter().any(|l| l.starts_with("Failed! Reason:")));
    assert_eq!(source.closes.get(), 1);
}

#[test]
fn run_against_snapshot_file() {
    let dir = tmp_dir("snapshot");
    let input = write_input(&dir, "topic;Simulation Variable;Units;Description\nT;PLANE ALTITUDE;ft;alt\nT;ENG:index;x;y\n");
    let snap = dir.join("dump.csv");
    fs::write(&snap, "name;value\nPLANE_ALTITUDE;3200.5\nENG:2;7\n").unwrap();

    let mut opts = options(input, dir.clone());
    opts.source = SourceSpec::Snapshot(snap);
    opts.indexes = vec![1, 2];

    let summary = scan::run(&opts, &mut Recorder::default()).unwrap();
    let values: Vec<String> = summary.rows.iter().map(|r| r.value.render()).collect();
    assert_eq!(values, ["3200.5", "['None', '7']"]);
}

#[test]
fn input_errors() {
    let dir = tmp_dir("input_errors");
    let missing = scan::load_records(&dir.join("nope.csv")).unwrap_err();
    assert!(matches!(missing, Error::InputMissing { .. }));

    let txt = dir.join("vars.txt");
    fs::write(&txt, "x").unwrap();
    assert!(matches!(scan::load_records(&txt).unwrap_err(), Error::UnsupportedFormat { .. }));

    let bad = write_input(&dir, "Name;Units\nX;ft\n");
    assert!(matches!(scan::load_records(&bad).unwrap_err(), Error::MissingColumn { .. }));
}
