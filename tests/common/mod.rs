// tests/common/mod.rs
#![allow(dead_code)]

use std::cell::Cell;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::rc::Rc;

use msfs_simvars::error::{QueryError, Result};
use msfs_simvars::progress::Progress;
use msfs_simvars::source::{ValueSession, ValueSource};

pub fn tmp_dir(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("simvars_it_{}_{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&p);
    fs::create_dir_all(&p).unwrap();
    p
}

/// Progress sink that keeps every line.
#[derive(Default)]
pub struct Recorder {
    pub lines: Vec<String>,
}

impl Progress for Recorder {
    fn log(&mut self, msg: &str) {
        self.lines.push(msg.to_string());
    }
    fn item_done(&mut self, pos: usize, name: &str, outcome: &str) {
        self.lines.push(format!("{pos}:{name}={outcome}"));
    }
    fn item_skipped(&mut self, pos: usize, name: &str, reason: &str) {
        self.lines.push(format!("{pos}:{name} skipped: {reason}"));
    }
}

/// In-memory value source; counts queries and session closes.
pub struct MapSource {
    pub values: HashMap<String, String>,
    pub queries: Rc<Cell<usize>>,
    pub closes: Rc<Cell<usize>>,
}

impl MapSource {
    pub fn new(pairs: &[(&str, &str)]) -> Self {
        Self {
            values: pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
            queries: Rc::new(Cell::new(0)),
            closes: Rc::new(Cell::new(0)),
        }
    }
}

struct MapSession {
    values: HashMap<String, String>,
    queries: Rc<Cell<usize>>,
    closes: Rc<Cell<usize>>,
}

impl ValueSession for MapSession {
    fn query(&mut self, name: &str) -> std::result::Result<String, QueryError> {
        self.queries.set(self.queries.get() + 1);
        self.values.get(name).cloned().ok_or(QueryError::NotFound)
    }
    fn close(&mut self) {
        self.closes.set(self.closes.get() + 1);
    }
}

impl ValueSource for MapSource {
    fn connect(&self) -> Result<Box<dyn ValueSession>> {
        Ok(Box::new(MapSession {
            values: self.values.clone(),
            queries: Rc::clone(&self.queries),
            closes: Rc::clone(&self.closes),
        }))
    }
    fn describe(&self) -> String {
        "map".to_string()
    }
}
