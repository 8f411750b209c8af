// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod config;
pub mod core;
pub mod error;

pub mod classify;
pub mod csv;
pub mod file;
pub mod harvest;
pub mod progress;
pub mod resolve;
pub mod results;
pub mod scan;
pub mod source;
pub mod table;

#[cfg(feature = "cli")]
pub mod cli;

pub use error::{Error, QueryError, Result};
