// src/source/mod.rs
//! Live value sources.
//!
//! A source is opened once per run into a session. The session is the only
//! handle queries go through and is released exactly once, when its `Scoped`
//! guard drops, on every exit path.

use std::ops::{Deref, DerefMut};

use crate::config::options::SourceSpec;
use crate::error::{QueryError, Result};

mod http;
mod snapshot;

pub use http::HttpSource;
pub use snapshot::SnapshotSource;

/// An open connection to a value source. Single-threaded and stateful.
pub trait ValueSession {
    /// Current value of `name`. Failures are per call and expected.
    fn query(&mut self, name: &str) -> std::result::Result<String, QueryError>;

    /// Release the connection. Called once by `Scoped`.
    fn close(&mut self) {}
}

pub trait ValueSource {
    fn connect(&self) -> Result<Box<dyn ValueSession>>;

    fn describe(&self) -> String;
}

/// Build the source named on the command line.
pub fn from_spec(spec: &SourceSpec) -> Result<Box<dyn ValueSource>> {
    Ok(match spec {
        SourceSpec::Snapshot(path) => Box::new(SnapshotSource::new(path)),
        SourceSpec::Http(base) => Box::new(HttpSource::new(base)?),
    })
}

/// Session guard: derefs to the session, closes it on drop.
pub struct Scoped {
    inner: Box<dyn ValueSession>,
    label: String,
}

impl Scoped {
    pub fn connect(source: &dyn ValueSource) -> Result<Self> {
        let label = source.describe();
        let inner = source.connect()?;
        logf!("connected to {label}");
        Ok(Self { inner, label })
    }
}

impl Deref for Scoped {
    type Target = dyn ValueSession;
    fn deref(&self) -> &Self::Target { self.inner.as_ref() }
}

impl DerefMut for Scoped {
    fn deref_mut(&mut self) -> &mut Self::Target { self.inner.as_mut() }
}

impl Drop for Scoped {
    fn drop(&mut self) {
        self.inner.close();
        logf!("released {}", self.label);
    }
}
