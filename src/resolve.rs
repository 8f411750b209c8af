// src/resolve.rs
//! Turning a classified variable into a reportable value.
//!
//! Scalars are queried once; indexed variables once per requested index,
//! with the index appended to the base name (`GENERAL_ENG_RPM:` + `2`).
//! Query failures never propagate: they become one of three sentinels that
//! downstream sheets tell apart.
//!
//! | outcome                               | rendered            |
//! |---------------------------------------|---------------------|
//! | scalar query failed                   | `na`                |
//! | every indexed query failed            | `None`              |
//! | some indexed queries failed           | `['12.5', 'None']`  |

use std::fmt;
use std::thread;
use std::time::{Duration, Instant};

use crate::classify::ClassifiedVariable;
use crate::config::consts::DEFAULT_INDEXES;
use crate::error::QueryError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResolvedValue {
    Scalar(String),
    /// Scalar query failed.
    NotAvailable,
    /// Per-index values in request order; `None` where that query failed.
    Indexed(Vec<Option<String>>),
    /// Every indexed query failed.
    NoneFound,
}

impl ResolvedValue {
    pub fn render(&self) -> String {
        match self {
            ResolvedValue::Scalar(v) => v.clone(),
            ResolvedValue::NotAvailable => s!("na"),
            ResolvedValue::NoneFound => s!("None"),
            ResolvedValue::Indexed(values) => {
                let items: Vec<String> = values
                    .iter()
                    .map(|v| quote_item(v.as_deref().unwrap_or("None")))
                    .collect();
                format!("[{}]", items.join(", "))
            }
        }
    }
}

impl fmt::Display for ResolvedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Quoted like a Python `str` repr: single quotes unless the item holds a `'`
/// and no `"`. Backslashes, the chosen quote and control chars are escaped.
fn quote_item(item: &str) -> String {
    let quote = if item.contains('\'') && !item.contains('"') { '"' } else { '\'' };
    let mut out = String::with_capacity(item.len() + 2);
    out.push(quote);
    for c in item.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

/// Blocking minimum spacing between consecutive queries.
#[derive(Debug)]
pub struct Pacer {
    gap: Duration,
    last: Option<Instant>,
}

impl Pacer {
    pub fn new(gap: Duration) -> Self {
        Self { gap, last: None }
    }

    /// Sleep until `gap` has passed since the previous call. The first call never waits.
    pub fn wait(&mut self) {
        if let Some(last) = self.last {
            let elapsed = last.elapsed();
            if elapsed < self.gap {
                thread::sleep(self.gap - elapsed);
            }
        }
        self.last = Some(Instant::now());
    }
}

/// Resolves variables one query at a time. No retries.
#[derive(Debug)]
pub struct Resolver {
    pacer: Pacer,
}

impl Resolver {
    pub fn new(pause: Duration) -> Self {
        Self { pacer: Pacer::new(pause) }
    }

    /// Resolve `var` through `query`. An empty `indexes` means `[1]`.
    pub fn resolve<F>(&mut self, var: &ClassifiedVariable, indexes: &[u32], mut query: F) -> ResolvedValue
    where
        F: FnMut(&str) -> Result<String, QueryError>,
    {
        if !var.is_indexed {
            self.pacer.wait();
            return match query(&var.base_name) {
                Ok(v) => ResolvedValue::Scalar(v),
                Err(e) => {
                    logd!("{}: {e}", var.base_name);
                    ResolvedValue::NotAvailable
                }
            };
        }

        let indexes = if indexes.is_empty() { DEFAULT_INDEXES } else { indexes };
        let mut values = Vec::with_capacity(indexes.len());
        let mut none_count = 0usize;

        for index in indexes {
            let name = format!("{}{index}", var.base_name);
            self.pacer.wait();
            match query(&name) {
                Ok(v) => values.push(Some(v)),
                Err(e) => {
                    logd!("{name}: {e}");
                    none_count += 1;
                    values.push(None);
                }
            }
        }

        // All requested indexes failing is reported apart from a partial miss.
        if none_count == indexes.len() {
            ResolvedValue::NoneFound
        } else {
            ResolvedValue::Indexed(values)
        }
    }
}
