// src/core/html.rs
// Tolerant HTML table scanning. Tag names are matched case-insensitively on a
// lowercased copy of the document; ASCII-only lowering keeps byte offsets aligned.

use super::sanitize::{normalize_entities, normalize_ws};
use crate::table::RawTable;

pub fn to_lower(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_ascii() { c.to_ascii_lowercase() } else { c })
        .collect()
}

/// Position of the next `<tag` opener at or after `from`, where the tag name
/// ends right there (so `<th` does not match `<thead`).
fn find_open(lc: &str, open: &str, from: usize) -> Option<usize> {
    let mut search = from;
    loop {
        let at = lc.get(search..)?.find(open)? + search;
        let after = at + open.len();
        match lc.as_bytes().get(after) {
            Some(b'>' | b'/' | b' ' | b'\t' | b'\r' | b'\n') => return Some(at),
            _ => search = after,
        }
    }
}

/// Next complete `<tag ...>...</tag>` block at or after `from`, nesting aware.
/// `lc` must already be lowercased. Returns the byte range of the whole block.
pub fn next_tag_block(lc: &str, tag: &str, from: usize) -> Option<(usize, usize)> {
    let open = format!("<{tag}");
    let close = format!("</{tag}");

    let start = find_open(lc, &open, from)?;
    let mut pos = lc[start..].find('>')? + start + 1;
    let mut depth = 1usize;

    loop {
        let close_at = lc.get(pos..)?.find(&close)? + pos;
        if let Some(o) = find_open(lc, &open, pos).filter(|&o| o < close_at) {
            depth += 1;
            pos = o + open.len();
            continue;
        }
        let close_end = lc[close_at..].find('>').map_or(lc.len(), |e| close_at + e + 1);
        depth -= 1;
        if depth == 0 {
            return Some((start, close_end));
        }
        pos = close_end;
    }
}

/// Drop all tags. Block and line-break tags become a space so words don't fuse.
pub fn strip_tags(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut tag = String::new();
    let mut in_tag = false;

    for ch in s.chars() {
        match ch {
            '<' => { in_tag = true; tag.clear(); }
            '>' if in_tag => {
                in_tag = false;
                let name: String = tag
                    .trim_start_matches('/')
                    .chars()
                    .take_while(|c| c.is_ascii_alphanumeric())
                    .map(|c| c.to_ascii_lowercase())
                    .collect();
                if matches!(name.as_str(), "br" | "p" | "div" | "li" | "td" | "th" | "tr" | "table") {
                    out.push(' ');
                }
            }
            _ if in_tag => tag.push(ch),
            _ => out.push(ch),
        }
    }
    out
}

/// Visible text of a cell: tags stripped, then entities decoded, then whitespace collapsed.
pub fn cell_text(inner: &str) -> String {
    normalize_ws(&normalize_entities(&strip_tags(inner)))
}

const MAX_SPAN: usize = 1000;

/// An element located in a lowercased slice. `end` is exclusive; `inner` is
/// the byte range of its content.
struct Element {
    start: usize,
    end: usize,
    inner: (usize, usize),
}

/// Earliest opener of any of `tags` at or after `from`.
fn next_opener<'t>(lc: &str, tags: &[&'t str], from: usize) -> Option<(usize, &'t str)> {
    tags.iter()
        .filter_map(|&t| find_open(lc, &format!("<{t}"), from).map(|at| (at, t)))
        .min_by_key(|&(at, _)| at)
}

/// Next opener of any of `tags` at this nesting level: nested tables are jumped over.
fn next_sibling(lc: &str, tags: &[&str], from: usize) -> Option<usize> {
    let mut wanted = tags.to_vec();
    wanted.push("table");
    let mut pos = from;
    loop {
        match next_opener(lc, &wanted, pos)? {
            (at, "table") => pos = next_tag_block(lc, "table", at)?.1,
            (at, _) => return Some(at),
        }
    }
}

/// Next `tags` element at or after `from`. An omitted end tag is implied by
/// the next sibling opener, or by the end of `lc`.
fn next_element(lc: &str, tags: &[&str], from: usize) -> Option<Element> {
    let (start, tag) = next_opener(lc, tags, from)?;
    let open_end = lc[start..].find('>').map_or(lc.len(), |e| start + e + 1);
    let implied = next_sibling(lc, tags, open_end).unwrap_or(lc.len());

    Some(match next_tag_block(lc, tag, start).filter(|&(_, e)| e <= implied) {
        Some((_, end)) => {
            let close_at = lc[open_end..end].rfind('<').map_or(end, |c| open_end + c);
            Element { start, end, inner: (open_end, close_at) }
        }
        None => Element { start, end: implied, inner: (open_end, implied) },
    })
}

/// Numeric `rowspan`/`colspan` value from a lowercased opening tag; 1 when absent or bad.
fn span_attr(open_lc: &str, name: &str) -> usize {
    let Some(at) = open_lc.find(name) else { return 1 };
    let Some(rest) = open_lc[at + name.len()..].trim_start().strip_prefix('=') else { return 1 };
    let digits: String = rest
        .trim_start()
        .trim_start_matches(['"', '\''])
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse::<usize>().map_or(1, |n| n.clamp(1, MAX_SPAN))
}

struct SpannedCell {
    text: String,
    rowspan: usize,
    colspan: usize,
}

/// Cells still owed to later rows by a `rowspan`, per column.
#[derive(Default)]
struct RowSpans {
    pending: Vec<Option<(String, usize)>>,
}

impl RowSpans {
    fn take(&mut self, col: usize) -> Option<String> {
        let slot = self.pending.get_mut(col)?;
        let (text, left) = slot.as_mut()?;
        let text = text.clone();
        *left -= 1;
        let done = *left == 0;
        if done {
            *slot = None;
        }
        Some(text)
    }

    fn hold(&mut self, col: usize, text: &str, rows: usize) {
        if rows < 2 { return; }
        if self.pending.len() <= col {
            self.pending.resize(col + 1, None);
        }
        self.pending[col] = Some((text.to_string(), rows - 1));
    }

    fn owes_from(&self, col: usize) -> bool {
        self.pending.iter().skip(col).any(Option::is_some)
    }

    /// Place a row's own cells around the ones carried down from above.
    fn lay_out(&mut self, cells: Vec<SpannedCell>) -> Vec<String> {
        let mut row = Vec::new();
        let mut cells = cells.into_iter();
        loop {
            if let Some(text) = self.take(row.len()) {
                row.push(text);
                continue;
            }
            match cells.next() {
                Some(cell) => {
                    for _ in 0..cell.colspan {
                        self.hold(row.len(), &cell.text, cell.rowspan);
                        row.push(cell.text.clone());
                    }
                }
                None if self.owes_from(row.len()) => row.push(s!()),
                None => break,
            }
        }
        row
    }
}

fn read_rows(table: &str, table_lc: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut spans = RowSpans::default();
    // start past the <table ...> opener so the outer block itself is not re-matched
    let mut pos = table_lc.find('>').map_or(table_lc.len(), |p| p + 1);

    while let Some(tr) = next_element(table_lc, &["tr"], pos) {
        pos = tr.end;
        let (is, ie) = tr.inner;
        let (body, body_lc) = (&table[is..ie], &table_lc[is..ie]);

        let mut cells = Vec::new();
        let mut cell_pos = 0usize;
        while let Some(cell) = next_element(body_lc, &["td", "th"], cell_pos) {
            cell_pos = cell.end;
            let open_lc = &body_lc[cell.start..cell.inner.0];
            cells.push(SpannedCell {
                text: cell_text(&body[cell.inner.0..cell.inner.1]),
                rowspan: span_attr(open_lc, "rowspan"),
                colspan: span_attr(open_lc, "colspan"),
            });
        }
        if cells.is_empty() {
            logd!("row at byte {} has no cells", tr.start);
        }

        let row = spans.lay_out(cells);
        if !row.is_empty() {
            rows.push(row);
        }
    }
    rows
}

/// Every top-level `<table>` in `doc` as a raw grid; the first row becomes the header.
/// Tables with no rows are skipped.
pub fn extract_tables(doc: &str) -> Vec<RawTable> {
    let lc = to_lower(doc);
    let mut out = Vec::new();
    let mut pos = 0usize;

    while let Some((ts, te)) = next_tag_block(&lc, "table", pos) {
        pos = te;
        let grid = read_rows(&doc[ts..te], &lc[ts..te]);
        if let Some(table) = RawTable::from_grid(grid) {
            out.push(table);
        }
    }
    logd!("extracted {} table(s)", out.len());
    out
}
