// src/csv.rs
use std::io::{self, Write};
use std::mem::take;

/* ---------------- Parsing ---------------- */

/// Minimal delimited-text parser (quotes + CRLF tolerant, leading BOM dropped).
/// Blank lines are skipped.
pub fn parse_rows(text: &str, sep: char) -> Vec<Vec<String>> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut rows = Vec::new();
    let mut field = s!();
    let mut row = Vec::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if in_quotes {
                    if matches!(chars.peek(), Some('"')) {
                        chars.next(); // doubled quote
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                } else {
                    in_quotes = true;
                }
            }
            c if c == sep && !in_quotes => row.push(take(&mut field)),
            '\n' | '\r' if !in_quotes => {
                if ch == '\r' && matches!(chars.peek(), Some('\n')) { chars.next(); }
                row.push(take(&mut field));
                if !(row.len() == 1 && row[0].is_empty()) {
                    rows.push(take(&mut row));
                } else {
                    row.clear();
                }
            }
            _ => field.push(ch),
        }
    }

    // Trailing row without newline (also flushes unterminated quotes)
    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }

    rows
}

/* ---------------- Writing ---------------- */

fn needs_quotes(field: &str, sep: char) -> bool {
    field.contains(sep) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write one row. Empty cells are written as `na`.
pub fn write_row<W: Write, S: AsRef<str>>(mut w: W, row: &[S], sep: char, na: &str) -> io::Result<()> {
    for (i, cell) in row.iter().enumerate() {
        if i > 0 { write!(w, "{sep}")?; }
        let cell = cell.as_ref();
        if cell.is_empty() {
            write!(w, "{na}")?;
        } else if needs_quotes(cell, sep) {
            write!(w, "\"{}\"", cell.replace('"', "\"\""))?;
        } else {
            write!(w, "{cell}")?;
        }
    }
    writeln!(w)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_quotes_and_crlf() {
        let rows = parse_rows("\u{feff}a;\"b;c\";\"say \"\"hi\"\"\"\r\n\r\nx;y;z", ';');
        assert_eq!(rows, vec![row!["a", "b;c", "say \"hi\""], row!["x", "y", "z"]]);
    }

    #[test]
    fn quoted_newline_stays_in_field() {
        let rows = parse_rows("a;\"line1\nline2\"\n", ';');
        assert_eq!(rows, vec![row!["a", "line1\nline2"]]);
    }

    #[test]
    fn writes_markers_and_quotes() {
        let mut buf = Vec::new();
        write_row(&mut buf, &["T", "", "a;b", "q\"x"], ';', "NA").unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "T;NA;\"a;b\";\"q\"\"x\"\n");
    }
}
