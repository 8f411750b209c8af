// src/core/sanitize.rs

/// Decode the handful of entities the docs actually use. `&amp;` goes last
/// so `&amp;lt;` stays literal.
pub fn normalize_entities(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&#160;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Canonical variable name: surrounding whitespace (incl. \n \t \v) removed,
/// every interior whitespace char replaced by '_'.
pub fn canonical_var_name(raw: &str) -> String {
    raw.trim()
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect()
}

/// Empty-value markers written by the exporters.
pub fn is_na_marker(cell: &str) -> bool {
    matches!(cell.trim(), "NA" | "na")
}
