// src/classify.rs
use crate::config::consts::INDEX_TOKEN;

/// A variable name split into the part queried as-is and whether it takes an index suffix.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassifiedVariable {
    pub base_name: String,
    pub is_indexed: bool,
}

/// Classify on the first literal, case-sensitive `index` token.
///
/// `GENERAL_ENG_RPM:index` → base `GENERAL_ENG_RPM:` (indexed);
/// `FLAPS_HANDLE_INDEX` → unchanged (scalar). Total over any input.
pub fn classify(name: &str) -> ClassifiedVariable {
    match name.find(INDEX_TOKEN) {
        Some(p) => ClassifiedVariable { base_name: name[..p].to_string(), is_indexed: true },
        None => ClassifiedVariable { base_name: name.to_string(), is_indexed: false },
    }
}
