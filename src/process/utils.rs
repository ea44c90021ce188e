/// Collapse every whitespace run (including non-breaking spaces) to a single
/// space and trim the ends. Cell text pulled out of HTML is full of both.
pub fn clean_str(raw: &str) -> String {
    raw.split(|c: char| c.is_whitespace() || c == '\u{a0}')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Cleaned text, or `None` when nothing is left: an empty cell counts as missing.
pub fn cell_value(raw: &str) -> Option<String> {
    let cleaned = clean_str(raw);
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}
