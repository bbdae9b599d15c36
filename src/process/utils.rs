use once_cell::sync::Lazy;
use regex::Regex;

static CITATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[\d+\]").expect("citation regex should parse"));

/// 1) Trim whitespace + strip outer quotes if present.
pub fn clean_str(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.starts_with('"') && trimmed.ends_with('"') && trimmed.len() >= 2 {
        trimmed[1..trimmed.len() - 1].trim().to_string()
    } else {
        trimmed.to_string()
    }
}

/// 2) Collapse any run of whitespace (including non-breaking spaces and
/// newlines from `<br>`) into a single ASCII space.
pub fn collapse_whitespace(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// 3) Drop `[n]` citation markers.
pub fn strip_citations(raw: &str) -> String {
    CITATION.replace_all(raw, "").into_owned()
}

/// 4) Header comparison key: lowercase, no citation markers, no whitespace.
pub fn header_key(raw: &str) -> String {
    strip_citations(raw)
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}
