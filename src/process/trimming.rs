use super::utils::strip_citations;

/// Boilerplate tails that survive the first-clause cut on the recession table.
const STRIP_SUFFIXES: &[&str] = &[" including spending cuts", " in America and high bank rate."];

/// Reduce a causes cell to a short chart label.
///
/// Drops `[n]` citation markers, keeps only the first comma-separated clause,
/// removes known boilerplate and trims.
pub fn clean_cause(raw: &str) -> String {
    let without_refs = strip_citations(raw);
    let mut first = without_refs
        .split(',')
        .next()
        .unwrap_or_default()
        .to_string();
    for suffix in STRIP_SUFFIXES {
        first = first.replace(suffix, "");
    }
    first.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_citation_and_keeps_first_clause() {
        assert_eq!(
            clean_cause("Banking crisis [12], other factors"),
            "Banking crisis"
        );
    }

    #[test]
    fn strips_known_boilerplate() {
        assert_eq!(
            clean_cause("Austerity including spending cuts[4], tax rises"),
            "Austerity"
        );
        assert_eq!(
            clean_cause("Stock market crash in America and high bank rate."),
            "Stock market crash"
        );
    }

    #[test]
    fn plain_text_is_untouched() {
        assert_eq!(clean_cause("Oil crisis"), "Oil crisis");
        assert_eq!(clean_cause(""), "");
    }
}
