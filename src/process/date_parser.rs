use once_cell::sync::Lazy;
use regex::Regex;

static QUARTER_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)\s*Q(\d)").expect("quarter token regex should parse"));

/// Pull every `<year> Q<n>` token out of a free-text date range, in order.
///
/// `"1973 Q4 – 1974 Q1"` → `["1973 Q4", "1974 Q1"]`. Separators and any other
/// text are dropped; text without a token yields an empty vector.
pub fn extract_date_tokens(text: &str) -> Vec<String> {
    QUARTER_TOKEN
        .captures_iter(text)
        .map(|caps| format!("{} Q{}", &caps[1], &caps[2]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_start_and_end() {
        let want = vec!["1973 Q4".to_string(), "1975 Q1".to_string()];
        assert_eq!(extract_date_tokens("1973 Q4 1975 Q1"), want);
        assert_eq!(extract_date_tokens("1973 Q4–1975 Q1"), want);
        assert_eq!(extract_date_tokens("1973 Q4 to 1975 Q1"), want);
        assert_eq!(extract_date_tokens("1973\u{a0}Q4 – 1975\u{a0}Q1"), want);
    }

    #[test]
    fn single_quarter_recession() {
        assert_eq!(extract_date_tokens("1956 Q2"), vec!["1956 Q2"]);
    }

    #[test]
    fn no_token_is_empty() {
        assert!(extract_date_tokens("").is_empty());
        assert!(extract_date_tokens("mid-1970s").is_empty());
        assert!(extract_date_tokens("Q3").is_empty());
    }
}
