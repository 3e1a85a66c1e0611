//! List hint extraction: the first `#hashtag` names the target list

use super::types::Match;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

static HASHTAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"#(\w+)").unwrap());

/// Raw, case-preserved hashtag text. Resolving it to a real list happens
/// downstream (see `crate::lists`).
pub fn extract_list_hint(text: &str) -> Option<Match<String>> {
    let caps = HASHTAG.captures(text)?;
    let whole = caps.get(0)?;
    let name = caps.get(1)?.as_str().to_string();
    debug!("Matched list hint '{}'", name);
    Some(Match::new(name, whole.range()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_hashtag_wins() {
        let m = extract_list_hint("Call mom #Family #home").unwrap();
        assert_eq!(m.value, "Family");
        assert_eq!(m.span, 9..16);
    }

    #[test]
    fn test_unicode_and_underscores() {
        assert_eq!(extract_list_hint("#side_projects idea").unwrap().value, "side_projects");
        assert_eq!(extract_list_hint("#café").unwrap().value, "café");
    }

    #[test]
    fn test_no_hashtag() {
        assert!(extract_list_hint("Buy milk").is_none());
        assert!(extract_list_hint("issue # 42").is_none());
    }
}
