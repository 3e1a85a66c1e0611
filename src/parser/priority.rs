//! Priority extraction
//!
//! Word markers are listed ahead of symbol markers and the table is walked in
//! order, so "urgent !low" resolves to high: table order decides, not the
//! position of the marker in the text.

use super::types::Match;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

struct PriorityRule {
    pattern: Regex,
    level: u8,
    /// Capture group holding the consumed text (0 for the whole match)
    group: usize,
}

static PRIORITY_RULES: Lazy<Vec<PriorityRule>> = Lazy::new(|| {
    [
        // Word markers; a directly preceding "!" belongs to the marker
        (r"(?i)!?\b(?:high\s+priority|urgent|critical|asap)\b", 3, 0),
        (r"(?i)!?\b(?:medium\s+priority|important)\b", 2, 0),
        (r"(?i)!?\blow\s+priority\b", 1, 0),
        // Symbol markers
        (r"!!!", 3, 0),
        (r"!!", 2, 0),
        (r"(?i)!(?:high|urgent)\b", 3, 0),
        (r"(?i)!medium\b", 2, 0),
        (r"(?i)!low\b", 1, 0),
        // A lone "!" with no "!" on either side
        (r"(?:^|[^!])(!)(?:[^!]|$)", 1, 1),
    ]
    .iter()
    .map(|(pattern, level, group)| PriorityRule {
        pattern: Regex::new(pattern).unwrap(),
        level: *level,
        group: *group,
    })
    .collect()
});

/// Find the priority marker that ranks first in the rule table
pub fn extract_priority(text: &str) -> Option<Match<u8>> {
    for rule in PRIORITY_RULES.iter() {
        let Some(caps) = rule.pattern.captures(text) else {
            continue;
        };
        let consumed = caps.get(rule.group)?;
        debug!("Matched priority marker '{}' -> {}", consumed.as_str(), rule.level);
        return Some(Match::new(rule.level, consumed.range()));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(text: &str) -> Option<u8> {
        extract_priority(text).map(|m| m.value)
    }

    #[test]
    fn test_word_markers() {
        assert_eq!(level("fix prod asap"), Some(3));
        assert_eq!(level("URGENT call bank"), Some(3));
        assert_eq!(level("taxes high priority"), Some(3));
        assert_eq!(level("important email"), Some(2));
        assert_eq!(level("medium priority chores"), Some(2));
        assert_eq!(level("low priority cleanup"), Some(1));
    }

    #[test]
    fn test_symbol_markers() {
        assert_eq!(level("deploy !!!"), Some(3));
        assert_eq!(level("deploy !!"), Some(2));
        assert_eq!(level("deploy !high"), Some(3));
        assert_eq!(level("deploy !medium"), Some(2));
        assert_eq!(level("deploy !low"), Some(1));
        assert_eq!(level("deploy !"), Some(1));
    }

    #[test]
    fn test_table_order_beats_text_order() {
        assert_eq!(level("urgent !low"), Some(3));
        assert_eq!(level("!low urgent"), Some(3));
        assert_eq!(level("! then !!"), Some(2));
    }

    #[test]
    fn test_spans() {
        let m = extract_priority("call bank !urgent now").unwrap();
        assert_eq!((m.value, m.span), (3, 10..17));
        let m = extract_priority("Call mom!").unwrap();
        assert_eq!((m.value, m.span), (1, 8..9));
        let m = extract_priority("a ! b").unwrap();
        assert_eq!(m.span, 2..3);
    }

    #[test]
    fn test_no_marker() {
        assert_eq!(level("Buy milk"), None);
        assert_eq!(level("lowercase letters"), None);
        assert_eq!(level("highway trip"), None);
    }
}
