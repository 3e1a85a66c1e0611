//! Duration extraction ("for 30 minutes", "1.5 hours", "45 min long")

use super::types::Match;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

static DURATION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:for\s+)?(\d+(?:\.\d+)?)\s*(minutes|minute|mins|min|hours|hour|hrs|hr)s?(?:\s+long)?\b",
    )
    .unwrap()
});

/// Longest block a duration phrase may describe: one year
pub const MAX_DURATION_SECONDS: i64 = 366 * 24 * 3600;

/// Find the first duration phrase in `text`, in whole seconds
///
/// Amounts longer than `MAX_DURATION_SECONDS` are not durations; the phrase is
/// left alone.
pub fn extract_duration(text: &str) -> Option<Match<i64>> {
    let caps = DURATION_PATTERN.captures(text)?;
    let whole = caps.get(0)?;
    let amount: f64 = caps.get(1).map_or("0", |m| m.as_str()).parse().unwrap_or(0.0);
    let unit = caps.get(2)?.as_str().to_lowercase();

    let seconds_per_unit = if unit.starts_with('h') { 3600.0 } else { 60.0 };
    let seconds = (amount * seconds_per_unit).round();
    if !seconds.is_finite() || seconds > MAX_DURATION_SECONDS as f64 {
        debug!("Ignoring out-of-range duration '{}'", whole.as_str());
        return None;
    }
    let seconds = seconds as i64;
    debug!("Matched duration '{}' -> {}s", whole.as_str(), seconds);
    Some(Match::new(seconds, whole.range()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seconds(text: &str) -> Option<i64> {
        extract_duration(text).map(|m| m.value)
    }

    #[test]
    fn test_minutes_and_hours() {
        assert_eq!(seconds("workout for 30 minutes"), Some(1800));
        assert_eq!(seconds("nap 20 mins"), Some(1200));
        assert_eq!(seconds("deep work 2 hours"), Some(7200));
        assert_eq!(seconds("review 1 hr"), Some(3600));
        assert_eq!(seconds("call 45min"), Some(2700));
    }

    #[test]
    fn test_fractional_values() {
        assert_eq!(seconds("study 1.5 hours"), Some(5400));
        assert_eq!(seconds("stretch for 2.5 min"), Some(150));
    }

    #[test]
    fn test_span_covers_lead_in_and_suffix() {
        let m = extract_duration("meeting for 1 hour long today").unwrap();
        assert_eq!(m.value, 3600);
        assert_eq!(m.span, 8..23);
    }

    #[test]
    fn test_no_match() {
        assert_eq!(seconds("Buy milk"), None);
        assert_eq!(seconds("read 3 chapters"), None);
        assert_eq!(seconds("admin hour"), None);
    }

    #[test]
    fn test_out_of_range_amounts() {
        assert_eq!(seconds("sleep for 8784 hours"), Some(MAX_DURATION_SECONDS));
        assert_eq!(seconds("sleep for 8785 hours"), None);
        assert_eq!(seconds("wait 10000000000 hours"), None);
        assert_eq!(seconds("wait 99999999999999999999 hours"), None);
    }
}
