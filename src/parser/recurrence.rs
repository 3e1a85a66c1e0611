//! Recurrence extraction
//!
//! Runs before every other stage: phrases like "every monday" or "every 2 weeks"
//! contain weekday and number tokens the date and duration stages would
//! otherwise claim.

use super::types::{Frequency, Match, RecurrenceRule};
use super::utils::{WEEKDAY_NAMES_SHORT, capture_u32, parse_weekday};
use log::debug;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

type Handler = fn(&Captures) -> Option<RecurrenceRule>;

/// Ordered most specific first. The first pattern that matches wins.
static RECURRENCE_PATTERNS: Lazy<Vec<(Regex, Handler)>> = Lazy::new(|| {
    let table: Vec<(String, Handler)> = vec![
        (r"(?i)\b(?:every\s+weekdays?|on\s+weekdays)\b".to_string(), weekdays_rule as Handler),
        (r"(?i)\b(?:every\s+weekends?|on\s+weekends)\b".to_string(), weekends_rule as Handler),
        (r"(?i)\bevery\s+(\d+)\s+(day|week|month|year)s?\b".to_string(), interval_rule as Handler),
        (format!(r"(?i)\bevery\s+({})\b", WEEKDAY_NAMES_SHORT), weekday_rule as Handler),
        (format!(r"(?i)\bweekly\s+on\s+({})\b", WEEKDAY_NAMES_SHORT), weekday_rule as Handler),
        (
            r"(?i)\b(?:every\s+month|monthly)\s+on\s+the\s+(\d{1,2})(?:st|nd|rd|th)?\b".to_string(),
            month_day_rule as Handler,
        ),
        (r"(?i)\b(daily|weekly|monthly|yearly|annually)\b".to_string(), keyword_rule as Handler),
        (r"(?i)\bevery\s+(day|week|month|year)\b".to_string(), unit_rule as Handler),
    ];

    table
        .into_iter()
        .map(|(pattern, handler)| (Regex::new(&pattern).unwrap(), handler))
        .collect()
});

fn weekdays_rule(_: &Captures) -> Option<RecurrenceRule> {
    Some(RecurrenceRule::new(Frequency::Weekdays))
}

fn weekends_rule(_: &Captures) -> Option<RecurrenceRule> {
    Some(RecurrenceRule::new(Frequency::Weekends))
}

fn interval_rule(caps: &Captures) -> Option<RecurrenceRule> {
    let frequency = frequency_from_unit(caps.get(2)?.as_str())?;
    Some(RecurrenceRule::every(frequency, capture_u32(caps, 1)))
}

fn weekday_rule(caps: &Captures) -> Option<RecurrenceRule> {
    Some(RecurrenceRule::weekly_on(parse_weekday(caps.get(1)?.as_str())))
}

fn month_day_rule(caps: &Captures) -> Option<RecurrenceRule> {
    let day = capture_u32(caps, 1);
    (1..=31).contains(&day).then(|| RecurrenceRule::monthly_on(day))
}

fn keyword_rule(caps: &Captures) -> Option<RecurrenceRule> {
    let frequency = match caps.get(1)?.as_str().to_lowercase().as_str() {
        "daily" => Frequency::Daily,
        "weekly" => Frequency::Weekly,
        "monthly" => Frequency::Monthly,
        _ => Frequency::Yearly,
    };
    Some(RecurrenceRule::new(frequency))
}

fn unit_rule(caps: &Captures) -> Option<RecurrenceRule> {
    frequency_from_unit(caps.get(1)?.as_str()).map(RecurrenceRule::new)
}

fn frequency_from_unit(unit: &str) -> Option<Frequency> {
    match unit.to_lowercase().get(..1)? {
        "d" => Some(Frequency::Daily),
        "w" => Some(Frequency::Weekly),
        "m" => Some(Frequency::Monthly),
        "y" => Some(Frequency::Yearly),
        _ => None,
    }
}

/// Find the first recurrence phrase in `text`
pub fn extract_recurrence(text: &str) -> Option<Match<RecurrenceRule>> {
    for (index, (re, handler)) in RECURRENCE_PATTERNS.iter().enumerate() {
        let Some(caps) = re.captures(text) else {
            continue;
        };
        let whole = caps.get(0)?;
        if let Some(rule) = handler(&caps) {
            debug!("Matched recurrence pattern #{}: '{}' -> {}", index, whole.as_str(), rule);
            return Some(Match::new(rule, whole.range()));
        }
        debug!("Recurrence pattern #{} matched '{}' but was rejected", index, whole.as_str());
    }
    None
}
