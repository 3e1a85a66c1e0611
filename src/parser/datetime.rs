//! Date and time-of-day extraction
//!
//! Two independent sub-stages. The time stage tries the smart keyword table
//! (noon, eod, ...) before explicit clock readings. The date stage tries, in
//! order: relative offsets, absolute dates, "next X", then simple keywords.

use super::types::Match;
use super::utils::{
    MONTH_NAMES, WEEKDAY_NAMES, WEEKDAY_NAMES_SHORT, capture_u32, convert_to_24_hour, next_weekday,
    parse_month, parse_weekday, upcoming_weekday,
};
use chrono::{Datelike, Duration, Months, NaiveDate, NaiveTime, Weekday};
use log::debug;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

// --- Time of day ---

/// Smart keywords in precedence order with the hour each stands for
static SMART_TIMES: Lazy<Vec<(Regex, u32)>> = Lazy::new(|| {
    [
        ("midnight", 0),
        ("noon", 12),
        ("midday", 12),
        ("morning", 9),
        ("afternoon", 14),
        ("evening", 18),
        ("tonight", 20),
        ("night", 21),
        (r"eod|end\s+of\s+(?:the\s+)?day", 17),
        ("cob", 17),
    ]
    .iter()
    .map(|(keyword, hour)| {
        let pattern = format!(r"(?i)\b(?:(?:at|by|in\s+the|this)\s+)?(?:{})\b", keyword);
        (Regex::new(&pattern).unwrap(), *hour)
    })
    .collect()
});

static TIME_12H: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:\b(?:at|by)\s+|@\s*)?\b(\d{1,2})(?::(\d{2}))?\s*(am|pm)\b").unwrap()
});

static TIME_24H: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:\b(?:at|by)\s+|@\s*)?\b(\d{1,2}):(\d{2})\b").unwrap());

/// Find the first time of day in `text`
pub fn extract_time(text: &str) -> Option<Match<NaiveTime>> {
    for (re, hour) in SMART_TIMES.iter() {
        if let Some(m) = re.find(text) {
            let time = NaiveTime::from_hms_opt(*hour, 0, 0)?;
            debug!("Matched smart time keyword '{}' -> {}", m.as_str(), time);
            return Some(Match::new(time, m.range()));
        }
    }

    for caps in TIME_12H.captures_iter(text) {
        let whole = caps.get(0)?;
        let meridiem = caps.get(3)?.as_str();
        if let Some(time) = convert_to_24_hour(capture_u32(&caps, 1), capture_u32(&caps, 2), meridiem) {
            debug!("Matched 12-hour time '{}' -> {}", whole.as_str(), time);
            return Some(Match::new(time, whole.range()));
        }
    }

    for caps in TIME_24H.captures_iter(text) {
        let whole = caps.get(0)?;
        if let Some(time) = NaiveTime::from_hms_opt(capture_u32(&caps, 1), capture_u32(&caps, 2), 0) {
            debug!("Matched 24-hour time '{}' -> {}", whole.as_str(), time);
            return Some(Match::new(time, whole.range()));
        }
    }

    None
}

// --- Calendar day ---

type DateHandler = fn(&Captures, NaiveDate) -> Option<NaiveDate>;

/// Every date form in precedence order. The first candidate that resolves wins.
static DATE_PATTERNS: Lazy<Vec<(Regex, DateHandler)>> = Lazy::new(|| {
    let table: Vec<(String, DateHandler)> = vec![
        // Relative offsets
        (r"(?i)\bin\s+(\d+)\s+(day|week|month)s?\b".to_string(), relative_offset as DateHandler),
        (r"(?i)\b(\d+)\s+(day|week|month)s?\s+from\s+now\b".to_string(), relative_offset as DateHandler),
        // Absolute dates
        (r"(?i)\b(?:on\s+)?(\d{4})-(\d{1,2})-(\d{1,2})\b".to_string(), iso_date as DateHandler),
        (
            format!(
                r"(?i)\b(?:on\s+)?({})\.?\s+(\d{{1,2}})(?:st|nd|rd|th)?(?:,?\s+(\d{{4}}))?\b",
                MONTH_NAMES
            ),
            month_name_day as DateHandler,
        ),
        (
            format!(
                r"(?i)\b(?:on\s+)?(?:the\s+)?(\d{{1,2}})(?:st|nd|rd|th)?\s+(?:of\s+)?({})\b",
                MONTH_NAMES
            ),
            day_month_name as DateHandler,
        ),
        (
            r"(?i)\b(?:on\s+)?(\d{1,2})[/-](\d{1,2})(?:[/-](\d{4}))?\b".to_string(),
            numeric_date as DateHandler,
        ),
        // "next X" always moves past today
        (format!(r"(?i)\bnext\s+({}|week|month)\b", WEEKDAY_NAMES_SHORT), next_unit as DateHandler),
        // Simple keywords
        (r"(?i)\btoday\b".to_string(), today as DateHandler),
        (r"(?i)\b(?:the\s+)?day\s+after\s+tomorrow\b".to_string(), day_after_tomorrow as DateHandler),
        (r"(?i)\b(?:tomorrow|tmrw|tmr)\b".to_string(), tomorrow as DateHandler),
        (r"(?i)\bthis\s+weekend\b".to_string(), this_weekend as DateHandler),
        (r"(?i)\b(?:end\s+of\s+(?:the\s+)?week|eow)\b".to_string(), end_of_week as DateHandler),
        (format!(r"(?i)\b(?:on\s+)?({})\b", WEEKDAY_NAMES), bare_weekday as DateHandler),
    ];

    table
        .into_iter()
        .map(|(pattern, handler)| (Regex::new(&pattern).unwrap(), handler))
        .collect()
});

/// Find the first date expression in `text`, relative to `today`
pub fn extract_date(text: &str, today: NaiveDate) -> Option<Match<NaiveDate>> {
    for (index, (re, handler)) in DATE_PATTERNS.iter().enumerate() {
        for caps in re.captures_iter(text) {
            let whole = caps.get(0)?;
            if let Some(date) = handler(&caps, today) {
                debug!("Matched date pattern #{}: '{}' -> {}", index, whole.as_str(), date);
                return Some(Match::new(date, whole.range()));
            }
            debug!("Date pattern #{} matched '{}' but did not resolve", index, whole.as_str());
        }
    }
    None
}

fn relative_offset(caps: &Captures, today: NaiveDate) -> Option<NaiveDate> {
    let amount = capture_u32(caps, 1);
    match caps.get(2)?.as_str().to_lowercase().as_str() {
        "day" => today.checked_add_signed(Duration::days(amount as i64)),
        "week" => today.checked_add_signed(Duration::weeks(amount as i64)),
        _ => today.checked_add_months(Months::new(amount)),
    }
}

/// Month/day in the current year, rolled into next year once it has passed
fn upcoming_month_day(today: NaiveDate, month: u32, day: u32) -> Option<NaiveDate> {
    match NaiveDate::from_ymd_opt(today.year(), month, day) {
        Some(date) if date >= today => Some(date),
        _ => NaiveDate::from_ymd_opt(today.year() + 1, month, day),
    }
}

fn month_day_with_year(
    caps: &Captures,
    year_group: usize,
    today: NaiveDate,
    month: u32,
    day: u32,
) -> Option<NaiveDate> {
    match caps.get(year_group) {
        Some(year) => NaiveDate::from_ymd_opt(year.as_str().parse().ok()?, month, day),
        None => upcoming_month_day(today, month, day),
    }
}

fn iso_date(caps: &Captures, _today: NaiveDate) -> Option<NaiveDate> {
    let year = caps.get(1)?.as_str().parse().ok()?;
    NaiveDate::from_ymd_opt(year, capture_u32(caps, 2), capture_u32(caps, 3))
}

fn month_name_day(caps: &Captures, today: NaiveDate) -> Option<NaiveDate> {
    let month = parse_month(caps.get(1)?.as_str())?;
    month_day_with_year(caps, 3, today, month, capture_u32(caps, 2))
}

fn day_month_name(caps: &Captures, today: NaiveDate) -> Option<NaiveDate> {
    let month = parse_month(caps.get(2)?.as_str())?;
    upcoming_month_day(today, month, capture_u32(caps, 1))
}

fn numeric_date(caps: &Captures, today: NaiveDate) -> Option<NaiveDate> {
    month_day_with_year(caps, 3, today, capture_u32(caps, 1), capture_u32(caps, 2))
}

fn next_unit(caps: &Captures, today: NaiveDate) -> Option<NaiveDate> {
    match caps.get(1)?.as_str().to_lowercase().as_str() {
        "week" => Some(today + Duration::days(7)),
        "month" => Some(today + Duration::days(30)),
        day => Some(next_weekday(today, parse_weekday(day))),
    }
}

fn today(_: &Captures, today: NaiveDate) -> Option<NaiveDate> {
    Some(today)
}

fn day_after_tomorrow(_: &Captures, today: NaiveDate) -> Option<NaiveDate> {
    Some(today + Duration::days(2))
}

fn tomorrow(_: &Captures, today: NaiveDate) -> Option<NaiveDate> {
    today.succ_opt()
}

fn this_weekend(_: &Captures, today: NaiveDate) -> Option<NaiveDate> {
    Some(upcoming_weekday(today, Weekday::Sat))
}

fn end_of_week(_: &Captures, today: NaiveDate) -> Option<NaiveDate> {
    Some(upcoming_weekday(today, Weekday::Fri))
}

/// A bare weekday name means today when it names today, else the next one
fn bare_weekday(caps: &Captures, today: NaiveDate) -> Option<NaiveDate> {
    Some(upcoming_weekday(today, parse_weekday(caps.get(1)?.as_str())))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    // Wednesday
    fn today() -> NaiveDate {
        date(2025, 12, 17)
    }

    fn parsed_date(text: &str) -> Option<NaiveDate> {
        extract_date(text, today()).map(|m| m.value)
    }

    fn parsed_time(text: &str) -> Option<NaiveTime> {
        extract_time(text).map(|m| m.value)
    }

    #[test]
    fn test_explicit_times() {
        assert_eq!(parsed_time("call at 2pm"), Some(time(14, 0)));
        assert_eq!(parsed_time("call at 14:30"), Some(time(14, 30)));
        assert_eq!(parsed_time("call at 12am"), Some(time(0, 0)));
        assert_eq!(parsed_time("call at 12pm"), Some(time(12, 0)));
        assert_eq!(parsed_time("standup 9:15 AM"), Some(time(9, 15)));
        assert_eq!(parsed_time("ship @5pm"), Some(time(17, 0)));
    }

    #[test]
    fn test_time_span_includes_lead_in() {
        let m = extract_time("call mom at 3pm").unwrap();
        assert_eq!(m.span, 9..15);
        let m = extract_time("report by eod").unwrap();
        assert_eq!(m.value, time(17, 0));
        assert_eq!(m.span, 7..13);
    }

    #[test]
    fn test_smart_time_keywords() {
        assert_eq!(parsed_time("lunch at noon"), Some(time(12, 0)));
        assert_eq!(parsed_time("run in the morning"), Some(time(9, 0)));
        assert_eq!(parsed_time("call tonight"), Some(time(20, 0)));
        assert_eq!(parsed_time("movie night"), Some(time(21, 0)));
        assert_eq!(parsed_time("send by COB"), Some(time(17, 0)));
        assert_eq!(parsed_time("wrap up end of day"), Some(time(17, 0)));
        assert_eq!(parsed_time("deploy at midnight"), Some(time(0, 0)));
    }

    #[test]
    fn test_smart_keywords_win_over_explicit_times() {
        assert_eq!(parsed_time("gym 7am tomorrow morning"), Some(time(9, 0)));
    }

    #[test]
    fn test_invalid_times() {
        assert_eq!(parsed_time("call at 25:00"), None);
        assert_eq!(parsed_time("call at 13pm"), None);
        assert_eq!(parsed_time("Buy milk"), None);
        assert_eq!(parsed_time("knightly duties"), None);
    }

    #[test]
    fn test_relative_dates() {
        assert_eq!(parsed_date("in 3 days"), Some(date(2025, 12, 20)));
        assert_eq!(parsed_date("in 2 weeks"), Some(date(2025, 12, 31)));
        assert_eq!(parsed_date("in 1 month"), Some(date(2026, 1, 17)));
        assert_eq!(parsed_date("5 days from now"), Some(date(2025, 12, 22)));
    }

    #[test]
    fn test_absolute_dates() {
        assert_eq!(parsed_date("party Dec 20"), Some(date(2025, 12, 20)));
        assert_eq!(parsed_date("party on December 31st"), Some(date(2025, 12, 31)));
        assert_eq!(parsed_date("party 24th of december"), Some(date(2025, 12, 24)));
        assert_eq!(parsed_date("party 12/25"), Some(date(2025, 12, 25)));
        assert_eq!(parsed_date("party 12-25"), Some(date(2025, 12, 25)));
        assert_eq!(parsed_date("filed 2026-03-01"), Some(date(2026, 3, 1)));
        assert_eq!(parsed_date("trip Jan 5, 2027"), Some(date(2027, 1, 5)));
    }

    #[test]
    fn test_absolute_date_rolls_into_next_year() {
        assert_eq!(parsed_date("renew Dec 15"), Some(date(2026, 12, 15)));
        assert_eq!(parsed_date("renew 3/1"), Some(date(2026, 3, 1)));
        // Today is not rolled
        assert_eq!(parsed_date("renew Dec 17"), Some(date(2025, 12, 17)));
        // Explicit years are never rolled
        assert_eq!(parsed_date("renew 2025-01-02"), Some(date(2025, 1, 2)));
    }

    #[test]
    fn test_invalid_calendar_days() {
        assert_eq!(parsed_date("Feb 30"), None);
        assert_eq!(parsed_date("13/45"), None);
    }

    #[test]
    fn test_next_unit_always_advances() {
        // Today is Wednesday
        assert_eq!(parsed_date("next wednesday"), Some(date(2025, 12, 24)));
        assert_eq!(parsed_date("next friday"), Some(date(2025, 12, 19)));
        assert_eq!(parsed_date("next mon"), Some(date(2025, 12, 22)));
        assert_eq!(parsed_date("next week"), Some(date(2025, 12, 24)));
        assert_eq!(parsed_date("next month"), Some(date(2026, 1, 16)));
    }

    #[test]
    fn test_bare_weekday_includes_today() {
        assert_eq!(parsed_date("wednesday"), Some(today()));
        assert_eq!(parsed_date("on friday"), Some(date(2025, 12, 19)));
        assert_eq!(parsed_date("monday"), Some(date(2025, 12, 22)));
    }

    #[test]
    fn test_simple_keywords() {
        assert_eq!(parsed_date("today"), Some(today()));
        assert_eq!(parsed_date("tomorrow"), Some(date(2025, 12, 18)));
        assert_eq!(parsed_date("tmr"), Some(date(2025, 12, 18)));
        assert_eq!(parsed_date("day after tomorrow"), Some(date(2025, 12, 19)));
        assert_eq!(parsed_date("this weekend"), Some(date(2025, 12, 20)));
        assert_eq!(parsed_date("end of week"), Some(date(2025, 12, 19)));
        assert_eq!(parsed_date("eow"), Some(date(2025, 12, 19)));
    }

    #[test]
    fn test_precedence() {
        // Relative beats keywords appearing earlier in the text
        assert_eq!(parsed_date("tomorrow or in 3 days"), Some(date(2025, 12, 20)));
        let m = extract_date("due next friday", today()).unwrap();
        assert_eq!(m.span, 4..15);
    }

    #[test]
    fn test_no_date() {
        assert_eq!(parsed_date("Buy milk"), None);
        assert_eq!(parsed_date("sundays are slow"), None);
    }
}
