//! Helpers shared by the extraction stages
//!
//! Clock conversion, weekday and month name tables and the lenient numeric
//! parsing the stages rely on.

use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Weekday};
use regex::Captures;

/// Full weekday names, used where a bare name may appear in free text
pub const WEEKDAY_NAMES: &str = "monday|tuesday|wednesday|thursday|friday|saturday|sunday";

/// Full names plus abbreviations, used only after a leading keyword
pub const WEEKDAY_NAMES_SHORT: &str = "monday|tuesday|wednesday|thursday|friday|saturday|sunday|mon|tues|tue|wed|thurs|thur|thu|fri|sat|sun";

pub const MONTH_NAMES: &str = "january|february|march|april|may|june|july|august|september|october|november|december|jan|feb|mar|apr|jun|jul|aug|sept|sep|oct|nov|dec";

/// Drop control characters (except newlines and tabs) before matching
pub fn sanitize_user_input(input: &str) -> String {
    input
        .chars()
        .filter(|&c| !c.is_control() || c == '\n' || c == '\t')
        .collect::<String>()
}

/// Convert a 12-hour clock reading to 24-hour form
///
/// Returns `None` for hours outside 1-12 or minutes above 59.
pub fn convert_to_24_hour(hour: u32, minute: u32, meridiem: &str) -> Option<NaiveTime> {
    if !(1..=12).contains(&hour) || minute > 59 {
        return None;
    }
    let hour_24 = match (hour, meridiem.to_lowercase().as_str()) {
        (12, "am") => 0,
        (h, "am") => h,
        (12, "pm") => 12,
        (h, "pm") => h + 12,
        _ => return None,
    };
    NaiveTime::from_hms_opt(hour_24, minute, 0)
}

/// Lenient integer capture: a missing or non-numeric group reads as 0
pub fn capture_u32(caps: &Captures, index: usize) -> u32 {
    caps.get(index).map_or("0", |m| m.as_str()).parse().unwrap_or(0)
}

/// Map a weekday name or abbreviation to a `Weekday`
///
/// Unrecognized names fall back to Monday.
pub fn parse_weekday(name: &str) -> Weekday {
    match name.to_lowercase().as_str() {
        "sunday" | "sun" => Weekday::Sun,
        "monday" | "mon" => Weekday::Mon,
        "tuesday" | "tue" | "tues" => Weekday::Tue,
        "wednesday" | "wed" => Weekday::Wed,
        "thursday" | "thu" | "thur" | "thurs" => Weekday::Thu,
        "friday" | "fri" => Weekday::Fri,
        "saturday" | "sat" => Weekday::Sat,
        _ => Weekday::Mon,
    }
}

/// Map a month name or abbreviation to its number (1-12)
pub fn parse_month(name: &str) -> Option<u32> {
    let lower = name.to_lowercase();
    let month = match lower.get(..3)? {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(month)
}

/// Days from `today` to the next `target`, counting today as 0
pub fn days_until(today: NaiveDate, target: Weekday) -> i64 {
    let current = today.weekday().num_days_from_monday() as i64;
    let wanted = target.num_days_from_monday() as i64;
    (wanted - current).rem_euclid(7)
}

/// Upcoming occurrence of `target`, today included
pub fn upcoming_weekday(today: NaiveDate, target: Weekday) -> NaiveDate {
    today + Duration::days(days_until(today, target))
}

/// First occurrence of `target` strictly after today
pub fn next_weekday(today: NaiveDate, target: Weekday) -> NaiveDate {
    match days_until(today, target) {
        0 => today + Duration::days(7),
        n => today + Duration::days(n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_sanitize_user_input() {
        assert_eq!(sanitize_user_input("Call John\u{0000} tomorrow"), "Call John tomorrow");
        assert_eq!(sanitize_user_input("Lunch\nmeeting"), "Lunch\nmeeting");
    }

    #[test]
    fn test_convert_to_24_hour() {
        let cases = vec![
            (2, 0, "pm", Some((14, 0))),
            (12, 0, "am", Some((0, 0))),
            (12, 0, "pm", Some((12, 0))),
            (11, 45, "AM", Some((11, 45))),
            (13, 0, "pm", None),
            (0, 0, "am", None),
            (3, 60, "pm", None),
        ];
        for (hour, minute, meridiem, expected) in cases {
            let expected = expected.map(|(h, m)| NaiveTime::from_hms_opt(h, m, 0).unwrap());
            assert_eq!(
                convert_to_24_hour(hour, minute, meridiem),
                expected,
                "Failed for {}:{} {}",
                hour,
                minute,
                meridiem
            );
        }
    }

    #[test]
    fn test_parse_weekday_defaults_to_monday() {
        assert_eq!(parse_weekday("Friday"), Weekday::Fri);
        assert_eq!(parse_weekday("thurs"), Weekday::Thu);
        assert_eq!(parse_weekday("someday"), Weekday::Mon);
    }

    #[test]
    fn test_parse_month() {
        assert_eq!(parse_month("Dec"), Some(12));
        assert_eq!(parse_month("september"), Some(9));
        assert_eq!(parse_month("sept"), Some(9));
        assert_eq!(parse_month("xy"), None);
    }

    #[test]
    fn test_weekday_resolution() {
        // 2025-12-17 is a Wednesday
        let wednesday = date(2025, 12, 17);
        assert_eq!(upcoming_weekday(wednesday, Weekday::Wed), wednesday);
        assert_eq!(next_weekday(wednesday, Weekday::Wed), date(2025, 12, 24));
        assert_eq!(upcoming_weekday(wednesday, Weekday::Fri), date(2025, 12, 19));
        assert_eq!(next_weekday(wednesday, Weekday::Fri), date(2025, 12, 19));
        assert_eq!(upcoming_weekday(wednesday, Weekday::Mon), date(2025, 12, 22));
    }
}
