//! Core types produced by the task parser
//!
//! `ParsedTask` is the value returned by every call to `parse`. It carries no
//! identity and is discarded once the caller has copied what it needs.

use chrono::{Datelike, Duration, Months, NaiveDate, NaiveDateTime, Weekday};
use serde::{Serialize, Serializer};
use std::fmt;
use std::ops::Range;

/// A value extracted by one stage together with the byte range it consumed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match<T> {
    pub value: T,
    pub span: Range<usize>,
}

impl<T> Match<T> {
    pub fn new(value: T, span: Range<usize>) -> Self {
        Self { value, span }
    }
}

/// Result of parsing a free-text task title
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedTask {
    pub clean_title: String,
    pub due_date: Option<NaiveDate>,
    pub scheduled_time: Option<NaiveDateTime>,
    pub scheduled_end_time: Option<NaiveDateTime>,
    pub duration_seconds: Option<i64>,
    /// 0 = none, 1 = low, 2 = medium, 3 = high
    pub priority: u8,
    pub list_hint: Option<String>,
    pub is_deadline_only: bool,
    pub recurrence: Option<RecurrenceRule>,
    pub suggestions: Vec<Suggestion>,
}

impl ParsedTask {
    /// Fresh accumulator for one call to `parse`
    pub fn new(title: &str) -> Self {
        Self { clean_title: title.to_string(), ..Default::default() }
    }

    /// True when nothing besides the title was extracted
    pub fn is_plain(&self) -> bool {
        self.due_date.is_none()
            && self.scheduled_time.is_none()
            && self.duration_seconds.is_none()
            && self.priority == 0
            && self.list_hint.is_none()
            && self.recurrence.is_none()
    }

    pub fn priority_level(&self) -> Priority {
        Priority::from_level(self.priority)
    }
}

/// Priority levels as understood by the task-creation consumer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    #[default]
    None,
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn from_level(level: u8) -> Self {
        match level {
            0 => Priority::None,
            1 => Priority::Low,
            2 => Priority::Medium,
            _ => Priority::High,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Priority::None => "No priority",
            Priority::Low => "Low priority",
            Priority::Medium => "Medium priority",
            Priority::High => "High priority",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Weekdays,
    Weekends,
}

/// A repeating schedule: frequency, interval and optional day pins
///
/// `weekdays` only carries meaning for `Frequency::Weekly` and `day_of_month`
/// only for `Frequency::Monthly`. The constructors keep it that way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurrenceRule {
    pub frequency: Frequency,
    pub interval: u32,
    /// Serialized as weekday numbers, Sunday = 1
    #[serde(serialize_with = "serialize_weekday_numbers")]
    pub weekdays: Option<Vec<Weekday>>,
    pub day_of_month: Option<u32>,
}

impl RecurrenceRule {
    pub fn new(frequency: Frequency) -> Self {
        Self { frequency, interval: 1, weekdays: None, day_of_month: None }
    }

    pub fn every(frequency: Frequency, interval: u32) -> Self {
        Self { interval: interval.max(1), ..Self::new(frequency) }
    }

    pub fn weekly_on(day: Weekday) -> Self {
        Self { weekdays: Some(vec![day]), ..Self::new(Frequency::Weekly) }
    }

    pub fn monthly_on(day: u32) -> Self {
        Self { day_of_month: Some(day), ..Self::new(Frequency::Monthly) }
    }

    /// Human-readable label, derived on demand
    pub fn label(&self) -> String {
        let unit = match self.frequency {
            Frequency::Daily => "day",
            Frequency::Weekly => "week",
            Frequency::Monthly => "month",
            Frequency::Yearly => "year",
            Frequency::Weekdays => return "Every weekday".to_string(),
            Frequency::Weekends => return "Every weekend".to_string(),
        };

        if let (Frequency::Weekly, Some(days)) = (self.frequency, &self.weekdays) {
            let names: Vec<&str> = days.iter().map(|d| weekday_name(*d)).collect();
            return if self.interval > 1 {
                format!("Every {} weeks on {}", self.interval, names.join(", "))
            } else {
                format!("Every {}", names.join(", "))
            };
        }

        if let (Frequency::Monthly, Some(day)) = (self.frequency, self.day_of_month) {
            return format!("Monthly on the {}", ordinal(day));
        }

        match (self.frequency, self.interval) {
            (Frequency::Daily, 1) => "Daily".to_string(),
            (Frequency::Weekly, 1) => "Weekly".to_string(),
            (Frequency::Monthly, 1) => "Monthly".to_string(),
            (Frequency::Yearly, 1) => "Yearly".to_string(),
            (_, n) => format!("Every {} {}s", n, unit),
        }
    }

    /// RFC 5545 RRULE body, e.g. `FREQ=WEEKLY;INTERVAL=2;BYDAY=MO`
    pub fn to_rrule(&self) -> String {
        let freq = match self.frequency {
            Frequency::Daily => "DAILY",
            Frequency::Weekly | Frequency::Weekdays | Frequency::Weekends => "WEEKLY",
            Frequency::Monthly => "MONTHLY",
            Frequency::Yearly => "YEARLY",
        };
        let mut parts = vec![format!("FREQ={}", freq)];
        if self.interval > 1 {
            parts.push(format!("INTERVAL={}", self.interval));
        }

        let days: Option<Vec<Weekday>> = match self.frequency {
            Frequency::Weekdays => Some(vec![
                Weekday::Mon,
                Weekday::Tue,
                Weekday::Wed,
                Weekday::Thu,
                Weekday::Fri,
            ]),
            Frequency::Weekends => Some(vec![Weekday::Sat, Weekday::Sun]),
            Frequency::Weekly => self.weekdays.clone(),
            _ => None,
        };
        if let Some(days) = days {
            let codes: Vec<&str> = days.iter().map(|d| rrule_day_code(*d)).collect();
            parts.push(format!("BYDAY={}", codes.join(",")));
        }
        if let (Frequency::Monthly, Some(day)) = (self.frequency, self.day_of_month) {
            parts.push(format!("BYMONTHDAY={}", day));
        }
        parts.join(";")
    }

    /// First day strictly after `after` on which this rule fires
    ///
    /// Unpinned rules step `interval` units from `after`. Monthly rules pinned to
    /// a day that a month lacks (e.g. the 31st) land on that month's last day.
    /// Results past chrono's calendar saturate at `NaiveDate::MAX`.
    pub fn next_occurrence(&self, after: NaiveDate) -> NaiveDate {
        let interval = self.interval.max(1);
        match self.frequency {
            Frequency::Daily => add_days(after, interval as i64),
            Frequency::Weekdays => next_matching(after, |d| !matches!(d, Weekday::Sat | Weekday::Sun)),
            Frequency::Weekends => next_matching(after, |d| matches!(d, Weekday::Sat | Weekday::Sun)),
            Frequency::Weekly => match &self.weekdays {
                Some(days) if !days.is_empty() => {
                    // Remaining pinned days in the current week first, then jump
                    // `interval` weeks ahead to the first pinned day.
                    let week_start = add_days(after, -(after.weekday().num_days_from_monday() as i64));
                    let mut sorted: Vec<u32> =
                        days.iter().map(|d| d.num_days_from_monday()).collect();
                    sorted.sort_unstable();
                    let current = after.weekday().num_days_from_monday();
                    if let Some(next) = sorted.iter().find(|d| **d > current) {
                        return add_days(week_start, *next as i64);
                    }
                    add_days(week_start, 7 * interval as i64 + sorted[0] as i64)
                }
                _ => add_days(after, 7 * interval as i64),
            },
            Frequency::Monthly => match self.day_of_month {
                Some(day) => {
                    let this_month = clamp_day(after.year(), after.month(), day);
                    if this_month > after {
                        return this_month;
                    }
                    NaiveDate::from_ymd_opt(after.year(), after.month(), 1)
                        .and_then(|first| first.checked_add_months(Months::new(interval)))
                        .map_or(NaiveDate::MAX, |first| clamp_day(first.year(), first.month(), day))
                }
                None => after.checked_add_months(Months::new(interval)).unwrap_or(NaiveDate::MAX),
            },
            Frequency::Yearly => after
                .checked_add_months(Months::new(interval.saturating_mul(12)))
                .unwrap_or(NaiveDate::MAX),
        }
    }
}

/// First day within the following week whose weekday satisfies `accept`
fn next_matching(after: NaiveDate, accept: impl Fn(Weekday) -> bool) -> NaiveDate {
    (1..=7)
        .map(|n| add_days(after, n))
        .find(|day| accept(day.weekday()))
        .unwrap_or(NaiveDate::MAX)
}

fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    Duration::try_days(days)
        .and_then(|delta| date.checked_add_signed(delta))
        .unwrap_or(if days < 0 { NaiveDate::MIN } else { NaiveDate::MAX })
}

impl fmt::Display for RecurrenceRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    Date,
    Time,
    Duration,
    Priority,
    List,
    Recurrence,
}

/// Display-only confirmation chip for one extracted attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    #[serde(rename = "type")]
    pub kind: SuggestionKind,
    pub text: String,
    pub icon: String,
}

impl Suggestion {
    pub fn new(kind: SuggestionKind, text: impl Into<String>) -> Self {
        let icon = match kind {
            SuggestionKind::Date => "calendar",
            SuggestionKind::Time => "clock",
            SuggestionKind::Duration => "timer",
            SuggestionKind::Priority => "flag",
            SuggestionKind::List => "list.bullet",
            SuggestionKind::Recurrence => "repeat",
        };
        Self { kind, text: text.into(), icon: icon.to_string() }
    }
}

fn serialize_weekday_numbers<S>(days: &Option<Vec<Weekday>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    days.as_ref()
        .map(|days| days.iter().map(|d| weekday_number(*d)).collect::<Vec<u8>>())
        .serialize(serializer)
}

/// Sunday = 1 ... Saturday = 7
pub fn weekday_number(day: Weekday) -> u8 {
    day.number_from_sunday() as u8
}

/// Inverse of `weekday_number`; out-of-range numbers fall back to Monday
pub fn weekday_from_number(number: u8) -> Weekday {
    match number {
        1 => Weekday::Sun,
        2 => Weekday::Mon,
        3 => Weekday::Tue,
        4 => Weekday::Wed,
        5 => Weekday::Thu,
        6 => Weekday::Fri,
        7 => Weekday::Sat,
        _ => Weekday::Mon,
    }
}

pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

fn rrule_day_code(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "MO",
        Weekday::Tue => "TU",
        Weekday::Wed => "WE",
        Weekday::Thu => "TH",
        Weekday::Fri => "FR",
        Weekday::Sat => "SA",
        Weekday::Sun => "SU",
    }
}

fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}

fn clamp_day(year: i32, month: u32, day: u32) -> NaiveDate {
    (1..=day.min(31))
        .rev()
        .find_map(|d| NaiveDate::from_ymd_opt(year, month, d))
        .unwrap_or(NaiveDate::MIN)
}
