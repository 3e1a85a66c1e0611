//! Time range extraction ("2-3pm", "from 9 to 11am", "between 1 and 2:30pm")
//!
//! The end of a range must carry am/pm. A start without a marker borrows the
//! end's marker, so "2-3pm" reads as 14:00-15:00.

use super::types::Match;
use super::utils::{capture_u32, convert_to_24_hour};
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use log::debug;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::ops::Range;

/// Start and end anchored to a day; `end` may fall on the next day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl TimeRange {
    pub fn duration_seconds(&self) -> i64 {
        (self.end - self.start).num_seconds()
    }
}

const START: &str = r"(\d{1,2})(?::(\d{2}))?\s*(am|pm)?";
const END: &str = r"(\d{1,2})(?::(\d{2}))?\s*(am|pm)";

static RANGE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        format!(r"(?i)\b{}\s*[-–]\s*{}\b", START, END),
        format!(r"(?i)\bfrom\s+{}\s+to\s+{}\b", START, END),
        format!(r"(?i)\bbetween\s+{}\s+and\s+{}\b", START, END),
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Outcome of scanning for a time range
///
/// `rejected` holds candidates that looked like a range but did not resolve
/// ("3pm-3pm"). Later stages must not pick them apart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RangeScan {
    pub found: Option<Match<TimeRange>>,
    pub rejected: Vec<Range<usize>>,
}

/// Find the first time range in `text`, anchored to `day`
pub fn extract_time_range(text: &str, day: NaiveDate) -> RangeScan {
    let mut scan = RangeScan::default();
    for re in RANGE_PATTERNS.iter() {
        for caps in re.captures_iter(text) {
            let Some(whole) = caps.get(0) else { continue };
            match resolve(&caps, day) {
                Some(range) => {
                    debug!(
                        "Matched time range '{}' -> {} to {}",
                        whole.as_str(),
                        range.start.time(),
                        range.end.time()
                    );
                    scan.found = Some(Match::new(range, whole.range()));
                    return scan;
                }
                None => {
                    debug!("Rejected time range candidate '{}'", whole.as_str());
                    scan.rejected.push(whole.range());
                }
            }
        }
    }
    scan
}

fn resolve(caps: &Captures, day: NaiveDate) -> Option<TimeRange> {
    let end_meridiem = caps.get(6)?.as_str();
    let start_meridiem = caps.get(3).map_or(end_meridiem, |m| m.as_str());

    let start = convert_to_24_hour(capture_u32(caps, 1), capture_u32(caps, 2), start_meridiem)?;
    let end = convert_to_24_hour(capture_u32(caps, 4), capture_u32(caps, 5), end_meridiem)?;
    anchor(start, end, day)
}

/// Anchor both times to `day`. An end before the start wraps past midnight; an
/// empty range is rejected.
pub fn anchor(start: NaiveTime, end: NaiveTime, day: NaiveDate) -> Option<TimeRange> {
    if start == end {
        return None;
    }
    let start_at = day.and_time(start);
    let mut end_at = day.and_time(end);
    if end_at < start_at {
        end_at += Duration::days(1);
    }
    Some(TimeRange { start: start_at, end: end_at })
}
