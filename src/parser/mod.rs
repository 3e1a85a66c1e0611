//! Natural language task parser
//!
//! Turns a free-text title such as "Call mom tomorrow 3-4pm !urgent #family"
//! into a `ParsedTask`. Stages run in a fixed order and each one only sees the
//! text earlier stages left unclaimed:
//!
//! 1. recurrence
//! 2. time range
//! 3. duration
//! 4. time of day, then date
//! 5. priority
//! 6. list hint
//! 7. smart defaults
//! 8. title cleanup
//! 9. suggestion chips
//!
//! Parsing never fails. Anything a stage cannot read stays in the title.

pub mod datetime;
pub mod defaults;
pub mod duration;
pub mod list_hint;
pub mod priority;
pub mod recurrence;
pub mod spans;
pub mod suggestions;
pub mod time_range;
pub mod types;
pub mod utils;

pub use types::{
    Frequency, Match, ParsedTask, Priority, RecurrenceRule, Suggestion, SuggestionKind,
    weekday_from_number, weekday_number,
};

use crate::clock::{Clock, SystemClock};
use crate::config::{Config, DisplayConfig};
use chrono::{Duration, NaiveDateTime};
use log::debug;
use spans::Spans;

/// Everything a parse depends on besides the input text
#[derive(Debug, Clone)]
pub struct ParseContext {
    pub now: NaiveDateTime,
    pub display: DisplayConfig,
    pub smart_defaults: bool,
}

impl ParseContext {
    pub fn new(now: NaiveDateTime) -> Self {
        Self { now, display: DisplayConfig::default(), smart_defaults: true }
    }

    pub fn with_config(now: NaiveDateTime, config: &Config) -> Self {
        Self {
            now,
            display: config.display.clone(),
            smart_defaults: config.parser.smart_defaults,
        }
    }
}

/// Parse `input` against the reference instant in `ctx`
pub fn parse(input: &str, ctx: &ParseContext) -> ParsedTask {
    let input = utils::sanitize_user_input(input);
    let mut spans = Spans::new(&input);
    let mut task = ParsedTask::new(&input);
    let today = ctx.now.date();
    debug!("Parsing '{}' at {}", input, ctx.now);

    if let Some(m) = recurrence::extract_recurrence(&spans.masked()) {
        task.recurrence = Some(m.value);
        spans.consume(m.span);
    }

    let ranges = time_range::extract_time_range(&spans.masked(), today);
    // Near-miss ranges ("3pm-3pm") stay in the title as a unit
    for span in ranges.rejected {
        spans.shield(span);
    }
    if let Some(m) = ranges.found {
        task.scheduled_time = Some(m.value.start);
        task.scheduled_end_time = Some(m.value.end);
        task.duration_seconds = Some(m.value.duration_seconds());
        spans.consume(m.span);
    }

    if task.duration_seconds.is_none() {
        if let Some(m) = duration::extract_duration(&spans.masked()) {
            task.duration_seconds = Some(m.value);
            task.scheduled_end_time = task.scheduled_time.and_then(|start| end_after(start, m.value));
            spans.consume(m.span);
        }
    }

    if task.scheduled_time.is_none() {
        if let Some(m) = datetime::extract_time(&spans.masked()) {
            let start = today.and_time(m.value);
            task.scheduled_time = Some(start);
            task.scheduled_end_time = task.duration_seconds.and_then(|secs| end_after(start, secs));
            spans.consume(m.span);
        }
    }

    if task.due_date.is_none() {
        if let Some(m) = datetime::extract_date(&spans.masked(), today) {
            task.due_date = Some(m.value);
            spans.consume(m.span);
        }
    }

    if let Some(m) = priority::extract_priority(&spans.masked()) {
        task.priority = m.value;
        spans.consume(m.span);
    }

    if let Some(m) = list_hint::extract_list_hint(&spans.masked()) {
        task.list_hint = Some(m.value);
        spans.consume(m.span);
    }

    if ctx.smart_defaults {
        task = defaults::resolve_defaults(task, ctx.now);
    }

    task.is_deadline_only = task.scheduled_time.is_some()
        && task.scheduled_end_time.is_none()
        && task.duration_seconds.is_none();
    task.clean_title = spans.finish();
    task.suggestions = suggestions::build_suggestions(&task, today, &ctx.display);

    debug!("Parsed '{}' -> title '{}'", input, task.clean_title);
    task
}

/// `start` plus `seconds`, or `None` when that leaves chrono's range
fn end_after(start: NaiveDateTime, seconds: i64) -> Option<NaiveDateTime> {
    Duration::try_seconds(seconds).and_then(|delta| start.checked_add_signed(delta))
}

/// Parser bound to a configuration and a clock
pub struct TaskParser {
    config: Config,
    clock: Box<dyn Clock>,
}

impl TaskParser {
    pub fn new(config: Config, clock: Box<dyn Clock>) -> Self {
        Self { config, clock }
    }

    pub fn with_system_clock(config: Config) -> Self {
        Self::new(config, Box::new(SystemClock))
    }

    /// Build the context for a parse happening right now
    pub fn context(&self) -> ParseContext {
        ParseContext::with_config(self.clock.now(), &self.config)
    }

    pub fn parse(&self, input: &str) -> ParsedTask {
        parse(input, &self.context())
    }
}

impl Default for TaskParser {
    fn default() -> Self {
        Self::with_system_clock(Config::default())
    }
}
