//! Suggestion chips: one human-readable confirmation per extracted attribute
//!
//! Chips always come out in field order (date, time, duration, priority, list,
//! recurrence), whatever order the phrases had in the input.

use super::types::{ParsedTask, Suggestion, SuggestionKind};
use crate::config::DisplayConfig;
use chrono::{NaiveDate, NaiveTime};
use std::fmt::{self, Write};

pub fn build_suggestions(task: &ParsedTask, today: NaiveDate, display: &DisplayConfig) -> Vec<Suggestion> {
    let mut suggestions = Vec::new();

    if let Some(date) = task.due_date {
        suggestions.push(Suggestion::new(SuggestionKind::Date, format_date(date, today, display)));
    }

    if let Some(start) = task.scheduled_time {
        let text = match task.scheduled_end_time {
            Some(end) => format!(
                "{} - {}",
                format_time(start.time(), display),
                format_time(end.time(), display)
            ),
            None => format_time(start.time(), display),
        };
        suggestions.push(Suggestion::new(SuggestionKind::Time, text));
    }

    // A time range chip already conveys the length
    if let (Some(seconds), None) = (task.duration_seconds, task.scheduled_end_time) {
        suggestions.push(Suggestion::new(SuggestionKind::Duration, format_duration(seconds)));
    }

    if task.priority > 0 {
        suggestions.push(Suggestion::new(SuggestionKind::Priority, task.priority_level().label()));
    }

    if let Some(list) = &task.list_hint {
        suggestions.push(Suggestion::new(SuggestionKind::List, format!("#{}", list)));
    }

    if let Some(rule) = &task.recurrence {
        suggestions.push(Suggestion::new(SuggestionKind::Recurrence, rule.label()));
    }

    suggestions
}

pub fn format_date(date: NaiveDate, today: NaiveDate, display: &DisplayConfig) -> String {
    if display.relative_day_labels {
        if date == today {
            return "Today".to_string();
        }
        if today.succ_opt() == Some(date) {
            return "Tomorrow".to_string();
        }
    }
    render(date.format(&display.date_format), || date.format("%Y-%m-%d").to_string())
}

pub fn format_time(time: NaiveTime, display: &DisplayConfig) -> String {
    render(time.format(&display.time_format), || time.format("%H:%M").to_string())
}

/// "1h 30m" for mixed values, "2 hours" for whole hours, "45 min" below an hour
pub fn format_duration(seconds: i64) -> String {
    let minutes = seconds / 60;
    let (hours, rest) = (minutes / 60, minutes % 60);
    match (hours, rest) {
        (0, m) => format!("{} min", m),
        (1, 0) => "1 hour".to_string(),
        (h, 0) => format!("{} hours", h),
        (h, m) => format!("{}h {}m", h, m),
    }
}

/// Render a chrono format, falling back when the pattern cannot be rendered
fn render(formatted: impl fmt::Display, fallback: impl FnOnce() -> String) -> String {
    let mut out = String::new();
    match write!(out, "{}", formatted) {
        Ok(()) => out,
        Err(_) => fallback(),
    }
}
