//! Smart defaults: reconcile a time without a date, and re-anchor times that
//! were provisionally placed on today once a real date is known.

use super::types::ParsedTask;
use chrono::{Duration, NaiveDateTime};
use log::debug;

pub fn resolve_defaults(mut task: ParsedTask, now: NaiveDateTime) -> ParsedTask {
    let Some(start) = task.scheduled_time else {
        return task;
    };

    match task.due_date {
        None => {
            // Times are anchored to today during extraction
            let today = now.date();
            let offset = (today - start.date()).num_days();
            let today_at = start + Duration::days(offset);
            if today_at < now {
                debug!("{} has already passed, moving to tomorrow", today_at);
                task.due_date = today.succ_opt();
                shift(&mut task, offset + 1);
            } else {
                task.due_date = Some(today);
                shift(&mut task, offset);
            }
        }
        Some(due) => {
            let offset = (due - start.date()).num_days();
            if offset != 0 {
                debug!("Re-anchoring scheduled time onto {}", due);
            }
            shift(&mut task, offset);
        }
    }
    task
}

/// Move start and end by the same number of days, keeping the clock time
fn shift(task: &mut ParsedTask, days: i64) {
    if days == 0 {
        return;
    }
    let delta = Duration::days(days);
    task.scheduled_time = task.scheduled_time.map(|t| t + delta);
    task.scheduled_end_time = task.scheduled_end_time.map(|t| t + delta);
}
