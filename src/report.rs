//! Terminal and JSON rendering of a parse result

use crate::parser::{ParsedTask, SuggestionKind};
use anyhow::Result;
use serde::Serialize;

/// A parsed task plus the list its hint resolved to, if any
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report<'a> {
    #[serde(flatten)]
    pub task: &'a ParsedTask,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_list: Option<&'a str>,
}

impl<'a> Report<'a> {
    pub fn new(task: &'a ParsedTask, resolved_list: Option<&'a str>) -> Self {
        Self { task, resolved_list }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_text(&self) -> String {
        let mut lines = vec![format!("Title: {}", self.task.clean_title)];

        for suggestion in &self.task.suggestions {
            let label = match suggestion.kind {
                SuggestionKind::Date => "Date",
                SuggestionKind::Time => "Time",
                SuggestionKind::Duration => "Duration",
                SuggestionKind::Priority => "Priority",
                SuggestionKind::List => "List",
                SuggestionKind::Recurrence => "Repeats",
            };
            let mut line = format!("  {:<9} {}", format!("{}:", label), suggestion.text);
            if suggestion.kind == SuggestionKind::List {
                if let Some(list) = self.resolved_list {
                    line.push_str(&format!(" -> {}", list));
                }
            }
            lines.push(line);
        }

        if let Some(rule) = &self.task.recurrence {
            lines.push(format!("  {:<9} {}", "RRULE:", rule.to_rrule()));
        }
        if self.task.is_deadline_only {
            lines.push("  (deadline)".to_string());
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{parse, ParseContext};
    use chrono::NaiveDate;

    fn ctx() -> ParseContext {
        ParseContext::new(NaiveDate::from_ymd_opt(2025, 12, 17).unwrap().and_hms_opt(9, 0, 0).unwrap())
    }

    #[test]
    fn test_text_report() {
        let task = parse("Submit report tomorrow 3-4pm !!! #work", &ctx());
        let text = Report::new(&task, Some("Work")).to_text();
        assert_eq!(
            text,
            "Title: Submit report\n  Date:     Tomorrow\n  Time:     3:00 PM - 4:00 PM\n  Priority: High priority\n  List:     #work -> Work"
        );
    }

    #[test]
    fn test_text_report_recurrence_and_deadline() {
        let task = parse("Standup every monday at 9am", &ctx());
        let text = Report::new(&task, None).to_text();
        assert!(text.contains("Repeats:  Every Monday"));
        assert!(text.contains("RRULE:    FREQ=WEEKLY;BYDAY=MO"));
        assert!(text.ends_with("(deadline)"));
    }

    #[test]
    fn test_json_report() -> Result<()> {
        let task = parse("Buy milk #groceries", &ctx());
        let json: serde_json::Value = serde_json::from_str(&Report::new(&task, Some("Groceries")).to_json()?)?;
        assert_eq!(json["cleanTitle"], "Buy milk");
        assert_eq!(json["listHint"], "groceries");
        assert_eq!(json["resolvedList"], "Groceries");
        assert_eq!(json["suggestions"][0]["type"], "list");

        let plain = parse("Buy milk", &ctx());
        let json: serde_json::Value = serde_json::from_str(&Report::new(&plain, None).to_json()?)?;
        assert!(json.get("resolvedList").is_none());
        Ok(())
    }
}
