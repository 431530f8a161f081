//! Display strings derived from tasks
//!
//! Nothing in here mutates a task: labels are computed at render time, relative to the date the caller considers as "today".

use std::borrow::Cow;

use chrono::{NaiveDate, NaiveTime};

use crate::task::TIME_FORMAT;

/// Long-form date, e.g. `Thursday, January 1, 2099`
pub const LONG_DATE_FORMAT: &str = "%A, %B %-d, %Y";

/// `Today`, `Tomorrow`, or the long-form date
pub fn date_label(date: NaiveDate, today: NaiveDate) -> String {
    if date == today {
        return "Today".to_string();
    }
    if today.succ_opt() == Some(date) {
        return "Tomorrow".to_string();
    }
    date.format(LONG_DATE_FORMAT).to_string()
}

/// Describes the time range of a task. This is empty when no time is set
pub fn time_label(start: Option<NaiveTime>, end: Option<NaiveTime>) -> String {
    match (start, end) {
        (Some(start), Some(end)) => format!("{} - {}", start.format(TIME_FORMAT), end.format(TIME_FORMAT)),
        (Some(start), None) => format!("Starts at {}", start.format(TIME_FORMAT)),
        (None, Some(end)) => format!("Ends at {}", end.format(TIME_FORMAT)),
        (None, None) => String::new(),
    }
}

/// `1 task`, `2 tasks`...
pub fn task_count_label(count: usize) -> String {
    match count {
        1 => "1 task".to_string(),
        n => format!("{} tasks", n),
    }
}

/// Label of the button that toggles the completion
pub fn completion_action_label(completed: bool) -> &'static str {
    match completed {
        true => "Undo",
        false => "Complete",
    }
}

/// Escape text before it is embedded into markup
pub fn escape_html(unsafe_text: &str) -> Cow<'_, str> {
    if unsafe_text.contains(|c: char| matches!(c, '&' | '<' | '>' | '"' | '\'')) == false {
        return Cow::Borrowed(unsafe_text);
    }

    let mut escaped = String::with_capacity(unsafe_text.len() + 16);
    for c in unsafe_text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            other => escaped.push(other),
        }
    }
    Cow::Owned(escaped)
}
