//! Renders grouped tasks into HTML markup
//!
//! Task names and descriptions are escaped here, and only here. The store keeps the raw values.

use chrono::NaiveDate;

use crate::format::{completion_action_label, date_label, escape_html, task_count_label, time_label};
use crate::grouping::Bucket;
use crate::task::Task;

/// Render every bucket as a `date-section`.
///
/// This returns an empty string when there are no buckets, so that the UI can display its empty state instead.
pub fn render(buckets: &[Bucket<'_>], today: NaiveDate) -> String {
    buckets.iter()
        .map(|bucket| render_date_section(bucket, today))
        .collect()
}

/// Render a bucket: a header with its date and task count, and the list of its task cards
pub fn render_date_section(bucket: &Bucket<'_>, today: NaiveDate) -> String {
    let mut section = String::new();
    section.push_str(r#"<div class="date-section">"#);
    section.push_str(&format!(
        r#"<div class="date-header"><span class="date-label">{}</span><span class="task-count">{}</span></div>"#,
        date_label(bucket.date(), today),
        task_count_label(bucket.len()),
    ));
    section.push_str(r#"<div class="task-list">"#);
    for task in bucket.tasks() {
        section.push_str(&render_task_card(task));
    }
    section.push_str("</div></div>");
    section
}

pub fn render_task_card(task: &Task) -> String {
    let class = match task.completed() {
        true => "task-card completed",
        false => "task-card",
    };

    let mut card = format!(r#"<div class="{}" data-task-id="{}">"#, class, escape_html(task.id().as_str()));
    card.push_str(&format!(
        r#"<div class="task-header"><div class="task-name">{}</div><span class="priority-badge priority-{}">{}</span></div>"#,
        escape_html(task.name()),
        task.priority().as_str(),
        task.priority().label(),
    ));

    let time = time_label(task.start_time(), task.end_time());
    if time.is_empty() == false {
        card.push_str(&format!(r#"<div class="task-time">{}</div>"#, time));
    }
    if task.description().is_empty() == false {
        card.push_str(&format!(r#"<div class="task-description">{}</div>"#, escape_html(task.description())));
    }

    card.push_str(&format!(
        r#"<div class="task-actions"><button class="btn-small btn-complete">{}</button><button class="btn-small btn-edit">Edit</button><button class="btn-small btn-delete">Delete</button></div>"#,
        completion_action_label(task.completed()),
    ));
    card.push_str("</div>");
    card
}
