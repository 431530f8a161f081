//! Dated to-do tasks

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use chrono::{DateTime, NaiveDate, NaiveTime, SecondsFormat, SubsecRound, Utc};

use crate::error::ValidationError;

/// Format of the ISO dates, as they are stored and entered in forms
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// Format of the times of day, as they are stored and entered in forms
pub const TIME_FORMAT: &str = "%H:%M";


/// The unique and immutable identifier of a [`Task`]
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId {
    content: String,
}

impl TaskId {
    /// Generate a random TaskId.
    pub fn random() -> Self {
        let random = uuid::Uuid::new_v4().to_hyphenated().to_string();
        Self { content: random }
    }

    pub fn as_str(&self) -> &str {
        &self.content
    }
}

impl From<String> for TaskId {
    fn from(content: String) -> Self {
        Self { content }
    }
}
impl From<&str> for TaskId {
    fn from(content: &str) -> Self {
        Self { content: content.to_string() }
    }
}

impl Display for TaskId {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.content)
    }
}



/// How important a task is
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

impl Priority {
    /// The value used in storage and in markup class names
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    /// The capitalized name, suited for display
    pub fn label(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }
}



/// User-supplied task data, before validation and ID assignment
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TaskDraft {
    pub name: String,
    /// `None` means "today" for a new task, and "unchanged" for an updated task
    pub date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub description: String,
    pub priority: Priority,
}

/// Raw form fields, as typed by the user.
///
/// Empty strings stand for missing values.
#[derive(Clone, Copy, Debug, Default)]
pub struct FormFields<'a> {
    pub name: &'a str,
    pub date: &'a str,
    pub start_time: &'a str,
    pub end_time: &'a str,
    pub description: &'a str,
    pub priority: Priority,
}

impl TaskDraft {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self { name: name.into(), ..Self::default() }
    }

    pub fn on(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn starting_at(mut self, time: NaiveTime) -> Self {
        self.start_time = Some(time);
        self
    }

    pub fn ending_at(mut self, time: NaiveTime) -> Self {
        self.end_time = Some(time);
        self
    }

    pub fn with_description<S: Into<String>>(mut self, description: S) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Build a draft from raw form fields.
    ///
    /// This only parses the fields. Business rules are checked by [`crate::validation::validate`]
    pub fn from_form(fields: FormFields<'_>) -> Result<Self, ValidationError> {
        let date = match fields.date.trim() {
            "" => None,
            s => Some(NaiveDate::parse_from_str(s, DATE_FORMAT)
                .map_err(|_| ValidationError::InvalidDate(s.to_string()))?),
        };

        Ok(Self {
            name: fields.name.to_string(),
            date,
            start_time: parse_time(fields.start_time)?,
            end_time: parse_time(fields.end_time)?,
            description: fields.description.to_string(),
            priority: fields.priority,
        })
    }

    /// Returns a copy with trimmed text fields
    pub fn normalized(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            ..self.clone()
        }
    }
}

/// Parse an optional `HH:MM` time of day. Empty strings mean `None`
pub fn parse_time(s: &str) -> Result<Option<NaiveTime>, ValidationError> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(None);
    }
    // Only zero-padded `HH:MM` is accepted, so that storing a time gives back the same text
    if s.len() != 5 {
        return Err(ValidationError::InvalidTime(s.to_string()));
    }
    NaiveTime::parse_from_str(s, TIME_FORMAT)
        .map(Some)
        .map_err(|_| ValidationError::InvalidTime(s.to_string()))
}



/// The creation timestamp of a task.
///
/// The text it has been loaded from is kept, so that saving a loaded task writes it back unchanged.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreationDate {
    value: DateTime<Utc>,
    text: String,
}

impl CreationDate {
    pub fn value(&self) -> &DateTime<Utc> { &self.value }
    pub fn as_str(&self) -> &str          { &self.text  }
}

impl From<DateTime<Utc>> for CreationDate {
    /// Uses the millisecond precision and the `Z` suffix of JavaScript's `toISOString`
    fn from(value: DateTime<Utc>) -> Self {
        let value = value.trunc_subsecs(3);
        let text = value.to_rfc3339_opts(SecondsFormat::Millis, true);
        Self { value, text }
    }
}

impl Serialize for CreationDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.text)
    }
}

impl<'de> Deserialize<'de> for CreationDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        let value = DateTime::parse_from_rfc3339(&text)
            .map_err(serde::de::Error::custom)?
            .with_timezone(&Utc);
        Ok(Self { value, text })
    }
}



/// A to-do task
///
/// Stored fields that this crate does not know about are kept as-is, and written back when the task is saved.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    id: TaskId,
    name: String,
    date: NaiveDate,
    #[serde(default, with = "optional_time")]
    start_time: Option<NaiveTime>,
    #[serde(default, with = "optional_time")]
    end_time: Option<NaiveTime>,
    #[serde(default, deserialize_with = "nullable_string")]
    description: String,
    #[serde(default)]
    priority: Priority,
    #[serde(default)]
    completed: bool,
    created_at: CreationDate,

    #[serde(flatten)]
    extra_fields: serde_json::Map<String, serde_json::Value>,
}

impl Task {
    /// Create a brand new Task from a validated and normalized draft.
    /// This will pick a new (random) task ID.
    pub(crate) fn new(draft: TaskDraft, date: NaiveDate, created_at: DateTime<Utc>) -> Self {
        Self {
            id: TaskId::random(),
            name: draft.name,
            date,
            start_time: draft.start_time,
            end_time: draft.end_time,
            description: draft.description,
            priority: draft.priority,
            completed: false,
            created_at: CreationDate::from(created_at),
            extra_fields: serde_json::Map::new(),
        }
    }

    pub fn id(&self) -> &TaskId                 { &self.id          }
    pub fn name(&self) -> &str                  { &self.name        }
    pub fn date(&self) -> NaiveDate             { self.date         }
    pub fn start_time(&self) -> Option<NaiveTime> { self.start_time }
    pub fn end_time(&self) -> Option<NaiveTime> { self.end_time     }
    pub fn description(&self) -> &str           { &self.description }
    pub fn priority(&self) -> Priority          { self.priority     }
    pub fn completed(&self) -> bool             { self.completed    }
    pub fn created_at(&self) -> &DateTime<Utc>  { self.created_at.value() }
    pub fn creation_date(&self) -> &CreationDate { &self.created_at }
    pub fn extra_fields(&self) -> &serde_json::Map<String, serde_json::Value> { &self.extra_fields }

    /// Replace every user-editable field with the content of a validated and normalized draft.
    /// The ID, creation date and completion status are kept.
    pub(crate) fn apply_draft(&mut self, draft: TaskDraft) {
        self.name = draft.name;
        if let Some(date) = draft.date {
            self.date = date;
        }
        self.start_time = draft.start_time;
        self.end_time = draft.end_time;
        self.description = draft.description;
        self.priority = draft.priority;
    }

    pub fn set_completed(&mut self, completed: bool) {
        self.completed = completed;
    }

    /// Flip the completion status, and return the new one
    pub fn toggle_completion(&mut self) -> bool {
        self.completed = !self.completed;
        self.completed
    }
}


/// Times of day are stored as `"HH:MM"`, or as an empty string when they are not set
mod optional_time {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::TIME_FORMAT;

    pub fn serialize<S>(time: &Option<NaiveTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match time {
            Some(t) => serializer.serialize_str(&t.format(TIME_FORMAT).to_string()),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw {
            None => Ok(None),
            Some(s) => super::parse_time(&s).map_err(serde::de::Error::custom),
        }
    }
}

fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.unwrap_or_default())
}


#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn time(s: &str) -> NaiveTime {
        NaiveTime::parse_from_str(s, TIME_FORMAT).unwrap()
    }

    #[test]
    fn serde_task_uses_camel_case_and_empty_strings() {
        let date = NaiveDate::from_ymd_opt(2099, 1, 1).unwrap();
        let draft = TaskDraft::new("Buy milk").starting_at(time("09:30"));
        let task = Task::new(draft, date, Utc::now());

        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(value["name"], "Buy milk");
        assert_eq!(value["date"], "2099-01-01");
        assert_eq!(value["startTime"], "09:30");
        assert_eq!(value["endTime"], "");
        assert_eq!(value["description"], "");
        assert_eq!(value["priority"], "medium");
        assert_eq!(value["completed"], false);
        assert!(value["createdAt"].is_string());

        let retrieved: Task = serde_json::from_value(value).unwrap();
        assert_eq!(retrieved, task);
    }

    #[test]
    fn missing_optional_fields_are_normalized() {
        let json = r#"{"id":"abc","name":"Walk","date":"2099-03-04","createdAt":"2024-01-01T10:00:00Z"}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.id().as_str(), "abc");
        assert_eq!(task.start_time(), None);
        assert_eq!(task.end_time(), None);
        assert_eq!(task.description(), "");
        assert_eq!(task.priority(), Priority::Medium);
        assert_eq!(task.completed(), false);

        let json = r#"{"id":"abc","name":"Walk","date":"2099-03-04","startTime":null,"description":null,"createdAt":"2024-01-01T10:00:00Z"}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.start_time(), None);
        assert_eq!(task.description(), "");
    }

    #[test]
    fn invalid_time_is_rejected() {
        let json = r#"{"id":"abc","name":"Walk","date":"2099-03-04","startTime":"25:99","createdAt":"2024-01-01T10:00:00Z"}"#;
        assert!(serde_json::from_str::<Task>(json).is_err());
    }

    #[test]
    fn times_must_be_hours_and_minutes() {
        assert_eq!(parse_time("08:00"), Ok(Some(time("08:00"))));
        assert_eq!(parse_time(" "), Ok(None));
        for s in &["08:00:30", "8:00", "08:0"] {
            assert_eq!(parse_time(s), Err(ValidationError::InvalidTime(s.to_string())));
        }

        let json = r#"{"id":"abc","name":"Walk","date":"2099-03-04","startTime":"08:00:30","createdAt":"2024-01-01T10:00:00Z"}"#;
        assert!(serde_json::from_str::<Task>(json).is_err());
    }

    #[test]
    fn creation_date_keeps_its_text() {
        for text in &["2024-01-01T10:00:00.000Z", "2024-01-01T10:00:00Z", "2024-01-01T12:00:00+02:00"] {
            let json = format!(r#"{{"id":"a","name":"Walk","date":"2099-03-04","createdAt":"{}"}}"#, text);
            let task: Task = serde_json::from_str(&json).unwrap();
            assert_eq!(task.creation_date().as_str(), *text);
            assert_eq!(task.created_at(), &Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap());
            assert_eq!(serde_json::to_value(&task).unwrap()["createdAt"], *text);
        }

        let json = r#"{"id":"a","name":"Walk","date":"2099-03-04","createdAt":"yesterday"}"#;
        assert!(serde_json::from_str::<Task>(json).is_err());

        let now = Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap();
        assert_eq!(CreationDate::from(now).as_str(), "2024-05-06T07:08:09.000Z");
    }

    #[test]
    fn unknown_fields_are_kept() {
        let json = r#"{"id":"a","name":"Walk","date":"2099-03-04","createdAt":"2024-01-01T10:00:00Z","tags":["x"],"color":null}"#;
        let mut task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.extra_fields()["tags"], serde_json::json!(["x"]));

        task.toggle_completion();
        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(value["tags"], serde_json::json!(["x"]));
        assert_eq!(value["color"], serde_json::Value::Null);
        assert_eq!(value["completed"], true);
        assert_eq!(value.as_object().unwrap().contains_key("extraFields"), false);
    }

    #[test]
    fn draft_from_form() {
        let draft = TaskDraft::from_form(FormFields {
            name: "  Dentist ",
            date: "2099-05-06",
            start_time: "10:00",
            end_time: "",
            description: " bring card ",
            priority: Priority::High,
        }).unwrap();
        assert_eq!(draft.date, NaiveDate::from_ymd_opt(2099, 5, 6));
        assert_eq!(draft.start_time, Some(time("10:00")));
        assert_eq!(draft.end_time, None);

        let normalized = draft.normalized();
        assert_eq!(normalized.name, "Dentist");
        assert_eq!(normalized.description, "bring card");
        assert_eq!(normalized.priority, Priority::High);

        let bad_date = TaskDraft::from_form(FormFields { name: "X", date: "tomorrow", ..FormFields::default() });
        assert_eq!(bad_date, Err(ValidationError::InvalidDate("tomorrow".to_string())));
        let bad_time = TaskDraft::from_form(FormFields { name: "X", start_time: "noon", ..FormFields::default() });
        assert_eq!(bad_time, Err(ValidationError::InvalidTime("noon".to_string())));
    }

    #[test]
    fn apply_draft_keeps_identity() {
        let date = NaiveDate::from_ymd_opt(2099, 1, 1).unwrap();
        let mut task = Task::new(TaskDraft::new("Old"), date, Utc::now());
        task.set_completed(true);
        let id = task.id().clone();
        let created_at = *task.created_at();

        task.apply_draft(TaskDraft::new("New").with_priority(Priority::Low));
        assert_eq!(task.id(), &id);
        assert_eq!(task.created_at(), &created_at);
        assert_eq!(task.name(), "New");
        assert_eq!(task.date(), date);
        assert_eq!(task.priority(), Priority::Low);
        assert_eq!(task.completed(), true);
    }

    #[test]
    fn priorities_are_ordered() {
        assert!(Priority::High > Priority::Medium);
        assert!(Priority::Medium > Priority::Low);
        assert_eq!(Priority::default(), Priority::Medium);
    }
}
