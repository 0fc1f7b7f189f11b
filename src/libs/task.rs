//! Task model, filter modes and due-date helpers.
//!
//! [`Task`] mirrors one row of the remote `tasks` table. [`NewTask`] and
//! [`TaskPatch`] are the insert and update payloads; [`TaskFilter`] is the
//! pure filter view and [`DueStatus`] the overdue / days-left badge shown next
//! to active tasks.

use super::form::ValidationError;
use super::messages::Message;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Days until due at or below which an active task is flagged as urgent.
pub const URGENT_WITHIN_DAYS: i64 = 2;

/// One to-do item as stored in the remote `tasks` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Store-assigned identifier, never changes
    pub id: String,
    /// Owner, taken from the session when the task is created
    pub user_id: String,
    pub title: String,
    /// Stored as nullable; `null` reads as the empty string
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(default)]
    pub completed: bool,
    pub due_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl Task {
    /// Due date strictly in the past and not completed.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        !self.completed && self.due_date < now
    }

    /// Calendar date part of the due timestamp, as used by date inputs.
    pub fn due_date_text(&self) -> String {
        self.due_date.format("%Y-%m-%d").to_string()
    }
}

/// Insert payload. `id` and `created_at` are left to the store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewTask {
    pub user_id: String,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub due_date: DateTime<Utc>,
}

impl NewTask {
    pub fn new(user_id: &str, title: &str, description: &str, due_date: DateTime<Utc>) -> Self {
        Self {
            user_id: user_id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            completed: false,
            due_date,
        }
    }
}

/// Partial update payload; only the fields that are `Some` are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
}

impl TaskPatch {
    pub fn completion(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            ..Self::default()
        }
    }

    /// The editable fields of a task. Completion is never part of an edit.
    pub fn details(title: &str, description: &str, due_date: DateTime<Utc>) -> Self {
        Self {
            title: Some(title.to_string()),
            description: Some(description.to_string()),
            due_date: Some(due_date),
            completed: None,
        }
    }

    /// Copies the present fields onto `task`.
    pub fn apply_to(&self, task: &mut Task) {
        if let Some(title) = &self.title {
            task.title = title.clone();
        }
        if let Some(description) = &self.description {
            task.description = description.clone();
        }
        if let Some(completed) = self.completed {
            task.completed = completed;
        }
        if let Some(due_date) = self.due_date {
            task.due_date = due_date;
        }
    }
}

/// Parses the text of a due date input.
///
/// `YYYY-MM-DD` becomes midnight UTC of that day. Full RFC 3339 timestamps
/// are accepted too and normalized to UTC.
pub fn parse_due_date(text: &str) -> Result<DateTime<Utc>, ValidationError> {
    let text = text.trim();
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc());
        }
    }
    DateTime::parse_from_rfc3339(text)
        .map(|timestamp| timestamp.with_timezone(&Utc))
        .map_err(|_| ValidationError::DueDateInvalid(text.to_string()))
}

/// Which subset of tasks is visible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum TaskFilter {
    #[default]
    All,
    Active,
    Completed,
}

impl TaskFilter {
    pub fn matches(&self, task: &Task) -> bool {
        match self {
            TaskFilter::All => true,
            TaskFilter::Active => !task.completed,
            TaskFilter::Completed => task.completed,
        }
    }

    /// Returns the matching tasks in their current order.
    pub fn apply<'a>(&self, tasks: &'a [Task]) -> Vec<&'a Task> {
        tasks.iter().filter(|task| self.matches(task)).collect()
    }
}

impl fmt::Display for TaskFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TaskFilter::All => "all",
            TaskFilter::Active => "active",
            TaskFilter::Completed => "completed",
        };
        write!(f, "{}", name)
    }
}

/// Due-date badge of an active task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueStatus {
    Overdue,
    DueToday,
    DueTomorrow,
    DaysLeft(i64),
}

impl DueStatus {
    /// Classifies `task` relative to `now`; completed tasks get no badge.
    ///
    /// Remaining time is rounded up to whole days, so anything due within the
    /// next 24 hours counts as "tomorrow" unless it is due exactly now.
    pub fn classify(task: &Task, now: DateTime<Utc>) -> Option<DueStatus> {
        if task.completed {
            return None;
        }
        if task.is_overdue(now) {
            return Some(DueStatus::Overdue);
        }

        let remaining = (task.due_date - now).num_milliseconds();
        let days = (remaining + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY;
        Some(match days {
            0 => DueStatus::DueToday,
            1 => DueStatus::DueTomorrow,
            days => DueStatus::DaysLeft(days),
        })
    }

    pub fn is_urgent(&self) -> bool {
        match self {
            DueStatus::Overdue | DueStatus::DueToday | DueStatus::DueTomorrow => true,
            DueStatus::DaysLeft(days) => *days <= URGENT_WITHIN_DAYS,
        }
    }

    pub fn message(&self) -> Message {
        match self {
            DueStatus::Overdue => Message::Overdue,
            DueStatus::DueToday => Message::DueToday,
            DueStatus::DueTomorrow => Message::DueTomorrow,
            DueStatus::DaysLeft(days) => Message::DaysLeft(*days),
        }
    }
}

impl fmt::Display for DueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn task_due(due_date: DateTime<Utc>, completed: bool) -> Task {
        Task {
            id: "1".to_string(),
            user_id: "u1".to_string(),
            title: "Write report".to_string(),
            description: String::new(),
            completed,
            due_date,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_parse_due_date_calendar_date_is_utc_midnight() {
        let due = parse_due_date("2024-06-01").unwrap();
        assert_eq!(due, Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_due_date_accepts_rfc3339() {
        let due = parse_due_date("2024-06-01T12:30:00+02:00").unwrap();
        assert_eq!(due, Utc.with_ymd_and_hms(2024, 6, 1, 10, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_due_date_rejects_empty_and_garbage() {
        assert_eq!(parse_due_date(""), Err(ValidationError::DueDateInvalid(String::new())));
        assert!(parse_due_date("next friday").is_err());
        assert!(parse_due_date("2024-13-01").is_err());
    }

    #[test]
    fn test_due_status_rounds_up_to_whole_days() {
        let now = Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap();

        assert_eq!(DueStatus::classify(&task_due(now, false), now), Some(DueStatus::DueToday));
        assert_eq!(DueStatus::classify(&task_due(now + Duration::hours(3), false), now), Some(DueStatus::DueTomorrow));
        assert_eq!(DueStatus::classify(&task_due(now + Duration::hours(30), false), now), Some(DueStatus::DaysLeft(2)));
        assert_eq!(DueStatus::classify(&task_due(now + Duration::days(5), false), now), Some(DueStatus::DaysLeft(5)));
        assert_eq!(DueStatus::classify(&task_due(now - Duration::seconds(1), false), now), Some(DueStatus::Overdue));
    }

    #[test]
    fn test_due_status_urgency() {
        assert!(DueStatus::Overdue.is_urgent());
        assert!(DueStatus::DaysLeft(2).is_urgent());
        assert!(!DueStatus::DaysLeft(3).is_urgent());
        assert_eq!(DueStatus::DaysLeft(3).to_string(), "3 days left");
    }

    #[test]
    fn test_task_deserializes_null_description() {
        let json = r#"{
            "id": "7b0c",
            "user_id": "u1",
            "title": "Call Bob",
            "description": null,
            "completed": false,
            "due_date": "2024-01-10T00:00:00+00:00",
            "created_at": "2024-01-01T09:15:00.123456+00:00"
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.description, "");
        assert_eq!(task.due_date_text(), "2024-01-10");
    }

    #[test]
    fn test_patch_serializes_only_present_fields() {
        let json = serde_json::to_value(TaskPatch::completion(true)).unwrap();
        assert_eq!(json, serde_json::json!({ "completed": true }));
    }
}
