//! To-do tasks, as served by the remote API

use std::fmt::{Display, Formatter};

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// The server-assigned identifier of a task.
///
/// The client never makes up ids: they only ever come from the remote service.
pub type TaskId = u64;

/// The two states a task can be in.
///
/// Every task starts as `InProgress` and is toggled by exactly one user action.
/// The wire representation matches the API (`"in-progress"` / `"done"`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    InProgress,
    Done,
}

impl TaskStatus {
    pub fn is_done(&self) -> bool {
        match self {
            TaskStatus::Done => true,
            _ => false,
        }
    }
}

impl Display for TaskStatus {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            TaskStatus::InProgress => write!(f, "in-progress"),
            TaskStatus::Done => write!(f, "done"),
        }
    }
}

/// A to-do task
///
/// Tasks are owned by the server: the client holds no authoritative copy, and every
/// mutation is followed by a full re-fetch of the collection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Server-assigned unique identifier
    id: TaskId,
    /// The display name of the task
    title: String,
    /// A longer description, non-empty at creation
    description: String,
    /// The completion status of this task
    status: TaskStatus,
    /// The calendar day this task is due on (no time component)
    #[serde(deserialize_with = "deserialize_due_date")]
    due_date: NaiveDate,
}

impl Task {
    /// Build a task from its parts.
    ///
    /// Real tasks are deserialized from server replies; this constructor mostly
    /// serves mock sources and tests.
    pub fn new(id: TaskId, title: String, description: String, status: TaskStatus, due_date: NaiveDate) -> Self {
        Self { id, title, description, status, due_date }
    }

    pub fn id(&self) -> TaskId          { self.id }
    pub fn title(&self) -> &str         { &self.title }
    pub fn description(&self) -> &str   { &self.description }
    pub fn status(&self) -> TaskStatus  { self.status }
    pub fn due_date(&self) -> NaiveDate { self.due_date }

    /// Whether this task is due on the given calendar day.
    ///
    /// This is a calendar-date comparison: any time-of-day component the server may
    /// have attached to `due_date` has already been dropped at parse time.
    pub fn is_due_on(&self, day: NaiveDate) -> bool {
        self.due_date == day
    }

    pub fn set_status(&mut self, new_status: TaskStatus) {
        self.status = new_status;
    }
}

/// The body of a task-creation request.
///
/// `status` is always `in-progress` on creation, `due_date` serializes as `yyyy-MM-dd`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    #[serde(deserialize_with = "deserialize_due_date")]
    pub due_date: NaiveDate,
}

impl NewTask {
    pub fn new(title: String, description: String, due_date: NaiveDate) -> Self {
        Self {
            title,
            description,
            status: TaskStatus::InProgress,
            due_date,
        }
    }
}

/// Parse a due date that is nominally `yyyy-MM-dd`, but be lenient with servers that
/// reply with a full timestamp: only the calendar date part is ever relevant
fn deserialize_due_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;
    if let Ok(date) = NaiveDate::parse_from_str(&text, "%Y-%m-%d") {
        return Ok(date);
    }
    match chrono::DateTime::parse_from_rfc3339(&text) {
        Ok(stamp) => Ok(stamp.date_naive()),
        Err(err) => Err(serde::de::Error::custom(format!("invalid due_date {:?}: {}", text, err))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_task() {
        let json = r#"{"id":12,"title":"Buy milk","description":"2%","status":"in-progress","due_date":"2024-06-10"}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.id(), 12);
        assert_eq!(task.status(), TaskStatus::InProgress);
        assert_eq!(task.due_date(), NaiveDate::from_ymd_opt(2024, 6, 10).unwrap());

        let back = serde_json::to_string(&task).unwrap();
        let again: Task = serde_json::from_str(&back).unwrap();
        assert_eq!(task, again);
    }

    #[test]
    fn due_date_ignores_time_of_day() {
        let json = r#"{"id":3,"title":"t","description":"d","status":"done","due_date":"2024-06-10T23:59:00+05:00"}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert!(task.is_due_on(NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()));
        assert!(task.status().is_done());
    }

    #[test]
    fn new_task_wire_format() {
        let body = NewTask::new(
            "Buy milk".to_string(),
            "2%".to_string(),
            NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
        );
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json, serde_json::json!({
            "title": "Buy milk",
            "description": "2%",
            "status": "in-progress",
            "due_date": "2024-06-10",
        }));
    }
}
