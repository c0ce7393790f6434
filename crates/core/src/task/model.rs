//! Task model definitions

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Task lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
}

impl Default for TaskStatus {
    fn default() -> Self {
        Self::Pending
    }
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
        }
    }
}

/// Task priority level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

impl Default for TaskPriority {
    fn default() -> Self {
        Self::Medium
    }
}

impl TaskPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

/// A unit of work, optionally associated with a project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Unique task identifier, assigned by the store and never reused
    pub id: u64,

    /// Task name; non-empty, stored trimmed
    pub name: String,

    /// Project this task belongs to, if any. Cleared when that project is
    /// deleted; a dangling reference is never observable.
    pub project_id: Option<u64>,

    pub priority: TaskPriority,
    pub status: TaskStatus,

    /// Calendar due date; no time component
    pub due_date: Option<NaiveDate>,

    /// Free-text description, empty unless provided
    pub description: String,
}

impl Task {
    /// Create a task with defaults: pending, medium priority, no project,
    /// no due date, empty description.
    pub(crate) fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            project_id: None,
            priority: TaskPriority::default(),
            status: TaskStatus::default(),
            due_date: None,
            description: String::new(),
        }
    }

    /// Whether the status is `Completed`
    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }
}

/// Request to create a task; the store assigns the id
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateTaskRequest {
    pub name: String,
    #[serde(default)]
    pub priority: TaskPriority,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub project_id: Option<u64>,
    #[serde(default)]
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_task_defaults() {
        let task = Task::new(1, "Write release notes");
        assert_eq!(task.id, 1);
        assert_eq!(task.name, "Write release notes");
        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(task.priority, TaskPriority::Medium);
        assert!(task.project_id.is_none());
        assert!(task.due_date.is_none());
        assert!(task.description.is_empty());
    }

    #[test]
    fn test_is_completed() {
        let mut task = Task::new(1, "Write release notes");
        assert!(!task.is_completed());

        task.status = TaskStatus::InProgress;
        assert!(!task.is_completed());

        task.status = TaskStatus::Completed;
        assert!(task.is_completed());
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(TaskStatus::Pending.as_str(), "Pending");
        assert_eq!(TaskStatus::InProgress.as_str(), "In Progress");
        assert_eq!(TaskStatus::Completed.as_str(), "Completed");
    }

    #[test]
    fn test_priority_defaults_to_medium() {
        assert_eq!(TaskPriority::default(), TaskPriority::Medium);
        assert_eq!(CreateTaskRequest::default().priority, TaskPriority::Medium);
    }
}
