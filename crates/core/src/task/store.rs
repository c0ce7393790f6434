//! In-memory task storage
//!
//! Owns the task map and the id counter. Ids come from a strictly
//! increasing counter and are never reused, even after deletions, so
//! ascending id order is insertion order.

use std::collections::HashMap;

use chrono::NaiveDate;
use tracing::debug;

use crate::{Error, Result};

use super::model::{CreateTaskRequest, Task, TaskStatus};

/// In-memory task store with monotonic id assignment
#[derive(Debug, Default)]
pub struct TaskStore {
    tasks: HashMap<u64, Task>,
    last_id: u64,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&mut self) -> u64 {
        self.last_id += 1;
        self.last_id
    }

    /// Create a task from the request, assigning a fresh id.
    ///
    /// The name is stored trimmed; a name that trims to empty is rejected
    /// and the store is left untouched. Status always starts `Pending`.
    pub fn create(&mut self, request: CreateTaskRequest) -> Result<Task> {
        let name = request.name.trim().to_string();
        if name.is_empty() {
            debug!("rejected task create: empty name");
            return Err(Error::InvalidInput(
                "Task name cannot be empty".to_string(),
            ));
        }

        let mut task = Task::new(self.next_id(), name);
        task.priority = request.priority;
        task.project_id = request.project_id;
        task.due_date = request.due_date;
        task.description = request.description;

        debug!(task_id = task.id, "created task");
        self.tasks.insert(task.id, task.clone());
        Ok(task)
    }

    /// Toggle completion: `Completed` flips to `Pending`; anything else,
    /// `InProgress` included, flips to `Completed`.
    pub fn toggle_completion(&mut self, id: u64) -> Result<Task> {
        let task = self.tasks.get_mut(&id).ok_or(Error::TaskNotFound(id))?;
        task.status = if task.status == TaskStatus::Completed {
            TaskStatus::Pending
        } else {
            TaskStatus::Completed
        };
        debug!(task_id = id, status = ?task.status, "toggled task completion");
        Ok(task.clone())
    }

    /// Set a task's status directly
    pub fn set_status(&mut self, id: u64, status: TaskStatus) -> Result<Task> {
        let task = self.tasks.get_mut(&id).ok_or(Error::TaskNotFound(id))?;
        task.status = status;
        Ok(task.clone())
    }

    /// Delete a task, returning it
    pub fn delete(&mut self, id: u64) -> Result<Task> {
        let removed = self.tasks.remove(&id).ok_or(Error::TaskNotFound(id))?;
        debug!(task_id = id, "deleted task");
        Ok(removed)
    }

    /// Null out the project reference on every task pointing at
    /// `project_id`, returning how many were cleared.
    ///
    /// Only runs as the second half of a project deletion; the tracker
    /// calls it inside the same operation that removes the project.
    pub(crate) fn clear_project(&mut self, project_id: u64) -> usize {
        let mut cleared = 0;
        for task in self.tasks.values_mut() {
            if task.project_id == Some(project_id) {
                task.project_id = None;
                cleared += 1;
            }
        }
        cleared
    }

    /// Get a task by id
    pub fn get(&self, id: u64) -> Option<&Task> {
        self.tasks.get(&id)
    }

    /// All tasks in insertion order
    pub fn list(&self) -> Vec<&Task> {
        let mut tasks: Vec<&Task> = self.tasks.values().collect();
        tasks.sort_by_key(|t| t.id);
        tasks
    }

    /// Tasks referencing the given project, in insertion order
    pub fn for_project(&self, project_id: u64) -> Vec<&Task> {
        let mut tasks: Vec<&Task> = self
            .tasks
            .values()
            .filter(|t| t.project_id == Some(project_id))
            .collect();
        tasks.sort_by_key(|t| t.id);
        tasks
    }

    /// (completed, total) among the given project's tasks
    pub fn completion_ratio(&self, project_id: u64) -> (usize, usize) {
        let tasks = self.for_project(project_id);
        let completed = tasks.iter().filter(|t| t.is_completed()).count();
        (completed, tasks.len())
    }

    /// Tasks due on the given calendar day, in insertion order. Tasks
    /// without a due date are excluded.
    pub fn due_on(&self, date: NaiveDate) -> Vec<&Task> {
        let mut tasks: Vec<&Task> = self
            .tasks
            .values()
            .filter(|t| t.due_date == Some(date))
            .collect();
        tasks.sort_by_key(|t| t.id);
        tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskPriority;

    fn request(name: &str) -> CreateTaskRequest {
        CreateTaskRequest {
            name: name.to_string(),
            ..Default::default()
        }
    }

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_create_assigns_sequential_ids() {
        let mut store = TaskStore::new();

        let first = store.create(request("First")).unwrap();
        let second = store.create(request("Second")).unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(first.status, TaskStatus::Pending);
        assert!(first.description.is_empty());
    }

    #[test]
    fn test_create_stores_trimmed_name() {
        let mut store = TaskStore::new();

        let task = store.create(request("  Ship the release  ")).unwrap();
        assert_eq!(task.name, "Ship the release");
    }

    #[test]
    fn test_create_rejects_empty_name() {
        let mut store = TaskStore::new();

        let empty = store.create(request(""));
        assert!(matches!(empty, Err(Error::InvalidInput(_))));

        let whitespace = store.create(request("   "));
        assert!(matches!(whitespace, Err(Error::InvalidInput(_))));

        assert!(store.is_empty());

        // A rejected create must not burn an id.
        let task = store.create(request("Valid")).unwrap();
        assert_eq!(task.id, 1);
    }

    #[test]
    fn test_ids_not_reused_after_delete() {
        let mut store = TaskStore::new();

        store.create(request("First")).unwrap();
        let second = store.create(request("Second")).unwrap();
        store.delete(second.id).unwrap();

        let third = store.create(request("Third")).unwrap();
        assert_eq!(third.id, 3);
    }

    #[test]
    fn test_toggle_completion_round_trip() {
        let mut store = TaskStore::new();
        let task = store.create(request("Toggle me")).unwrap();

        let toggled = store.toggle_completion(task.id).unwrap();
        assert_eq!(toggled.status, TaskStatus::Completed);

        let toggled = store.toggle_completion(task.id).unwrap();
        assert_eq!(toggled.status, TaskStatus::Pending);
    }

    #[test]
    fn test_toggle_collapses_in_progress() {
        let mut store = TaskStore::new();
        let task = store.create(request("Underway")).unwrap();
        store.set_status(task.id, TaskStatus::InProgress).unwrap();

        let toggled = store.toggle_completion(task.id).unwrap();
        assert_eq!(toggled.status, TaskStatus::Completed);

        // The round trip lands on Pending, not back on InProgress.
        let toggled = store.toggle_completion(task.id).unwrap();
        assert_eq!(toggled.status, TaskStatus::Pending);
    }

    #[test]
    fn test_toggle_missing_task() {
        let mut store = TaskStore::new();
        let result = store.toggle_completion(99);
        assert!(matches!(result, Err(Error::TaskNotFound(99))));
    }

    #[test]
    fn test_set_status() {
        let mut store = TaskStore::new();
        let task = store.create(request("Promote")).unwrap();

        let updated = store.set_status(task.id, TaskStatus::InProgress).unwrap();
        assert_eq!(updated.status, TaskStatus::InProgress);

        let missing = store.set_status(99, TaskStatus::Completed);
        assert!(matches!(missing, Err(Error::TaskNotFound(99))));
    }

    #[test]
    fn test_delete_task() {
        let mut store = TaskStore::new();
        let task = store.create(request("Doomed")).unwrap();

        let removed = store.delete(task.id).unwrap();
        assert_eq!(removed.id, task.id);
        assert!(store.get(task.id).is_none());

        let again = store.delete(task.id);
        assert!(matches!(again, Err(Error::TaskNotFound(_))));
    }

    #[test]
    fn test_clear_project_only_touches_matching() {
        let mut store = TaskStore::new();

        let mut in_project = request("In project");
        in_project.project_id = Some(7);
        let in_project = store.create(in_project).unwrap();

        let mut other = request("Other project");
        other.project_id = Some(8);
        let other = store.create(other).unwrap();

        let unassigned = store.create(request("Unassigned")).unwrap();

        let cleared = store.clear_project(7);
        assert_eq!(cleared, 1);
        assert_eq!(store.get(in_project.id).unwrap().project_id, None);
        assert_eq!(store.get(other.id).unwrap().project_id, Some(8));
        assert_eq!(store.get(unassigned.id).unwrap().project_id, None);
    }

    #[test]
    fn test_list_and_for_project_insertion_order() {
        let mut store = TaskStore::new();

        for name in ["A", "B", "C", "D"] {
            let mut req = request(name);
            if name != "C" {
                req.project_id = Some(1);
            }
            store.create(req).unwrap();
        }

        let all: Vec<u64> = store.list().iter().map(|t| t.id).collect();
        assert_eq!(all, vec![1, 2, 3, 4]);

        let scoped: Vec<u64> = store.for_project(1).iter().map(|t| t.id).collect();
        assert_eq!(scoped, vec![1, 2, 4]);
    }

    #[test]
    fn test_completion_ratio() {
        let mut store = TaskStore::new();

        for name in ["One", "Two", "Three"] {
            let mut req = request(name);
            req.project_id = Some(3);
            store.create(req).unwrap();
        }
        store.toggle_completion(2).unwrap();

        assert_eq!(store.completion_ratio(3), (1, 3));
        assert_eq!(store.completion_ratio(99), (0, 0));
    }

    #[test]
    fn test_due_on_matches_calendar_day_only() {
        let mut store = TaskStore::new();

        let mut due = request("Due that day");
        due.due_date = Some(date(2024, 10, 28));
        due.priority = TaskPriority::High;
        let due = store.create(due).unwrap();

        let mut later = request("Due later");
        later.due_date = Some(date(2024, 10, 30));
        store.create(later).unwrap();

        store.create(request("No due date")).unwrap();

        let matches: Vec<u64> = store
            .due_on(date(2024, 10, 28))
            .iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(matches, vec![due.id]);

        assert!(store.due_on(date(2024, 10, 27)).is_empty());
    }
}
