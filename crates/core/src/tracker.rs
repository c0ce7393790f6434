//! Tracker aggregate
//!
//! Owns the task and project stores and enforces the one rule that
//! crosses them: a task may only reference a project that exists, and
//! deleting a project clears the reference on every task pointing at it
//! within the same call.

use chrono::NaiveDate;
use tracing::debug;

use crate::project::{CreateProjectRequest, Project, ProjectStore};
use crate::task::{CreateTaskRequest, Task, TaskStatus, TaskStore};
use crate::{Error, Result};

/// Aggregate over the task and project stores
#[derive(Debug, Default)]
pub struct Tracker {
    tasks: TaskStore,
    projects: ProjectStore,
}

impl Tracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a task. A request naming a project is rejected unless that
    /// project exists.
    pub fn create_task(&mut self, request: CreateTaskRequest) -> Result<Task> {
        if let Some(project_id) = request.project_id {
            if !self.projects.contains(project_id) {
                debug!(project_id, "rejected task create: unknown project");
                return Err(Error::ProjectNotFound(project_id));
            }
        }
        self.tasks.create(request)
    }

    /// Toggle a task between completed and not completed
    pub fn toggle_task_completion(&mut self, id: u64) -> Result<Task> {
        self.tasks.toggle_completion(id)
    }

    /// Set a task's status directly
    pub fn set_task_status(&mut self, id: u64, status: TaskStatus) -> Result<Task> {
        self.tasks.set_status(id, status)
    }

    /// Delete a task
    pub fn delete_task(&mut self, id: u64) -> Result<Task> {
        self.tasks.delete(id)
    }

    /// Create a project
    pub fn create_project(&mut self, request: CreateProjectRequest) -> Result<Project> {
        self.projects.create(request)
    }

    /// Delete a project and clear the reference on every task that
    /// pointed at it. The tasks themselves survive as unassigned.
    pub fn delete_project(&mut self, id: u64) -> Result<Project> {
        let removed = self.projects.delete(id)?;
        let cleared = self.tasks.clear_project(id);
        debug!(project_id = id, cleared, "deleted project");
        Ok(removed)
    }

    /// Get a task by id
    pub fn task(&self, id: u64) -> Option<&Task> {
        self.tasks.get(id)
    }

    /// All tasks in insertion order
    pub fn tasks(&self) -> Vec<&Task> {
        self.tasks.list()
    }

    /// Tasks belonging to the given project, in insertion order
    pub fn tasks_for_project(&self, project_id: u64) -> Vec<&Task> {
        self.tasks.for_project(project_id)
    }

    /// (completed, total) among the given project's tasks. An unknown or
    /// empty project yields (0, 0).
    pub fn completion_ratio(&self, project_id: u64) -> (usize, usize) {
        self.tasks.completion_ratio(project_id)
    }

    /// Tasks due on the given calendar day, in insertion order
    pub fn tasks_due_on(&self, date: NaiveDate) -> Vec<&Task> {
        self.tasks.due_on(date)
    }

    /// Get a project by id
    pub fn project(&self, id: u64) -> Option<&Project> {
        self.projects.get(id)
    }

    /// All projects in insertion order
    pub fn projects(&self) -> Vec<&Project> {
        self.projects.list()
    }

    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    pub fn project_count(&self) -> usize {
        self.projects.len()
    }
}
