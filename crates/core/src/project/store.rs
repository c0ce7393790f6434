//! In-memory project storage

use std::collections::HashMap;

use tracing::debug;

use crate::{Error, Result};

use super::model::{CreateProjectRequest, Project};

/// In-memory project store with monotonic id assignment
///
/// Project ids and task ids are separate sequences; the same number can
/// name a task and a project without the two being related.
#[derive(Debug, Default)]
pub struct ProjectStore {
    projects: HashMap<u64, Project>,
    last_id: u64,
}

impl ProjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&mut self) -> u64 {
        self.last_id += 1;
        self.last_id
    }

    /// Create a project from the request, assigning a fresh id.
    ///
    /// The name is stored trimmed; a name that trims to empty is rejected
    /// and the store is left untouched. Progress is clamped to 100.
    pub fn create(&mut self, request: CreateProjectRequest) -> Result<Project> {
        let name = request.name.trim().to_string();
        if name.is_empty() {
            debug!("rejected project create: empty name");
            return Err(Error::InvalidInput(
                "Project name cannot be empty".to_string(),
            ));
        }

        let mut project = Project::new(self.next_id(), name);
        project.progress = request.progress.min(100);
        project.start_date = request.start_date;
        project.end_date = request.end_date;

        debug!(project_id = project.id, "created project");
        self.projects.insert(project.id, project.clone());
        Ok(project)
    }

    /// Delete a project, returning it. Clearing task references is the
    /// tracker's job; the store only owns the project records.
    pub fn delete(&mut self, id: u64) -> Result<Project> {
        let removed = self.projects.remove(&id).ok_or(Error::ProjectNotFound(id))?;
        debug!(project_id = id, "deleted project");
        Ok(removed)
    }

    /// Get a project by id
    pub fn get(&self, id: u64) -> Option<&Project> {
        self.projects.get(&id)
    }

    /// Whether a project with this id exists
    pub fn contains(&self, id: u64) -> bool {
        self.projects.contains_key(&id)
    }

    /// All projects in insertion order
    pub fn list(&self) -> Vec<&Project> {
        let mut projects: Vec<&Project> = self.projects.values().collect();
        projects.sort_by_key(|p| p.id);
        projects
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}
