//! Project model definitions

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A Project groups related tasks and tracks an overall progress figure.
///
/// Tasks reference projects by id. Deleting a project clears those
/// references in the same operation, so a task never points at a
/// project that no longer exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Unique project identifier, assigned by the store and never reused
    pub id: u64,

    /// Human-readable project name (non-empty, stored trimmed)
    pub name: String,

    /// Manually maintained progress percentage, 0 to 100
    pub progress: u8,

    /// Planned start date, if scheduled
    pub start_date: Option<NaiveDate>,

    /// Planned end date, if scheduled
    pub end_date: Option<NaiveDate>,
}

impl Project {
    /// Create a new project with defaults for the optional fields
    pub(crate) fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            progress: 0,
            start_date: None,
            end_date: None,
        }
    }
}

/// Request to create a project
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateProjectRequest {
    /// Project name
    pub name: String,

    /// Initial progress percentage (clamped to 100)
    #[serde(default)]
    pub progress: u8,

    /// Planned start date (optional)
    pub start_date: Option<NaiveDate>,

    /// Planned end date (optional)
    pub end_date: Option<NaiveDate>,
}
