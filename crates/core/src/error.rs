//! Error types for the tracker core

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Task not found: {0}")]
    TaskNotFound(u64),

    #[error("Project not found: {0}")]
    ProjectNotFound(u64),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
