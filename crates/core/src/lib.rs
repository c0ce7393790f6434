//! Core library for TaskFlow
//!
//! This crate contains the core business logic, including:
//! - Task management
//! - Project management
//! - Calendar month grids

pub mod calendar;
pub mod error;
pub mod project;
pub mod task;
pub mod tracker;

pub use error::Error;
pub use tracker::Tracker;
pub type Result<T> = std::result::Result<T, Error>;
