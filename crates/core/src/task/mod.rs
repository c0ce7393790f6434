//! Task module
//!
//! A Task is the unit of tracked work. Tasks may reference a Project
//! and may carry a due date that places them on the calendar.

mod model;
mod store;

pub use model::*;
pub use store::*;
