//! Project module
//!
//! A Project groups tasks and carries its own progress figure. Projects
//! and tasks live in separate stores; the tracker keeps the reference
//! between them consistent.

mod model;
mod store;

pub use model::*;
pub use store::*;
