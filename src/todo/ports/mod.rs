//! Port contracts for hierarchical todo persistence.
//!
//! Ports define infrastructure-agnostic interfaces used by todo services.

pub mod repository;

pub use repository::{
    ChildTaskRepository, ListRepository, ParentTaskRepository, TodoRepositoryError,
    TodoRepositoryResult,
};
