//! Domain model for hierarchical todo lists.
//!
//! The todo domain models lists, parent tasks, child tasks, completion
//! stamps, and recurrence schedule expansion while keeping all
//! infrastructure concerns outside of the domain boundary.

mod child;
mod error;
mod ids;
mod list;
mod recurrence;
mod task;

pub use child::{ChildTask, PersistedChildTaskData};
pub use error::{ParseFrequencyError, TodoDomainError};
pub use ids::{ChildTaskId, Description, ListId, Name, TaskId};
pub use list::TodoList;
pub use recurrence::{RecurrenceFrequency, expand_schedule};
pub use task::{ParentTask, PersistedParentTaskData};
