//! `PostgreSQL` adapters for hierarchical todo persistence.

mod models;
mod repository;
mod schema;

pub(crate) use models::{ChildTaskRow, ListRow, ParentTaskRow};
pub(crate) use repository::{
    row_to_child, row_to_list, row_to_task, to_new_child_row, to_new_list_row, to_new_task_row,
};

pub use repository::{PostgresTodoStore, TodoPgPool};
