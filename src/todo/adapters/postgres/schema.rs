//! Diesel schema for hierarchical todo persistence.
//!
//! The migrations declare `parent_tasks.list_id` and
//! `child_tasks.parent_task_id` with `ON DELETE CASCADE`, so deleting a list
//! or a parent task removes the whole subtree in the store.

diesel::table! {
    /// Todo list records.
    todo_lists (id) {
        /// List identifier.
        id -> Uuid,
        /// List display name.
        #[max_length = 50]
        name -> Varchar,
        /// List description.
        #[max_length = 1000]
        description -> Varchar,
    }
}

diesel::table! {
    /// Parent task records nested within a todo list.
    parent_tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Owning list identifier.
        list_id -> Uuid,
        /// Task display name.
        #[max_length = 50]
        name -> Varchar,
        /// Task description.
        #[max_length = 1000]
        description -> Varchar,
        /// Due date.
        due_date -> Timestamptz,
        /// Completion stamp, when completed.
        completed_date -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    /// Child task records nested within a parent task.
    child_tasks (id) {
        /// Child task identifier.
        id -> Uuid,
        /// Owning parent task identifier.
        parent_task_id -> Uuid,
        /// Task display name.
        #[max_length = 50]
        name -> Varchar,
        /// Task description.
        #[max_length = 1000]
        description -> Varchar,
        /// Due date.
        due_date -> Timestamptz,
        /// Completion stamp, when completed.
        completed_date -> Nullable<Timestamptz>,
    }
}

diesel::joinable!(parent_tasks -> todo_lists (list_id));
diesel::joinable!(child_tasks -> parent_tasks (parent_task_id));

diesel::allow_tables_to_appear_in_same_query!(todo_lists, parent_tasks, child_tasks);
