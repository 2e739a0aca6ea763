//! Application services for hierarchical todo orchestration.

mod completion;
mod lists;
mod recurrence;
mod tasks;

pub use completion::{
    ChildCompletion, CompletionEngine, CompletionError, CompletionResult, ParentCompletion,
    UpdateChildTaskRequest,
};
pub use lists::{
    CreateListRequest, ListService, ListServiceError, ListServiceResult, UpdateListRequest,
};
pub use recurrence::{
    CreateRecurringTaskRequest, RecurrenceError, RecurrenceExpander, RecurrenceResult,
};
pub use tasks::{
    CreateChildTaskRequest, CreateTaskRequest, TaskService, TaskServiceError, TaskServiceResult,
    UpdateTaskRequest,
};
