//! Actions that the UI layer can dispatch to the [`TaskStore`](crate::TaskStore)

use crate::task::{TaskDraft, TaskId};

/// A user intent, routed to the store operation of the same name
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    Add(TaskDraft),
    Update(TaskId, TaskDraft),
    Remove(TaskId),
    ToggleCompletion(TaskId),
}

/// What a dispatched [`Action`] did
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    /// A task has been created with this ID
    Added(TaskId),
    Updated,
    /// Whether a task has actually been removed
    Removed(bool),
    /// The new completion status, or `None` if there was no such task
    Toggled(Option<bool>),
}
