//! This crate manages a local, single-user to-do list made of dated tasks.
//!
//! The task list is owned by a [`TaskStore`], that validates user input (see [`validation`]) and saves every change to a [`Cache`](cache::Cache). \
//! The cache stores its data in named [durable slots](storage::DurableSlots), e.g. files in a folder.
//!
//! The UI layer sends [`Action`]s to the store, gets notified by a [render signal](store::render_signal) after every change,
//! and displays tasks grouped by date (see [`grouping`]), using the display strings of the [`format`] module or the markup of the [`html`] module.

pub mod task;
pub use task::{Priority, Task, TaskDraft, TaskId};
pub mod error;
pub use error::{Error, PersistenceError, ValidationError};
pub mod action;
pub use action::{Action, Outcome};
pub mod store;
pub use store::TaskStore;

pub mod validation;
pub mod grouping;
pub mod format;
pub mod html;

pub mod cache;
pub mod storage;
pub mod mock_behaviour;
pub mod clock;
pub mod theme;
pub use theme::Theme;

pub mod settings;
