//! This module owns the task list, and applies the user actions to it
//!
//! Every mutation is saved to the [`Cache`] and announced on the render channel.

use chrono::NaiveDate;

use crate::action::{Action, Outcome};
use crate::cache::Cache;
use crate::clock::{Clock, SystemClock};
use crate::error::{Error, Result};
use crate::grouping::{group_by_date, Bucket};
use crate::storage::DurableSlots;
use crate::task::{Task, TaskDraft, TaskId};
use crate::theme::Theme;
use crate::validation::validate;

pub mod render_signal;
use render_signal::{render_channel, RenderReceiver, RenderSender, RenderSignal};


/// The in-memory task list, backed by a [`Cache`].
///
/// Tasks are kept in insertion order. Use [`TaskStore::grouped`] to get them in display order.
///
/// When saving fails, mutations are still applied in memory (and a warning is logged).
/// The [`RenderSignal`] that follows tells whether the change has been persisted.
pub struct TaskStore<S: DurableSlots> {
    cache: Cache<S>,
    tasks: Vec<Task>,
    clock: Box<dyn Clock>,

    revision: u64,
    render_sender: RenderSender,
}

impl<S: DurableSlots> TaskStore<S> {
    /// Create a store, with whatever the cache contains
    pub fn open(cache: Cache<S>) -> Self {
        Self::open_with_clock(cache, SystemClock)
    }

    /// Create a store that gets the current date from a custom clock
    pub fn open_with_clock<C: Clock + 'static>(cache: Cache<S>, clock: C) -> Self {
        let tasks = cache.load();
        let (render_sender, _) = render_channel();
        Self {
            cache,
            tasks,
            clock: Box::new(clock),
            revision: 0,
            render_sender,
        }
    }

    pub fn tasks(&self) -> &[Task]      { &self.tasks          }
    pub fn len(&self) -> usize          { self.tasks.len()     }
    pub fn is_empty(&self) -> bool      { self.tasks.is_empty() }
    pub fn cache(&self) -> &Cache<S>    { &self.cache          }
    pub fn today(&self) -> NaiveDate    { self.clock.today()   }

    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id() == id)
    }

    /// The tasks, grouped by date in display order
    pub fn grouped(&self) -> Vec<Bucket<'_>> {
        group_by_date(&self.tasks)
    }

    /// Render the task list as HTML markup, relative to today's date
    pub fn render_html(&self) -> String {
        crate::html::render(&self.grouped(), self.today())
    }

    /// Get notified whenever the task list must be rendered again
    pub fn subscribe(&self) -> RenderReceiver {
        self.render_sender.subscribe()
    }

    /// The latest signal that has been sent
    pub fn last_signal(&self) -> RenderSignal {
        *self.render_sender.borrow()
    }

    /// Apply an action from the UI layer
    pub fn dispatch(&mut self, action: Action) -> Result<Outcome> {
        log::trace!("Dispatching {:?}", action);
        match action {
            Action::Add(draft) => self.add(draft).map(Outcome::Added),
            Action::Update(id, draft) => self.update(&id, draft).map(|_| Outcome::Updated),
            Action::Remove(id) => Ok(Outcome::Removed(self.remove(&id))),
            Action::ToggleCompletion(id) => Ok(Outcome::Toggled(self.toggle_completion(&id))),
        }
    }

    /// Validate a draft, and append it as a new task.
    ///
    /// A draft without a date is scheduled for today.
    /// In case of a validation error, the store is left untouched.
    pub fn add(&mut self, draft: TaskDraft) -> Result<TaskId> {
        let today = self.clock.today();
        let draft = draft.normalized();
        validate(&draft, today)?;

        let date = draft.date.unwrap_or(today);
        let task = Task::new(draft, date, self.clock.now());
        let id = task.id().clone();
        log::debug!("Adding task {} ({:?})", id, task.name());
        self.tasks.push(task);

        self.commit();
        Ok(id)
    }

    /// Validate a draft, and replace the fields of an existing task with it.
    ///
    /// The ID, creation date and completion status of the task are kept. So is its date, if the draft has none.
    pub fn update(&mut self, id: &TaskId, draft: TaskDraft) -> Result<()> {
        let draft = draft.normalized();
        validate(&draft, self.clock.today())?;

        let task = match self.tasks.iter_mut().find(|t| t.id() == id) {
            None => return Err(Error::NotFound(id.clone())),
            Some(task) => task,
        };
        log::debug!("Updating task {}", id);
        task.apply_draft(draft);

        self.commit();
        Ok(())
    }

    /// Remove a task. Removing a task that does not exist is not an error.
    ///
    /// Returns whether a task has been removed
    pub fn remove(&mut self, id: &TaskId) -> bool {
        let len_before = self.tasks.len();
        self.tasks.retain(|t| t.id() != id);
        let removed = self.tasks.len() != len_before;
        if removed == false {
            log::debug!("No task {} to remove", id);
        }

        self.commit();
        removed
    }

    /// Flip the completion status of a task.
    ///
    /// Returns the new status, or `None` if there is no such task
    pub fn toggle_completion(&mut self, id: &TaskId) -> Option<bool> {
        let new_status = self.tasks.iter_mut()
            .find(|t| t.id() == id)
            .map(|task| task.toggle_completion());
        if new_status.is_none() {
            log::debug!("No task {} to toggle", id);
        }

        self.commit();
        new_status
    }

    /// The theme preference stored next to the tasks
    pub fn theme(&self) -> Theme {
        self.cache.load_theme()
    }

    /// Switch between the light and dark themes, and return the new one
    pub fn toggle_theme(&mut self) -> Theme {
        let theme = self.theme().toggled();
        if let Err(err) = self.cache.save_theme(theme) {
            log::warn!("Unable to save the theme preference: {}", err);
        }
        theme
    }

    /// Save the task list again, e.g. after a change could only be kept in memory.
    ///
    /// Unlike the mutations, this reports a failed save to the caller.
    pub fn flush(&mut self) -> Result<()> {
        let result = self.cache.save(&self.tasks);
        if let Err(err) = &result {
            log::warn!("Unable to flush tasks: {}", err);
        }
        self.revision += 1;
        self.render_sender.send_replace(RenderSignal { revision: self.revision, persisted: result.is_ok() });
        result.map_err(Error::from)
    }

    /// Save the task list, then ask for a render
    fn commit(&mut self) {
        let persisted = match self.cache.save(&self.tasks) {
            Ok(()) => true,
            Err(err) => {
                log::warn!("Unable to save tasks: {}. Changes are only kept in memory", err);
                false
            },
        };

        self.revision += 1;
        self.render_sender.send_replace(RenderSignal { revision: self.revision, persisted });
    }
}
