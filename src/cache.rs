//! This module provides a local cache for the task list
//!
//! The whole list is stored as a JSON array in a single durable slot.
//! The theme preference lives in a separate slot.

use crate::error::PersistenceError;
use crate::settings::{self, TASKS_KEY, THEME_KEY};
use crate::storage::DurableSlots;
use crate::task::Task;
use crate::theme::Theme;


/// Stores the task list (and the theme preference) in durable slots
#[derive(Debug)]
pub struct Cache<S: DurableSlots> {
    slots: S,
    tasks_key: String,
    theme_key: String,
}

impl<S: DurableSlots> Cache<S> {
    /// Initialize a cache, using the slot names of the [`settings`](crate::settings)
    pub fn new(slots: S) -> Self {
        Self::with_keys(slots, &settings::current(&TASKS_KEY), &settings::current(&THEME_KEY))
    }

    /// Initialize a cache that uses custom slot names
    pub fn with_keys(slots: S, tasks_key: &str, theme_key: &str) -> Self {
        Self {
            slots,
            tasks_key: tasks_key.to_string(),
            theme_key: theme_key.to_string(),
        }
    }

    pub fn slots(&self) -> &S { &self.slots }
    pub fn slots_mut(&mut self) -> &mut S { &mut self.slots }
    pub fn tasks_key(&self) -> &str { &self.tasks_key }
    pub fn theme_key(&self) -> &str { &self.theme_key }

    /// Load the task list.
    ///
    /// This never fails: a missing slot is an empty list, and so is an unreadable or malformed one (a warning is logged in this case). \
    /// Invalid records are skipped (with a warning), the other ones are still loaded.
    pub fn load(&self) -> Vec<Task> {
        let content = match self.slots.read(&self.tasks_key) {
            Ok(Some(content)) => content,
            Ok(None) => {
                log::debug!("No task list stored in {:?} yet", self.tasks_key);
                return Vec::new();
            },
            Err(err) => {
                log::warn!("Unable to read tasks from {:?}: {}. Using an empty list", self.tasks_key, err);
                return Vec::new();
            },
        };

        let records = match serde_json::from_str::<Option<Vec<serde_json::Value>>>(&content) {
            Ok(records) => records.unwrap_or_default(),
            Err(err) => {
                log::warn!("Error loading tasks from {:?}: {}. Resetting storage", self.tasks_key, err);
                return Vec::new();
            },
        };

        let total = records.len();
        let tasks: Vec<Task> = records.into_iter()
            .enumerate()
            .filter_map(|(index, record)| match serde_json::from_value::<Task>(record) {
                Ok(task) => Some(task),
                Err(err) => {
                    log::warn!("Skipping invalid task #{} in {:?}: {}", index, self.tasks_key, err);
                    None
                },
            })
            .collect();
        log::debug!("Loaded {} tasks from {:?} ({} skipped)", tasks.len(), self.tasks_key, total - tasks.len());
        tasks
    }

    /// Store the whole task list
    pub fn save(&mut self, tasks: &[Task]) -> Result<(), PersistenceError> {
        let content = serde_json::to_string(tasks)?;
        self.slots.write(&self.tasks_key, &content)?;
        log::debug!("Saved {} tasks to {:?}", tasks.len(), self.tasks_key);
        Ok(())
    }

    /// Load the theme preference. Missing or unreadable preferences fall back to the light theme
    pub fn load_theme(&self) -> Theme {
        match self.slots.read(&self.theme_key) {
            Ok(value) => Theme::from_stored(value.as_deref()),
            Err(err) => {
                log::warn!("Unable to read the theme from {:?}: {}", self.theme_key, err);
                Theme::default()
            },
        }
    }

    pub fn save_theme(&mut self, theme: Theme) -> Result<(), PersistenceError> {
        self.slots.write(&self.theme_key, theme.as_str())
    }
}
