//! Support for library configuration options

use std::sync::{Arc, Mutex};
use once_cell::sync::Lazy;

/// Name of the durable slot that holds the task list.
/// Feel free to override it when initing this library.
pub static TASKS_KEY: Lazy<Arc<Mutex<String>>> = Lazy::new(|| Arc::new(Mutex::new("pwa-todo-tasks".to_string())));

/// Name of the durable slot that holds the theme preference.
/// Feel free to override it when initing this library.
pub static THEME_KEY: Lazy<Arc<Mutex<String>>> = Lazy::new(|| Arc::new(Mutex::new("theme".to_string())));

/// Returns the current value of a setting
pub fn current(setting: &Lazy<Arc<Mutex<String>>>) -> String {
    match setting.lock() {
        Ok(value) => value.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}
