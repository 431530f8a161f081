//! Durable key-value slots, where the [`Cache`](crate::cache::Cache) stores its data
//!
//! A slot is a named location whose content survives process restarts.
//! This crate provides a folder-backed implementation ([`FolderSlots`]), and an in-memory one ([`MemorySlots`]) that is mostly useful in tests.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::PersistenceError;
use crate::mock_behaviour::MockBehaviour;

/// A named key-value storage
pub trait DurableSlots {
    /// Returns the content of a slot, or `None` in case it has never been written
    fn read(&self, key: &str) -> Result<Option<String>, PersistenceError>;

    /// Replace the content of a slot.
    /// Either the whole new content is stored, or the previous content is kept
    fn write(&mut self, key: &str, value: &str) -> Result<(), PersistenceError>;
}


/// Slots stored in a folder, one file per key
#[derive(Clone, Debug, PartialEq)]
pub struct FolderSlots {
    folder: PathBuf,
}

impl FolderSlots {
    /// Use the given folder. It will be created on the first write if needed
    pub fn new(folder: &Path) -> Self {
        Self { folder: PathBuf::from(folder) }
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    /// The file that holds a given key
    pub fn slot_file(&self, key: &str) -> PathBuf {
        let mut file_name = sanitize_filename::sanitize(key);
        file_name.push_str(".json");
        self.folder.join(file_name)
    }
}

impl DurableSlots for FolderSlots {
    fn read(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        let path = self.slot_file(key);
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                log::trace!("Read {} bytes from {:?}", content.len(), path);
                Ok(Some(content))
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        std::fs::create_dir_all(&self.folder)?;

        // Write aside, then move in place, so that a failure never leaves a truncated slot
        let path = self.slot_file(key);
        let tmp_path = path.with_extension("json.tmp");
        std::fs::write(&tmp_path, value)?;
        if let Err(err) = std::fs::rename(&tmp_path, &path) {
            let _ = std::fs::remove_file(&tmp_path);
            return Err(err.into());
        }
        log::trace!("Wrote {} bytes to {:?}", value.len(), path);
        Ok(())
    }
}


/// Slots that only live in memory.
///
/// Their behaviour can be tweaked to simulate storage failures (see [`MockBehaviour`])
#[derive(Clone, Debug, Default)]
pub struct MemorySlots {
    slots: HashMap<String, String>,
    behaviour: RefCell<MockBehaviour>,
}

impl MemorySlots {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_behaviour(behaviour: MockBehaviour) -> Self {
        Self { slots: HashMap::new(), behaviour: RefCell::new(behaviour) }
    }

    /// Pre-fill a slot, bypassing the mock behaviour
    pub fn insert<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        self.slots.insert(key.into(), value.into());
    }

    /// Returns the raw content of a slot, bypassing the mock behaviour
    pub fn get(&self, key: &str) -> Option<&str> {
        self.slots.get(key).map(|s| s.as_str())
    }

    pub fn behaviour_mut(&mut self) -> &mut MockBehaviour {
        self.behaviour.get_mut()
    }
}

impl DurableSlots for MemorySlots {
    fn read(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        self.behaviour.borrow_mut().can_read(key)?;
        Ok(self.slots.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        self.behaviour.get_mut().can_write(key)?;
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
