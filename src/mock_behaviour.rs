//! This module provides ways to tweak in-memory slots, so that they can return errors on some tests

use crate::error::PersistenceError;

/// This stores some behaviour tweaks, that describe how a [`MemorySlots`](crate::storage::MemorySlots) will behave during a given test
///
/// So that a functions fails _n_ times after _m_ initial successes, set `(m, n)` for the suited parameter
#[derive(Default, Clone, Debug)]
pub struct MockBehaviour {
    /// If this is true, every action will be allowed
    pub is_suspended: bool,

    pub read_behaviour: (u32, u32),
    pub write_behaviour: (u32, u32),
}

impl MockBehaviour {
    pub fn new() -> Self {
        Self::default()
    }

    /// All actions will fail at once, for `n_fails` times
    pub fn fail_now(n_fails: u32) -> Self {
        Self {
            is_suspended: false,
            read_behaviour: (0, n_fails),
            write_behaviour: (0, n_fails),
        }
    }

    /// Writes will fail at once, for `n_fails` times, as if the storage quota was exceeded
    pub fn fail_writes(n_fails: u32) -> Self {
        Self {
            write_behaviour: (0, n_fails),
            ..Self::default()
        }
    }

    /// Suspend this mock behaviour until you call `resume`
    pub fn suspend(&mut self) {
        self.is_suspended = true;
    }
    /// Make this behaviour active again
    pub fn resume(&mut self) {
        self.is_suspended = false;
    }

    pub fn can_read(&mut self, key: &str) -> Result<(), PersistenceError> {
        if self.is_suspended { return Ok(()) }
        decrement(&mut self.read_behaviour, "read")
            .map_err(|err| PersistenceError::Unavailable(format!("{} [{}]", err, key)))
    }
    pub fn can_write(&mut self, key: &str) -> Result<(), PersistenceError> {
        if self.is_suspended { return Ok(()) }
        decrement(&mut self.write_behaviour, "write")
            .map_err(|_| PersistenceError::QuotaExceeded(key.to_string()))
    }
}


/// Return Ok(()) in case the value is `(1+, _)` or `(_, 0)`, or return Err and decrement otherwise
fn decrement(value: &mut (u32, u32), descr: &str) -> Result<(), String> {
    let remaining_successes = value.0;
    let remaining_failures = value.1;

    if remaining_successes > 0 {
        value.0 = value.0 - 1;
        log::debug!("Mock behaviour: allowing a {} ({:?})", descr, value);
        Ok(())
    } else {
        if remaining_failures > 0 {
            value.1 = value.1 - 1;
            log::debug!("Mock behaviour: failing a {} ({:?})", descr, value);
            Err(format!("Mocked behaviour requires this {} to fail this time. ({:?})", descr, value))
        } else {
            log::debug!("Mock behaviour: allowing a {} ({:?})", descr, value);
            Ok(())
        }
    }
}
