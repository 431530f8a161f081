//! Utilities to tell the UI layer that the task list must be rendered again

use std::fmt::{Display, Error, Formatter};

/// Sent after every mutation of the store
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderSignal {
    /// Incremented on every mutation. `0` means the store has not been mutated yet
    pub revision: u64,
    /// Whether the mutation has been durably saved. When this is `false`, the change only lives in memory
    pub persisted: bool,
}

impl Display for RenderSignal {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        match self.persisted {
            true => write!(f, "Revision {}", self.revision),
            false => write!(f, "Revision {} (not saved)", self.revision),
        }
    }
}


/// See [`render_channel`]
pub type RenderSender = tokio::sync::watch::Sender<RenderSignal>;
/// See [`render_channel`]
pub type RenderReceiver = tokio::sync::watch::Receiver<RenderSignal>;

/// Create a render channel. Receivers always see the latest signal, intermediate ones may be skipped
pub fn render_channel() -> (RenderSender, RenderReceiver) {
    tokio::sync::watch::channel(RenderSignal { revision: 0, persisted: true })
}
