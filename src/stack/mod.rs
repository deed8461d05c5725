//! Sequencing: one-shot signals and the ordered step queue.
//!
//! Resolution is single-threaded and cooperative. Work suspends only when
//! a [`Signal`] is handed to someone who does not fire it right away
//! (typically a presenter playing an animation). The arena's run loop
//! then reports [`ResolutionStatus::Waiting`] and the caller resumes it
//! once the presenter fires.
//!
//! - [`Signal`] / [`Done`]: one-shot continuation handles
//! - [`Sequencer`]: strictly ordered steps, each waiting on the previous
//!   step's `Done`

mod sequencer;
mod signal;

pub use sequencer::{Sequencer, Step};
pub use signal::{Done, Signal};

pub(crate) use signal::Mailbox;

use serde::{Deserialize, Serialize};

/// Status returned by the arena's run loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolutionStatus {
    /// Nothing queued and no signal outstanding.
    Complete,

    /// Queue drained, but `pending` signals are still held (usually by
    /// the presenter). Fire them and process again.
    Waiting { pending: usize },
}

impl ResolutionStatus {
    #[must_use]
    pub fn is_complete(self) -> bool {
        matches!(self, ResolutionStatus::Complete)
    }
}
