//! Ordered effect queue.
//!
//! A `Sequencer` runs its steps strictly in push order. Each step gets a
//! [`Done`] and the next step starts only after that signal fires, whether
//! the step fires it immediately or hands it to a presenter that fires it
//! when an animation ends. When the last step is done the sequencer fires
//! the `on_all_done` signal it was started with, exactly once.
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use ccg_combat::games::ducks;
//! use ccg_combat::stack::{ResolutionStatus, Sequencer};
//! use ccg_combat::view::InstantPresenter;
//! use ccg_combat::CombatConfig;
//!
//! let mut arena = ducks::arena(CombatConfig::default(), InstantPresenter::new());
//! let log = Rc::new(RefCell::new(Vec::new()));
//!
//! let mut seq = Sequencer::new();
//! for i in 0..3 {
//!     let log = Rc::clone(&log);
//!     seq.push(move |_, done| {
//!         log.borrow_mut().push(i);
//!         done.done();
//!         Ok(())
//!     });
//! }
//!
//! let status = arena.start(move |arena| seq.continue_with(arena, |_| Ok(()))).unwrap();
//! assert_eq!(status, ResolutionStatus::Complete);
//! assert_eq!(*log.borrow(), vec![0, 1, 2]);
//! ```

use std::collections::VecDeque;

use tracing::debug;

use super::signal::Done;
use crate::core::CombatResult;
use crate::rules::Arena;

/// One unit of work. Must fire its `Done` exactly once.
pub type Step = Box<dyn FnOnce(&mut Arena, Done) -> CombatResult<()>>;

/// Strictly ordered, single-threaded step runner.
#[derive(Default)]
pub struct Sequencer {
    steps: VecDeque<Step>,
    started: usize,
}

impl Sequencer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a step.
    pub fn push(&mut self, step: impl FnOnce(&mut Arena, Done) -> CombatResult<()> + 'static) {
        self.steps.push_back(Box::new(step));
    }

    /// Steps not yet started.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Run every step in order, then fire `on_all_done`.
    ///
    /// Returns once the first step has been started; the rest run as
    /// their predecessors' signals fire.
    pub fn run(mut self, arena: &mut Arena, on_all_done: Done) -> CombatResult<()> {
        match self.steps.pop_front() {
            None => {
                debug!(steps = self.started, "sequence complete");
                on_all_done.done();
                Ok(())
            }
            Some(step) => {
                self.started += 1;
                debug!(step = self.started, remaining = self.steps.len(), "starting step");
                let next = arena.signal(move |arena, ()| self.run(arena, on_all_done));
                step(arena, next)
            }
        }
    }

    /// Run every step in order, then call `continuation`.
    pub fn continue_with(
        self,
        arena: &mut Arena,
        continuation: impl FnOnce(&mut Arena) -> CombatResult<()> + 'static,
    ) -> CombatResult<()> {
        let on_all_done = arena.signal(move |arena, ()| continuation(arena));
        self.run(arena, on_all_done)
    }
}

impl std::fmt::Debug for Sequencer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sequencer")
            .field("pending", &self.steps.len())
            .field("started", &self.started)
            .finish()
    }
}
