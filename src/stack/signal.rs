//! One-shot continuation handles.
//!
//! A [`Signal<T>`] is what a step, hook or presenter receives to say "I am
//! finished, here is my result". It is move-only and consumed by
//! [`Signal::resume`], so it fires at most once. A signal dropped without
//! firing is counted as abandoned and reported by the next
//! `Arena::process` call.
//!
//! Firing never runs the continuation inline: it posts it to the arena's
//! ready queue. That keeps the interpreter non-reentrant and lets
//! presenters hold a signal for as long as an animation takes.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::core::CombatResult;
use crate::rules::Arena;

/// A unit of ready work.
pub(crate) type Job = Box<dyn FnOnce(&mut Arena) -> CombatResult<()>>;

type Continuation<T> = Box<dyn FnOnce(&mut Arena, T) -> CombatResult<()>>;

#[derive(Default)]
struct MailboxState {
    ready: VecDeque<Job>,
    outstanding: usize,
    abandoned: usize,
    epoch: u64,
}

/// Ready queue plus bookkeeping for unfired signals.
///
/// Shared between the arena and every live signal.
#[derive(Clone, Default)]
pub(crate) struct Mailbox {
    inner: Rc<RefCell<MailboxState>>,
}

impl Mailbox {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Create a signal whose continuation runs when it fires.
    pub(crate) fn signal<T: 'static>(
        &self,
        continuation: impl FnOnce(&mut Arena, T) -> CombatResult<()> + 'static,
    ) -> Signal<T> {
        let epoch = {
            let mut state = self.inner.borrow_mut();
            state.outstanding += 1;
            state.epoch
        };
        Signal {
            mailbox: self.clone(),
            epoch,
            continuation: Some(Box::new(continuation)),
        }
    }

    /// Queue work that is not tied to a signal.
    pub(crate) fn post(&self, job: Job) {
        self.inner.borrow_mut().ready.push_back(job);
    }

    pub(crate) fn next_job(&self) -> Option<Job> {
        self.inner.borrow_mut().ready.pop_front()
    }

    /// Signals created but not yet fired or dropped.
    pub(crate) fn outstanding(&self) -> usize {
        self.inner.borrow().outstanding
    }

    pub(crate) fn take_abandoned(&self) -> usize {
        std::mem::take(&mut self.inner.borrow_mut().abandoned)
    }

    /// Forget the current resolution: drop queued work and disown every
    /// signal still alive. Signals from before the reset fire into nothing.
    pub(crate) fn reset(&self) {
        let drained: Vec<Job> = {
            let mut state = self.inner.borrow_mut();
            state.epoch += 1;
            state.ready.drain(..).collect()
        };
        // Dropping queued jobs can drop signals they captured, which
        // borrows the state again.
        drop(drained);

        let mut state = self.inner.borrow_mut();
        state.outstanding = 0;
        state.abandoned = 0;
    }

    fn settle(&self, epoch: u64, job: Job) {
        let mut state = self.inner.borrow_mut();
        if state.epoch != epoch {
            return;
        }
        state.outstanding -= 1;
        state.ready.push_back(job);
    }

    fn abandon(&self, epoch: u64) {
        let mut state = self.inner.borrow_mut();
        if state.epoch != epoch {
            return;
        }
        state.outstanding -= 1;
        state.abandoned += 1;
    }
}

/// One-shot continuation carrying a `T`.
///
/// Create with `Arena::signal`; fire with [`Signal::resume`] (or
/// [`Signal::done`] for [`Done`]).
#[must_use = "a signal that is never fired stalls its resolution"]
pub struct Signal<T: 'static> {
    mailbox: Mailbox,
    epoch: u64,
    continuation: Option<Continuation<T>>,
}

/// Completion signal of a step.
pub type Done = Signal<()>;

impl<T: 'static> Signal<T> {
    /// Fire the signal with its result.
    pub fn resume(mut self, value: T) {
        if let Some(k) = self.continuation.take() {
            self.mailbox
                .settle(self.epoch, Box::new(move |arena| k(arena, value)));
        }
    }
}

impl Signal<()> {
    /// Fire a completion signal.
    pub fn done(self) {
        self.resume(());
    }
}

impl<T: 'static> Drop for Signal<T> {
    fn drop(&mut self) {
        if self.continuation.is_some() {
            self.mailbox.abandon(self.epoch);
        }
    }
}

impl<T: 'static> std::fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signal")
            .field("epoch", &self.epoch)
            .field("fired", &self.continuation.is_none())
            .finish()
    }
}
