//! Presentation surface.
//!
//! The combat core never renders anything. It tells a [`Presenter`] what
//! happened and, where the presentation takes time, hands it a [`Done`]
//! to fire when it is finished. Resolution waits on that signal and on
//! nothing else, so correctness never depends on animation timing.
//!
//! Two presenters ship with the crate:
//!
//! - [`InstantPresenter`]: fires every signal immediately and records what
//!   it was asked to show
//! - [`DeferredPresenter`]: parks every signal until the driver releases
//!   it, to exercise suspension

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::core::EntityId;
use crate::stack::Done;

/// The view capability the combat core calls into.
pub trait Presenter {
    /// Play an attack animation for `card`, then fire `done`.
    fn show_attack(&mut self, card: EntityId, done: Done);

    /// Highlight that `card` used an ability, then fire `done`.
    fn signal_ability(&mut self, card: EntityId, done: Done);

    /// Show `card` being hit, then fire `done`.
    fn signal_damage(&mut self, card: EntityId, done: Done);

    /// Show `card` being healed. Fire-and-forget.
    fn signal_heal(&mut self, card: EntityId);

    /// Redraw from current state.
    fn refresh(&mut self) {}
}

const DEFAULT_RATE_BITS: u64 = 0x3FF0_0000_0000_0000; // 1.0f64

static SPEED_RATE: AtomicU64 = AtomicU64::new(DEFAULT_RATE_BITS);

/// Process-wide animation speed. Read by presenters only.
pub struct SpeedRate;

impl SpeedRate {
    /// Set the global rate. Values above 1 speed animations up.
    pub fn set(rate: f64) {
        assert!(rate.is_finite() && rate > 0.0, "Speed rate must be positive");
        SPEED_RATE.store(rate.to_bits(), Ordering::Relaxed);
    }

    #[must_use]
    pub fn get() -> f64 {
        f64::from_bits(SPEED_RATE.load(Ordering::Relaxed))
    }

    /// Scale a base duration by the current rate.
    #[must_use]
    pub fn scale(base_ms: u64) -> u64 {
        scaled(base_ms, Self::get())
    }
}

fn scaled(base_ms: u64, rate: f64) -> u64 {
    (base_ms as f64 / rate).round() as u64
}

/// What a presenter was asked to show.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PresentationKind {
    Attack,
    Ability,
    Damage,
    Heal,
    Refresh,
}

impl PresentationKind {
    /// Nominal duration at speed rate 1.
    #[must_use]
    pub const fn base_duration_ms(self) -> u64 {
        match self {
            PresentationKind::Attack => 500,
            PresentationKind::Ability => 400,
            PresentationKind::Damage => 300,
            PresentationKind::Heal => 300,
            PresentationKind::Refresh => 0,
        }
    }
}

/// One presentation request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresentationEvent {
    pub kind: PresentationKind,
    pub card: Option<EntityId>,
    pub duration_ms: u64,
}

impl PresentationEvent {
    fn new(kind: PresentationKind, card: Option<EntityId>) -> Self {
        Self {
            kind,
            card,
            duration_ms: SpeedRate::scale(kind.base_duration_ms()),
        }
    }
}

/// Shared, append-only record of presentation requests.
#[derive(Clone, Debug, Default)]
pub struct PresentationLog {
    events: Rc<RefCell<Vec<PresentationEvent>>>,
}

impl PresentationLog {
    fn push(&self, event: PresentationEvent) {
        self.events.borrow_mut().push(event);
    }

    #[must_use]
    pub fn events(&self) -> Vec<PresentationEvent> {
        self.events.borrow().clone()
    }

    #[must_use]
    pub fn kinds(&self) -> Vec<PresentationKind> {
        self.events.borrow().iter().map(|e| e.kind).collect()
    }

    /// Number of requests of `kind`.
    #[must_use]
    pub fn count(&self, kind: PresentationKind) -> usize {
        self.events.borrow().iter().filter(|e| e.kind == kind).count()
    }

    /// Cards targeted by requests of `kind`, in request order.
    #[must_use]
    pub fn cards(&self, kind: PresentationKind) -> Vec<EntityId> {
        self.events
            .borrow()
            .iter()
            .filter(|e| e.kind == kind)
            .filter_map(|e| e.card)
            .collect()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}

/// Presenter that completes everything immediately.
#[derive(Clone, Debug, Default)]
pub struct InstantPresenter {
    log: PresentationLog,
}

impl InstantPresenter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle on the request log; stays valid after the presenter is
    /// moved into an arena.
    #[must_use]
    pub fn log(&self) -> PresentationLog {
        self.log.clone()
    }

    fn record(&self, kind: PresentationKind, card: EntityId) {
        self.log.push(PresentationEvent::new(kind, Some(card)));
    }
}

impl Presenter for InstantPresenter {
    fn show_attack(&mut self, card: EntityId, done: Done) {
        self.record(PresentationKind::Attack, card);
        done.done();
    }

    fn signal_ability(&mut self, card: EntityId, done: Done) {
        self.record(PresentationKind::Ability, card);
        done.done();
    }

    fn signal_damage(&mut self, card: EntityId, done: Done) {
        self.record(PresentationKind::Damage, card);
        done.done();
    }

    fn signal_heal(&mut self, card: EntityId) {
        self.record(PresentationKind::Heal, card);
    }

    fn refresh(&mut self) {
        self.log.push(PresentationEvent::new(PresentationKind::Refresh, None));
    }
}

/// Signals parked by a [`DeferredPresenter`].
#[derive(Clone, Default)]
pub struct ParkedSignals {
    queue: Rc<RefCell<VecDeque<(PresentationEvent, Done)>>>,
}

impl ParkedSignals {
    /// Fire the oldest parked signal. Returns what it was for.
    pub fn release_next(&self) -> Option<PresentationEvent> {
        let (event, done) = self.queue.borrow_mut().pop_front()?;
        done.done();
        Some(event)
    }

    /// Oldest parked request, without firing it.
    #[must_use]
    pub fn peek(&self) -> Option<PresentationEvent> {
        self.queue.borrow().front().map(|(event, _)| *event)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.borrow().is_empty()
    }
}

impl std::fmt::Debug for ParkedSignals {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParkedSignals").field("len", &self.len()).finish()
    }
}

/// Presenter that holds every completion signal until released.
#[derive(Clone, Debug, Default)]
pub struct DeferredPresenter {
    parked: ParkedSignals,
    log: PresentationLog,
}

impl DeferredPresenter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle for releasing parked signals from outside the arena.
    #[must_use]
    pub fn parked(&self) -> ParkedSignals {
        self.parked.clone()
    }

    #[must_use]
    pub fn log(&self) -> PresentationLog {
        self.log.clone()
    }

    fn park(&self, kind: PresentationKind, card: EntityId, done: Done) {
        let event = PresentationEvent::new(kind, Some(card));
        self.log.push(event);
        self.parked.queue.borrow_mut().push_back((event, done));
    }
}

impl Presenter for DeferredPresenter {
    fn show_attack(&mut self, card: EntityId, done: Done) {
        self.park(PresentationKind::Attack, card, done);
    }

    fn signal_ability(&mut self, card: EntityId, done: Done) {
        self.park(PresentationKind::Ability, card, done);
    }

    fn signal_damage(&mut self, card: EntityId, done: Done) {
        self.park(PresentationKind::Damage, card, done);
    }

    fn signal_heal(&mut self, card: EntityId) {
        self.log.push(PresentationEvent::new(PresentationKind::Heal, Some(card)));
    }

    fn refresh(&mut self) {
        self.log.push(PresentationEvent::new(PresentationKind::Refresh, None));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaled_durations() {
        assert_eq!(scaled(500, 1.0), 500);
        assert_eq!(scaled(500, 2.0), 250);
        assert_eq!(scaled(300, 0.5), 600);
    }

    #[test]
    fn test_base_durations() {
        assert_eq!(PresentationKind::Attack.base_duration_ms(), 500);
        assert_eq!(PresentationKind::Refresh.base_duration_ms(), 0);
    }

    #[test]
    #[should_panic(expected = "Speed rate must be positive")]
    fn test_speed_rate_rejects_zero() {
        SpeedRate::set(0.0);
    }

    #[test]
    fn test_log_filters() {
        let log = PresentationLog::default();
        log.push(PresentationEvent::new(PresentationKind::Attack, Some(EntityId(3))));
        log.push(PresentationEvent::new(PresentationKind::Damage, Some(EntityId(4))));
        log.push(PresentationEvent::new(PresentationKind::Refresh, None));

        assert_eq!(log.count(PresentationKind::Attack), 1);
        assert_eq!(log.cards(PresentationKind::Damage), vec![EntityId(4)]);
        assert_eq!(log.kinds().len(), 3);

        log.clear();
        assert!(log.events().is_empty());
    }
}
