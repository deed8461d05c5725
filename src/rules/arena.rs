//! The combat interpreter.
//!
//! An `Arena` bundles the [`Board`], the [`Presenter`] it reports to and the
//! ready queue that continuations are posted on. Everything that resolves
//! combat takes `&mut Arena`.
//!
//! ## Run loop
//!
//! Work enters through [`Arena::start`] and runs until the ready queue is
//! empty. Firing a [`Signal`] never calls back into the interpreter; it
//! posts the continuation, and [`Arena::process`] picks it up on the next
//! turn of the loop. When the queue drains while signals are still held
//! (a presenter is mid-animation), `process` returns
//! [`ResolutionStatus::Waiting`] and the caller resumes it later.
//!
//! An error from any job abandons the whole resolution: queued work is
//! dropped and every signal still alive is disowned.

use tracing::{debug, info, warn};

use super::attack::default_attack;
use super::board::Board;
use crate::cards::Trait;
use crate::core::{CombatError, CombatResult, EntityId, GameContext, PlayerId};
use crate::hooks::{self, HookSlot, TransferRecord};
use crate::stack::{Done, Mailbox, ResolutionStatus, Signal};
use crate::view::Presenter;

/// Board plus presenter plus run loop.
pub struct Arena {
    board: Board,
    presenter: Box<dyn Presenter>,
    mailbox: Mailbox,
}

impl Arena {
    #[must_use]
    pub fn new(board: Board, presenter: impl Presenter + 'static) -> Self {
        Self {
            board,
            presenter: Box::new(presenter),
            mailbox: Mailbox::new(),
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    // === Continuations ===

    /// Create a signal whose continuation runs on this arena when fired.
    pub fn signal<T: 'static>(
        &self,
        continuation: impl FnOnce(&mut Arena, T) -> CombatResult<()> + 'static,
    ) -> Signal<T> {
        self.mailbox.signal(continuation)
    }

    /// Completion signal running `continuation` when fired.
    pub fn done_with(
        &self,
        continuation: impl FnOnce(&mut Arena) -> CombatResult<()> + 'static,
    ) -> Done {
        self.signal(move |arena, ()| continuation(arena))
    }

    /// Completion signal with nothing after it.
    pub fn noop(&self) -> Done {
        self.signal(|_, ()| Ok(()))
    }

    /// Signals handed out and not yet fired.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.mailbox.outstanding()
    }

    /// Queue `job` and run until nothing is ready.
    pub fn start(
        &mut self,
        job: impl FnOnce(&mut Arena) -> CombatResult<()> + 'static,
    ) -> CombatResult<ResolutionStatus> {
        self.mailbox.post(Box::new(job));
        self.process()
    }

    /// Run ready continuations until the queue is empty.
    ///
    /// Stops at the first job that fails or drops a signal unfired; the
    /// jobs still queued behind it never run.
    pub fn process(&mut self) -> CombatResult<ResolutionStatus> {
        self.check_abandoned()?;
        while let Some(job) = self.mailbox.next_job() {
            if let Err(err) = job(self) {
                warn!(error = %err, "resolution aborted");
                self.mailbox.reset();
                return Err(err);
            }
            self.check_abandoned()?;
        }

        match self.mailbox.outstanding() {
            0 => Ok(ResolutionStatus::Complete),
            pending => {
                debug!(pending, "waiting on presentation");
                Ok(ResolutionStatus::Waiting { pending })
            }
        }
    }

    fn check_abandoned(&mut self) -> CombatResult<()> {
        let abandoned = self.mailbox.take_abandoned();
        if abandoned > 0 {
            warn!(abandoned, "completion signal dropped without firing");
            self.mailbox.reset();
            return Err(CombatError::StalledStep { abandoned });
        }
        Ok(())
    }

    // === Presentation ===

    pub fn show_attack(&mut self, card: EntityId, done: Done) {
        debug!(card = %card, "show attack");
        self.presenter.show_attack(card, done);
    }

    pub fn signal_ability(&mut self, card: EntityId, done: Done) {
        debug!(card = %card, "signal ability");
        self.presenter.signal_ability(card, done);
    }

    pub fn signal_damage(&mut self, card: EntityId, done: Done) {
        self.presenter.signal_damage(card, done);
    }

    pub fn signal_heal(&mut self, card: EntityId) {
        self.presenter.signal_heal(card);
    }

    /// Ask the presenter to redraw from current state.
    pub fn update_view(&mut self) {
        self.presenter.refresh();
    }

    // === Creature operations ===

    /// Context for an action by `card`, facing the slot opposite it.
    pub fn context_for(&self, card: EntityId) -> CombatResult<GameContext> {
        let seat = self
            .board
            .card(card)?
            .seat()
            .ok_or(CombatError::NotOnTable(card))?;
        let opposite = self.board.opponent_of(seat.player);
        Ok(GameContext::new(seat.player, opposite, card, seat.position))
    }

    /// Run `card`'s attack: its `performAttack` hook if it owns one,
    /// the default attack otherwise. `done` fires when the attack is over.
    pub fn attack(&mut self, card: EntityId, done: Done) -> CombatResult<()> {
        let ctx = self.context_for(card)?;
        match self.board.attack_hook(card) {
            Some(hook) => {
                debug!(card = %card, hook = %HookSlot::PerformAttack, "attack hook");
                hook(self, &ctx, done)
            }
            None => default_attack(self, &ctx, done),
        }
    }

    /// Seat `card` on `player`'s table, then run its `onEnterPlay` hook.
    pub fn enter_play(&mut self, player: PlayerId, card: EntityId, done: Done) -> CombatResult<()> {
        let seat = self.board.place(player, card)?;
        info!(card = %card, player = %player, position = seat.position, "card entered play");
        self.update_view();

        let ctx = self.context_for(card)?;
        match self.board.lifecycle_hook(card, HookSlot::OnEnterPlay) {
            Some(hook) => {
                debug!(card = %card, hook = %HookSlot::OnEnterPlay, "lifecycle hook");
                hook(self, &ctx, done)
            }
            None => {
                done.done();
                Ok(())
            }
        }
    }

    /// Run `card`'s `onLeavePlay` hook, then empty its slot.
    pub fn leave_play(&mut self, card: EntityId, done: Done) -> CombatResult<()> {
        let ctx = self.context_for(card)?;
        match self.board.lifecycle_hook(card, HookSlot::OnLeavePlay) {
            Some(hook) => {
                debug!(card = %card, hook = %HookSlot::OnLeavePlay, "lifecycle hook");
                let vacate = self.done_with(move |arena| {
                    arena.vacate(card)?;
                    done.done();
                    Ok(())
                });
                hook(self, &ctx, vacate)
            }
            None => {
                self.vacate(card)?;
                done.done();
                Ok(())
            }
        }
    }

    fn vacate(&mut self, card: EntityId) -> CombatResult<()> {
        self.board.unseat(card)?;
        self.update_view();
        Ok(())
    }

    /// Move the own hooks in `slots` from `from` to `to`, then refresh.
    pub fn transfer_abilities(
        &mut self,
        slots: &[HookSlot],
        from: EntityId,
        to: EntityId,
    ) -> CombatResult<TransferRecord> {
        let record = hooks::transfer(&mut self.board, slots, from, to)?;
        self.update_view();
        Ok(record)
    }

    /// Move the traits in `traits` from `from` to `to`, then refresh.
    pub fn transfer_traits(
        &mut self,
        traits: &[Trait],
        from: EntityId,
        to: EntityId,
    ) -> CombatResult<TransferRecord> {
        let record = hooks::transfer_traits(&mut self.board, traits, from, to)?;
        self.update_view();
        Ok(record)
    }

    // === Driver entry points ===

    /// Start an attack by `card` and run it as far as it goes.
    pub fn run_attack(&mut self, card: EntityId) -> CombatResult<ResolutionStatus> {
        self.start(move |arena| {
            let done = arena.noop();
            arena.attack(card, done)
        })
    }

    /// Play `card` onto `player`'s table and run its entry.
    pub fn play_card(&mut self, player: PlayerId, card: EntityId) -> CombatResult<ResolutionStatus> {
        self.start(move |arena| {
            let done = arena.noop();
            arena.enter_play(player, card, done)
        })
    }

    /// Take `card` out of play and run its exit.
    pub fn remove_card(&mut self, card: EntityId) -> CombatResult<ResolutionStatus> {
        self.start(move |arena| {
            let done = arena.noop();
            arena.leave_play(card, done)
        })
    }
}

impl std::fmt::Debug for Arena {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Arena")
            .field("board", &self.board)
            .field("pending", &self.pending())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::games::ducks;
    use crate::hooks::Hook;
    use crate::view::{DeferredPresenter, InstantPresenter, PresentationKind};
    use crate::CombatConfig;

    const P0: PlayerId = PlayerId(0);
    const P1: PlayerId = PlayerId(1);

    fn arena() -> Arena {
        ducks::arena(CombatConfig::default(), InstantPresenter::new())
    }

    #[test]
    fn test_start_completes() {
        let mut arena = arena();
        let ran = Rc::new(Cell::new(false));
        let flag = Rc::clone(&ran);

        let status = arena
            .start(move |_| {
                flag.set(true);
                Ok(())
            })
            .unwrap();

        assert_eq!(status, ResolutionStatus::Complete);
        assert!(ran.get());
    }

    #[test]
    fn test_dropped_signal_is_stalled_step() {
        let mut arena = arena();
        let result = arena.start(|arena| {
            let done = arena.noop();
            drop(done);
            Ok(())
        });

        assert_eq!(result, Err(CombatError::StalledStep { abandoned: 1 }));
        assert_eq!(arena.pending(), 0);
    }

    #[test]
    fn test_dropped_signal_stops_queued_jobs() {
        let mut arena = arena();
        let ran = Rc::new(Cell::new(false));
        let flag = Rc::clone(&ran);

        let result = arena.start(move |arena| {
            let next = arena.done_with(move |_| {
                flag.set(true);
                Ok(())
            });
            next.done();
            drop(arena.noop());
            Ok(())
        });

        assert_eq!(result, Err(CombatError::StalledStep { abandoned: 1 }));
        assert!(!ran.get());
        assert_eq!(arena.process(), Ok(ResolutionStatus::Complete));
    }

    #[test]
    fn test_error_abandons_resolution() {
        let mut arena = arena();
        let result = arena.start(|arena| {
            let _held = arena.noop();
            Err(CombatError::UnknownCard(EntityId(99)))
        });

        assert_eq!(result, Err(CombatError::UnknownCard(EntityId(99))));
        assert_eq!(arena.pending(), 0);
        assert_eq!(arena.process(), Ok(ResolutionStatus::Complete));
    }

    #[test]
    fn test_default_attack_hits_opposite_card() {
        let mut arena = arena();
        let duck = arena.board_mut().create_card(ducks::DUCK).unwrap();
        let dog = arena.board_mut().create_card(ducks::DOG).unwrap();
        arena.play_card(P0, duck).unwrap();
        arena.play_card(P1, dog).unwrap();

        assert!(arena.run_attack(duck).unwrap().is_complete());
        assert_eq!(arena.board().card(dog).unwrap().current_power, 1);
    }

    #[test]
    fn test_default_attack_hits_player_when_slot_empty() {
        let mut arena = arena();
        let duck = arena.board_mut().create_card(ducks::DUCK).unwrap();
        arena.play_card(P0, duck).unwrap();

        arena.run_attack(duck).unwrap();
        assert_eq!(arena.board().player(P1).unwrap().power, 9);
    }

    #[test]
    fn test_card_at_floor_leaves_play() {
        let mut arena = arena();
        let dog = arena.board_mut().create_card(ducks::DOG).unwrap();
        let duck = arena.board_mut().create_card(ducks::DUCK).unwrap();
        arena.play_card(P0, dog).unwrap();
        arena.play_card(P1, duck).unwrap();

        arena.run_attack(dog).unwrap();
        assert!(!arena.board().card(duck).unwrap().is_in_play());
        assert_eq!(arena.board().card_at(P1, 0), None);
    }

    #[test]
    fn test_leave_play_runs_hook_before_vacating() {
        let mut arena = arena();
        let seen = Rc::new(Cell::new(None));
        let watch = Rc::clone(&seen);
        let card = arena.board_mut().create_card(ducks::DUCK).unwrap();
        arena
            .board_mut()
            .card_mut(card)
            .unwrap()
            .hooks
            .insert(Hook::on_leave_play(move |arena, ctx, done| {
                watch.set(Some(arena.board().card(ctx.source)?.is_in_play()));
                done.done();
                Ok(())
            }));
        arena.play_card(P0, card).unwrap();

        arena.remove_card(card).unwrap();
        assert_eq!(seen.get(), Some(true));
        assert!(!arena.board().card(card).unwrap().is_in_play());
    }

    #[test]
    fn test_attack_off_table_is_error() {
        let mut arena = arena();
        let duck = arena.board_mut().create_card(ducks::DUCK).unwrap();
        assert_eq!(arena.run_attack(duck), Err(CombatError::NotOnTable(duck)));
    }

    #[test]
    fn test_deferred_presenter_suspends() {
        let presenter = DeferredPresenter::new();
        let parked = presenter.parked();
        let mut arena = ducks::arena(CombatConfig::default(), presenter);
        let duck = arena.board_mut().create_card(ducks::DUCK).unwrap();
        arena.play_card(P0, duck).unwrap();

        let status = arena.run_attack(duck).unwrap();
        assert!(matches!(status, ResolutionStatus::Waiting { .. }));
        assert_eq!(parked.peek().map(|e| e.kind), Some(PresentationKind::Attack));
        assert_eq!(arena.board().player(P1).unwrap().power, 10);

        parked.release_next();
        assert!(arena.process().unwrap().is_complete());
        assert_eq!(arena.board().player(P1).unwrap().power, 9);
    }

    #[test]
    fn test_transfer_refreshes_view() {
        let presenter = InstantPresenter::new();
        let log = presenter.log();
        let mut arena = ducks::arena(CombatConfig::default(), presenter);
        let trasher = arena.board_mut().create_card(ducks::TRASHER).unwrap();
        let duck = arena.board_mut().create_card(ducks::DUCK).unwrap();
        log.clear();

        let record = arena
            .transfer_abilities(&[HookSlot::ModifyTakenDamage], trasher, duck)
            .unwrap();
        assert_eq!(record.moved, vec![HookSlot::ModifyTakenDamage]);
        assert_eq!(log.kinds(), vec![PresentationKind::Refresh]);
    }
}
