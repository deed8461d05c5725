//! Damage modifier pipeline.
//!
//! A damage number travels through at most two hooks before it lands:
//!
//! 1. the attacker's `modifyDealtDamageToCreature`, or
//!    `modifyDealtDamageToPlayer` when the defender is a player;
//! 2. the defender's `modifyTakenDamage` (cards only).
//!
//! Each hook receives the running amount and a [`Signal<i64>`] to resume
//! with the adjusted one, so a hook may play an ability animation first.
//! A missing hook passes the amount through unchanged. The result is
//! clamped at zero and subtracted from the defender's power; a card that
//! reaches the power floor leaves play before the pipeline completes.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::{CombatResult, EntityId, GameContext};
use crate::hooks::HookSlot;
use crate::rules::Arena;
use crate::stack::{Done, Signal};

/// Who hits whom, in which resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageEvent {
    pub attacker: EntityId,
    pub defender: EntityId,
    pub context: GameContext,
}

impl DamageEvent {
    #[must_use]
    pub fn new(attacker: EntityId, defender: EntityId, context: GameContext) -> Self {
        Self {
            attacker,
            defender,
            context,
        }
    }
}

/// Run `base` through the attacker's and defender's modifier hooks and
/// resume `result` with the final, non-negative amount. Nothing is applied.
pub fn resolve_damage(
    arena: &mut Arena,
    event: DamageEvent,
    base: i64,
    result: Signal<i64>,
) -> CombatResult<()> {
    let slot = if arena.board().is_player(event.defender) {
        HookSlot::ModifyDealtDamageToPlayer
    } else {
        HookSlot::ModifyDealtDamageToCreature
    };

    match arena.board().modifier_hook(event.attacker, slot) {
        Some(hook) => {
            debug!(attacker = %event.attacker, hook = %slot, amount = base, "attacker hook");
            let next = arena.signal(move |arena, amount| defender_stage(arena, event, amount, result));
            hook(arena, &event, base, next)
        }
        None => defender_stage(arena, event, base, result),
    }
}

fn defender_stage(
    arena: &mut Arena,
    event: DamageEvent,
    amount: i64,
    result: Signal<i64>,
) -> CombatResult<()> {
    match arena
        .board()
        .modifier_hook(event.defender, HookSlot::ModifyTakenDamage)
    {
        Some(hook) => {
            debug!(defender = %event.defender, amount, "defender hook");
            let next = arena.signal(move |_, amount: i64| {
                result.resume(amount.max(0));
                Ok(())
            });
            hook(arena, &event, amount, next)
        }
        None => {
            result.resume(amount.max(0));
            Ok(())
        }
    }
}

/// Resolve `base` through the pipeline and apply the result to the
/// defender. `done` fires after the damage (and any removal) completes.
pub fn deal_damage(arena: &mut Arena, event: DamageEvent, base: i64, done: Done) -> CombatResult<()> {
    let apply = arena.signal(move |arena, amount| apply_damage(arena, event, amount, done));
    resolve_damage(arena, event, base, apply)
}

fn apply_damage(arena: &mut Arena, event: DamageEvent, amount: i64, done: Done) -> CombatResult<()> {
    if amount <= 0 {
        debug!(defender = %event.defender, "damage fully absorbed");
        done.done();
        return Ok(());
    }

    if let Some(player) = arena.board().as_player(event.defender) {
        let power = arena.board_mut().player_mut(player)?.lose_power(amount);
        info!(player = %player, amount, power, "player damaged");
        arena.update_view();
        done.done();
        return Ok(());
    }

    let defender = event.defender;
    arena.board().card(defender)?;
    let land = arena.signal(move |arena, ()| {
        let floor = arena.board().config().min_power;
        let card = arena.board_mut().card_mut(defender)?;
        let power = card.lose_power(amount, floor);
        let leaves = card.is_exhausted(floor) && card.is_in_play();
        info!(card = %defender, amount, power, "card damaged");
        arena.update_view();

        if leaves {
            arena.leave_play(defender, done)
        } else {
            done.done();
            Ok(())
        }
    });
    arena.signal_damage(defender, land);
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::cards::{KindDefinition, KindId};
    use crate::games::ducks;
    use crate::hooks::Hook;
    use crate::view::InstantPresenter;
    use crate::CombatConfig;

    fn arena() -> Arena {
        ducks::arena(CombatConfig::default(), InstantPresenter::new())
    }

    fn plain(arena: &mut Arena, power: i64) -> EntityId {
        let kind = KindDefinition::new(KindId::new(100 + power as u32), "Plain", power);
        arena.board_mut().create_card_from(&kind)
    }

    fn resolved(arena: &mut Arena, event: DamageEvent, base: i64) -> i64 {
        let out = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&out);
        arena
            .start(move |arena| {
                let k = arena.signal(move |_, amount| {
                    *sink.borrow_mut() = Some(amount);
                    Ok(())
                });
                resolve_damage(arena, event, base, k)
            })
            .unwrap();
        let value = *out.borrow();
        value.unwrap()
    }

    #[test]
    fn test_no_hooks_is_identity() {
        let mut arena = arena();
        let a = plain(&mut arena, 3);
        let d = plain(&mut arena, 4);
        let ctx = GameContext::new(crate::core::PlayerId::new(0), crate::core::PlayerId::new(1), a, 0);

        assert_eq!(resolved(&mut arena, DamageEvent::new(a, d, ctx), 3), 3);
    }

    #[test]
    fn test_result_is_clamped() {
        let mut arena = arena();
        let a = plain(&mut arena, 3);
        let d = plain(&mut arena, 4);
        arena.board_mut().card_mut(d).unwrap().hooks.insert(Hook::modify_taken_damage(
            |_, _, value, k| {
                k.resume(value - 10);
                Ok(())
            },
        ));
        let ctx = GameContext::new(crate::core::PlayerId::new(0), crate::core::PlayerId::new(1), a, 0);

        assert_eq!(resolved(&mut arena, DamageEvent::new(a, d, ctx), 3), 0);
    }

    #[test]
    fn test_player_defender_uses_player_hook() {
        let mut arena = arena();
        let a = plain(&mut arena, 3);
        {
            let card = arena.board_mut().card_mut(a).unwrap();
            card.hooks.insert(Hook::modify_dealt_damage_to_player(|_, _, value, k| {
                k.resume(value * 10);
                Ok(())
            }));
            card.hooks.insert(Hook::modify_dealt_damage_to_creature(|_, _, value, k| {
                k.resume(value + 1);
                Ok(())
            }));
        }
        let ctx = GameContext::new(crate::core::PlayerId::new(0), crate::core::PlayerId::new(1), a, 0);

        let to_player = DamageEvent::new(a, ctx.opposite_entity(), ctx);
        assert_eq!(resolved(&mut arena, to_player, 2), 20);
    }
}
