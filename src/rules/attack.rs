//! Attacks as sequencer programs.
//!
//! An attack is a [`Sequencer`]: presentation steps first, then one
//! resolution step per target. Kinds that override `performAttack` build
//! their own program from the same pieces.

use crate::core::{CombatResult, EntityId, GameContext};
use crate::effects::{deal_damage, DamageEvent};
use crate::stack::{Done, Sequencer};

use super::arena::Arena;

/// The attack every card without a `performAttack` hook makes.
///
/// Shows the attack, then hits the card in the opposing slot for the
/// attacker's current power, or the opposing player for the configured
/// player damage when that slot is empty.
pub fn default_attack(arena: &mut Arena, ctx: &GameContext, done: Done) -> CombatResult<()> {
    let ctx = *ctx;
    let mut seq = Sequencer::new();
    seq.push(move |arena, next| {
        arena.show_attack(ctx.source, next);
        Ok(())
    });
    seq.push(move |arena, next| strike_opposite(arena, &ctx, next));
    seq.run(arena, done)
}

/// Hit whatever faces the attacker: the opposing card, else the player.
pub fn strike_opposite(arena: &mut Arena, ctx: &GameContext, done: Done) -> CombatResult<()> {
    match arena.board().card_at(ctx.opposite_player, ctx.position) {
        Some(target) => {
            let power = arena.board().card(ctx.source)?.current_power;
            strike(arena, ctx, target, power, done)
        }
        None => {
            let damage = arena.board().config().player_damage;
            strike(arena, ctx, ctx.opposite_entity(), damage, done)
        }
    }
}

/// Run `base` damage from the context's source to `target` through the
/// modifier pipeline.
pub fn strike(
    arena: &mut Arena,
    ctx: &GameContext,
    target: EntityId,
    base: i64,
    done: Done,
) -> CombatResult<()> {
    deal_damage(arena, DamageEvent::new(ctx.source, target, *ctx), base, done)
}
