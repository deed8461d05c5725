//! Kind definitions for Ducks vs Dogs.

use tracing::info;

use crate::cards::{KindDefinition, KindId, Trait};
use crate::core::{CombatResult, EntityId, GameContext};
use crate::effects::empower;
use crate::hooks::{Hook, HookSlot};
use crate::rules::{default_attack, strike, Arena};
use crate::stack::{Done, Sequencer};

pub const CREATURE: KindId = KindId::new(0);
pub const DUCK: KindId = KindId::new(1);
pub const DOG: KindId = KindId::new(2);
pub const GATLING: KindId = KindId::new(3);
pub const TRASHER: KindId = KindId::new(4);
pub const LAD: KindId = KindId::new(5);
pub const ROGUE: KindId = KindId::new(6);
pub const BREWER: KindId = KindId::new(7);
pub const PSEUDO_DUCK: KindId = KindId::new(8);
pub const NEMO: KindId = KindId::new(9);

pub const QUACKS: Trait = Trait::new("quacks");
pub const SWIMS: Trait = Trait::new("swims");

/// Damage Gatling deals to each opposing slot.
pub const GATLING_DAMAGE: i64 = 2;

pub const TRASHER_TEXT: &str = "Takes 1 less damage";
pub const LAD_DEALT_TEXT: &str = "Hits harder the more Lads are in play";
pub const LAD_TAKEN_TEXT: &str = "Shrugs off more damage the more Lads are in play";
pub const ROGUE_TEXT: &str = "Steals its target's damage abilities before attacking";
pub const BREWER_TEXT: &str = "Feeds every duck before attacking";
pub const NEMO_TEXT: &str = "Takes on its target's nature before attacking";

/// Every kind, parents before children.
pub fn definitions() -> Vec<KindDefinition> {
    vec![
        KindDefinition::new(CREATURE, "Creature", 1),
        KindDefinition::new(DUCK, "Civilian", 2)
            .with_parent(CREATURE)
            .with_trait(QUACKS)
            .with_trait(SWIMS),
        KindDefinition::new(DOG, "Bandit", 3).with_parent(CREATURE),
        gatling(),
        trasher(),
        lad(),
        rogue(),
        brewer(),
        KindDefinition::new(PSEUDO_DUCK, "PseudoDuck", 3)
            .with_parent(DOG)
            .with_trait(QUACKS)
            .with_trait(SWIMS),
        nemo(),
    ]
}

fn gatling() -> KindDefinition {
    KindDefinition::new(GATLING, "Gatling", 6)
        .with_parent(CREATURE)
        .with_hook(
            Hook::perform_attack(gatling_attack)
                .with_text("Fires at every opposing slot"),
        )
}

/// One shot per opposing slot, in table order. An empty slot is skipped.
fn gatling_attack(arena: &mut Arena, ctx: &GameContext, done: Done) -> CombatResult<()> {
    let ctx = *ctx;
    let slots = arena.board().table(ctx.opposite_player)?.slot_count();

    let mut seq = Sequencer::new();
    for position in 0..slots {
        seq.push(move |arena, next| {
            arena.show_attack(ctx.source, next);
            Ok(())
        });
        seq.push(move |arena, next| {
            match arena.board().card_at(ctx.opposite_player, position) {
                Some(target) => strike(arena, &ctx, target, GATLING_DAMAGE, next),
                None => {
                    next.done();
                    Ok(())
                }
            }
        });
    }
    seq.run(arena, done)
}

fn trasher() -> KindDefinition {
    KindDefinition::new(TRASHER, "Trasher", 5)
        .with_parent(DOG)
        .with_hook(
            Hook::modify_taken_damage(|arena, event, value, k| {
                let reduced = arena.signal(move |_, ()| {
                    k.resume(value - 1);
                    Ok(())
                });
                arena.signal_ability(event.defender, reduced);
                Ok(())
            })
            .with_text(TRASHER_TEXT),
        )
}

/// Lads count themselves in and out of the population registry and
/// scale both their damage and their toughness by its bonus.
fn lad() -> KindDefinition {
    KindDefinition::new(LAD, "Lad", 2)
        .with_parent(DOG)
        .with_hook(Hook::on_enter_play(|arena, ctx, done| {
            let count = arena.board_mut().population_mut().increment(LAD, ctx.source)?;
            info!(card = %ctx.source, count, "lad joined");
            done.done();
            Ok(())
        }))
        .with_hook(Hook::on_leave_play(|arena, ctx, done| {
            let count = arena.board_mut().population_mut().decrement(LAD, ctx.source)?;
            info!(card = %ctx.source, count, "lad left");
            done.done();
            Ok(())
        }))
        .with_hook(
            Hook::modify_dealt_damage_to_creature(|arena, _, value, k| {
                k.resume(value + arena.board().population().bonus(LAD));
                Ok(())
            })
            .with_text(LAD_DEALT_TEXT),
        )
        .with_hook(
            Hook::modify_taken_damage(|arena, event, value, k| {
                // Bonus is read after the ability signal; the count may
                // have changed while it played.
                let reduced = arena.signal(move |arena, ()| {
                    k.resume(value - arena.board().population().bonus(LAD));
                    Ok(())
                });
                arena.signal_ability(event.defender, reduced);
                Ok(())
            })
            .with_text(LAD_TAKEN_TEXT),
        )
}

fn rogue() -> KindDefinition {
    KindDefinition::new(ROGUE, "Rogue", 2)
        .with_parent(CREATURE)
        .with_hook(Hook::perform_attack(rogue_attack).with_text(ROGUE_TEXT))
}

fn rogue_attack(arena: &mut Arena, ctx: &GameContext, done: Done) -> CombatResult<()> {
    if let Some(target) = arena.board().card_at(ctx.opposite_player, ctx.position) {
        let hooks = &arena.board().card(target)?.hooks;
        let owned: Vec<HookSlot> = HookSlot::DAMAGE_MODIFIERS
            .into_iter()
            .filter(|slot| hooks.owns(*slot))
            .collect();
        if !owned.is_empty() {
            arena.transfer_abilities(&owned, target, ctx.source)?;
        }
    }
    default_attack(arena, ctx, done)
}

fn brewer() -> KindDefinition {
    KindDefinition::new(BREWER, "Brewer", 2)
        .with_parent(DUCK)
        .with_hook(Hook::perform_attack(brewer_attack).with_text(BREWER_TEXT))
}

fn brewer_attack(arena: &mut Arena, ctx: &GameContext, done: Done) -> CombatResult<()> {
    let board = arena.board();
    let ducks: Vec<EntityId> = board
        .cards_in_play()
        .into_iter()
        .filter(|id| {
            board
                .card(*id)
                .is_ok_and(|card| board.classifier().is_structural(card))
        })
        .collect();

    for duck in ducks {
        empower(arena, duck, 1, 2)?;
    }
    default_attack(arena, ctx, done)
}

fn nemo() -> KindDefinition {
    KindDefinition::new(NEMO, "Nemo", 4)
        .with_parent(CREATURE)
        .with_hook(Hook::perform_attack(nemo_attack).with_text(NEMO_TEXT))
}

/// Lifecycle hooks stay with their card so population counts stay
/// balanced; everything else moves.
fn nemo_attack(arena: &mut Arena, ctx: &GameContext, done: Done) -> CombatResult<()> {
    if let Some(target) = arena.board().card_at(ctx.opposite_player, ctx.position) {
        let card = arena.board().card(target)?;
        let slots: Vec<HookSlot> = card.hooks.slots().filter(|s| !s.is_lifecycle()).collect();
        let traits: Vec<Trait> = card.traits.iter().cloned().collect();

        if !slots.is_empty() {
            arena.transfer_abilities(&slots, target, ctx.source)?;
        }
        if !traits.is_empty() {
            arena.transfer_traits(&traits, target, ctx.source)?;
        }
    }
    default_attack(arena, ctx, done)
}
