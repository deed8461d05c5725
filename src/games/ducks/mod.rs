//! Ducks vs Dogs.
//!
//! The sheriff fields ducks and a Gatling; the bandit fields dogs led by a
//! Trasher. Further kinds (Lad, Rogue, Brewer, PseudoDuck, Nemo) exercise
//! population bonuses, ability theft and compound classification.
//!
//! Cards are classified as "Duck" when they quack and swim, as "Dog" when
//! their kind descends from Dog, and as "Duck-Dog" when both hold.

mod kinds;

pub use kinds::*;

use crate::cards::{Classifier, KindId, KindRegistry};
use crate::core::{CombatConfig, CombatResult, EntityId, PlayerId};
use crate::rules::{Arena, Board};
use crate::view::Presenter;

/// The sheriff's side.
pub const SHERIFF: PlayerId = PlayerId(0);

/// The bandit's side.
pub const BANDIT: PlayerId = PlayerId(1);

/// Registry holding every Ducks vs Dogs kind.
#[must_use]
pub fn kind_registry() -> KindRegistry {
    let mut registry = KindRegistry::new();
    for def in definitions() {
        let registered = registry.register(def);
        assert!(registered.is_ok(), "Kinds must be registered parents first: {registered:?}");
    }
    registry
}

/// "Duck" by traits, "Dog" by descent.
#[must_use]
pub fn classifier() -> Classifier {
    Classifier::new(("Duck", vec![QUACKS, SWIMS]), ("Dog", DOG)).with_default_label("Creature")
}

/// Empty board with the Ducks vs Dogs kinds.
#[must_use]
pub fn board(config: CombatConfig) -> Board {
    Board::new(config, kind_registry(), classifier())
        .with_player_name(SHERIFF, "Sheriff")
        .with_player_name(BANDIT, "Bandit")
}

/// Empty arena with the Ducks vs Dogs kinds.
#[must_use]
pub fn arena(config: CombatConfig, presenter: impl Presenter + 'static) -> Arena {
    Arena::new(board(config), presenter)
}

#[must_use]
pub fn sheriff_deck() -> Vec<KindId> {
    vec![DUCK, DUCK, DUCK, GATLING]
}

#[must_use]
pub fn bandit_deck() -> Vec<KindId> {
    vec![TRASHER, DOG, DOG]
}

/// Create one card per kind in `deck` and play them onto `player`'s table
/// in order. Returns the new cards.
pub fn deal(arena: &mut Arena, player: PlayerId, deck: &[KindId]) -> CombatResult<Vec<EntityId>> {
    let mut cards = Vec::with_capacity(deck.len());
    for &kind in deck {
        let card = arena.board_mut().create_card(kind)?;
        arena.play_card(player, card)?;
        cards.push(card);
    }
    Ok(cards)
}
