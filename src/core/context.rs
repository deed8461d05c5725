//! Per-resolution game context.
//!
//! A `GameContext` is created by whoever starts a resolution (an attack,
//! a card entering play) and handed to every hook involved. It is a small
//! `Copy` value holding IDs only: the rosters themselves are read from the
//! board, so a context can never outlive or go stale against the state it
//! describes.

use serde::{Deserialize, Serialize};

use super::entity::EntityId;
use super::player::PlayerId;

/// Transient bundle describing who is acting against whom.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameContext {
    /// The acting side.
    pub current_player: PlayerId,

    /// The side being acted upon.
    pub opposite_player: PlayerId,

    /// The card performing the action.
    pub source: EntityId,

    /// Slot of `source` on its table. The current target is the card in the
    /// same slot of the opposing table.
    pub position: usize,
}

impl GameContext {
    /// Create a context for `source` at `position`.
    #[must_use]
    pub fn new(
        current_player: PlayerId,
        opposite_player: PlayerId,
        source: EntityId,
        position: usize,
    ) -> Self {
        Self {
            current_player,
            opposite_player,
            source,
            position,
        }
    }

    /// The opposing player as a damage target.
    #[must_use]
    pub fn opposite_entity(&self) -> EntityId {
        EntityId::player(self.opposite_player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_entity() {
        let ctx = GameContext::new(PlayerId::new(0), PlayerId::new(1), EntityId(4), 0);
        assert_eq!(ctx.opposite_entity(), EntityId(1));
    }
}
