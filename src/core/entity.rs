//! Entity identification for combatants.
//!
//! Everything that can be attacked has an `EntityId`: both players and
//! the cards on their tables.
//!
//! ## ID Layout
//!
//! - `0..player_count`: Reserved for players
//! - `player_count..`: Cards, allocated by the board in creation order
//!
//! The damage pipeline uses this layout to pick between the
//! `modifyDealtDamageToPlayer` and `modifyDealtDamageToCreature` hooks.
//!
//! ```
//! use ccg_combat::core::{EntityId, PlayerId};
//!
//! let player_count = 2;
//! let sheriff = EntityId::player(PlayerId::new(0));
//! let duck = EntityId(2);
//!
//! assert!(sheriff.is_player(player_count));
//! assert!(!duck.is_player(player_count));
//! ```

use serde::{Deserialize, Serialize};

use super::player::PlayerId;

/// Unique identifier for a player or a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// Entity ID of a player.
    #[must_use]
    pub const fn player(id: PlayerId) -> Self {
        Self(id.0 as u32)
    }

    /// First ID available for cards in a game with `player_count` players.
    #[must_use]
    pub const fn first_card(player_count: usize) -> u32 {
        player_count as u32
    }

    /// Check if this entity ID refers to a player.
    #[must_use]
    pub const fn is_player(self, player_count: usize) -> bool {
        self.0 < player_count as u32
    }

    /// Convert to `PlayerId` if this is a player entity.
    ///
    /// ```
    /// use ccg_combat::core::{EntityId, PlayerId};
    ///
    /// assert_eq!(EntityId(1).as_player(2), Some(PlayerId::new(1)));
    /// assert_eq!(EntityId(5).as_player(2), None);
    /// ```
    #[must_use]
    pub fn as_player(self, player_count: usize) -> Option<PlayerId> {
        if self.is_player(player_count) {
            Some(PlayerId::new(self.0 as u8))
        } else {
            None
        }
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for EntityId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}
