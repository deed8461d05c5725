//! Card instances - runtime combatant state.
//!
//! `Card` is one creature in one game: its power, its traits and the hooks
//! it currently owns. Cards are created from a `KindDefinition` and then
//! change independently of every other card of the same kind.

use super::definition::{KindDefinition, KindId};
use super::traits::{Trait, TraitSet};
use crate::core::EntityId;
use crate::hooks::HookSet;
use crate::zones::Seat;

/// A card in a game.
///
/// ## Power
///
/// `current_power` stays within `min_power..=max_power`, where the floor
/// comes from the board configuration. Reaching the floor is what makes a
/// card leave play.
#[derive(Clone, Debug)]
pub struct Card {
    pub id: EntityId,
    pub kind: KindId,
    pub name: String,
    pub image: Option<String>,
    pub max_power: i64,
    pub current_power: i64,
    pub traits: TraitSet,
    pub hooks: HookSet,
    seat: Option<Seat>,
}

impl Card {
    /// Create a card at full power from its kind.
    #[must_use]
    pub fn from_kind(id: EntityId, kind: &KindDefinition) -> Self {
        Self {
            id,
            kind: kind.id,
            name: kind.name.clone(),
            image: kind.image.clone(),
            max_power: kind.max_power,
            current_power: kind.max_power,
            traits: kind.traits.clone(),
            hooks: kind.hooks.clone(),
            seat: None,
        }
    }

    /// Where the card sits, if it is on a table.
    #[must_use]
    pub fn seat(&self) -> Option<Seat> {
        self.seat
    }

    pub(crate) fn set_seat(&mut self, seat: Option<Seat>) {
        self.seat = seat;
    }

    #[must_use]
    pub fn is_in_play(&self) -> bool {
        self.seat.is_some()
    }

    #[must_use]
    pub fn has_trait(&self, t: &Trait) -> bool {
        self.traits.contains(t)
    }

    /// Lower current power by `amount`, stopping at `floor`.
    ///
    /// Returns the new power.
    pub fn lose_power(&mut self, amount: i64, floor: i64) -> i64 {
        self.current_power = (self.current_power - amount.max(0)).max(floor);
        self.current_power
    }

    /// Raise current power by `amount`, stopping at `max_power`.
    ///
    /// Returns how much power was actually restored.
    pub fn heal(&mut self, amount: i64) -> i64 {
        let before = self.current_power;
        self.current_power = (self.current_power + amount.max(0)).min(self.max_power);
        self.current_power - before
    }

    /// Raise the power cap by `amount`.
    pub fn grow_max(&mut self, amount: i64) {
        self.max_power += amount.max(0);
    }

    /// Check if the card is at the power floor.
    #[must_use]
    pub fn is_exhausted(&self, floor: i64) -> bool {
        self.current_power <= floor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PlayerId;

    fn duck() -> Card {
        let kind = KindDefinition::new(KindId::new(1), "Duck", 2)
            .with_trait(Trait::new("quacks"))
            .with_image("duck.png");
        Card::from_kind(EntityId(2), &kind)
    }

    #[test]
    fn test_from_kind() {
        let card = duck();
        assert_eq!(card.name, "Duck");
        assert_eq!(card.kind, KindId::new(1));
        assert_eq!(card.current_power, 2);
        assert_eq!(card.max_power, 2);
        assert_eq!(card.image.as_deref(), Some("duck.png"));
        assert!(card.has_trait(&Trait::new("quacks")));
        assert!(!card.is_in_play());
    }

    #[test]
    fn test_lose_power_floors() {
        let mut card = duck();
        assert_eq!(card.lose_power(1, 0), 1);
        assert_eq!(card.lose_power(5, 0), 0);
        assert!(card.is_exhausted(0));
    }

    #[test]
    fn test_negative_damage_is_ignored() {
        let mut card = duck();
        assert_eq!(card.lose_power(-3, 0), 2);
    }

    #[test]
    fn test_heal_caps_at_max() {
        let mut card = duck();
        card.lose_power(2, 0);
        assert_eq!(card.heal(5), 2);
        assert_eq!(card.current_power, 2);

        card.grow_max(1);
        assert_eq!(card.heal(2), 1);
        assert_eq!(card.current_power, 3);
    }

    #[test]
    fn test_seat() {
        let mut card = duck();
        card.set_seat(Some(Seat::new(PlayerId::new(0), 1)));
        assert!(card.is_in_play());
        assert_eq!(card.seat().map(|s| s.position), Some(1));
    }
}
